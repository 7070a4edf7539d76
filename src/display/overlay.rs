//! Browser-source overlay surface.
//!
//! The card itself is rendered by a browser source subscribed to
//! `/events`. This surface emits one [`OverlayFrame`] per visual step and
//! then waits the step's animation length, so the scheduler sees the same
//! timing a rendered card would have.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::trace;
use uuid::Uuid;

use super::DisplaySurface;
use crate::config::DisplayConfig;
use crate::content::{ContentItem, Headline};

/// A visual step for the overlay to play.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OverlayEvent {
    /// Replace all content and play the entrance animation.
    Show {
        word: String,
        pronunciation: Option<String>,
        category: String,
        text: String,
        animation: String,
        secs: f64,
    },
    /// Play the exit animation.
    Hide { animation: String, secs: f64 },
    /// Collapse the meaning block.
    Collapse { secs: f64 },
    /// Replace the meaning and expand the block again.
    Expand {
        category: String,
        text: String,
        secs: f64,
    },
}

/// An [`OverlayEvent`] with delivery metadata.
#[derive(Debug, Clone, Serialize)]
pub struct OverlayFrame {
    pub id: Uuid,
    pub at: DateTime<Utc>,
    #[serde(flatten)]
    pub event: OverlayEvent,
}

impl OverlayFrame {
    fn new(event: OverlayEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            at: Utc::now(),
            event,
        }
    }
}

#[derive(Debug, Clone)]
struct Animations {
    in_name: String,
    in_duration: Duration,
    out_name: String,
    out_duration: Duration,
    half_transition: Duration,
}

/// Display surface publishing to overlay subscribers.
pub struct OverlaySurface {
    events: broadcast::Sender<OverlayFrame>,
    visible: AtomicBool,
    animations: Animations,
}

impl OverlaySurface {
    pub fn new(config: &DisplayConfig, capacity: usize) -> Self {
        let (events, _) = broadcast::channel(capacity.max(1));
        Self {
            events,
            visible: AtomicBool::new(false),
            animations: Animations {
                in_name: config.in_animation.clone(),
                in_duration: config.in_duration(),
                out_name: config.out_animation.clone(),
                out_duration: config.out_duration(),
                half_transition: config.half_transition(),
            },
        }
    }

    /// Receive every frame emitted from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<OverlayFrame> {
        self.events.subscribe()
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::Acquire)
    }

    fn emit(&self, event: OverlayEvent) {
        trace!(?event, "Overlay frame");
        // No subscriber is not an error; the overlay may not be open yet.
        let _ = self.events.send(OverlayFrame::new(event));
    }

    async fn play_hide(&self) {
        self.emit(OverlayEvent::Hide {
            animation: self.animations.out_name.clone(),
            secs: self.animations.out_duration.as_secs_f64(),
        });
        tokio::time::sleep(self.animations.out_duration).await;
    }
}

#[async_trait]
impl DisplaySurface for OverlaySurface {
    async fn change(&self, headline: &Headline, item: &ContentItem) {
        if self.visible.swap(false, Ordering::AcqRel) {
            self.play_hide().await;
        }

        self.emit(OverlayEvent::Show {
            word: headline.word.clone(),
            pronunciation: headline.pronunciation.clone(),
            category: item.category.clone(),
            text: item.text.clone(),
            animation: self.animations.in_name.clone(),
            secs: self.animations.in_duration.as_secs_f64(),
        });
        self.visible.store(true, Ordering::Release);
        tokio::time::sleep(self.animations.in_duration).await;
    }

    async fn swap(&self, item: &ContentItem) {
        let half = self.animations.half_transition;
        self.emit(OverlayEvent::Collapse {
            secs: half.as_secs_f64(),
        });
        tokio::time::sleep(half).await;

        self.emit(OverlayEvent::Expand {
            category: item.category.clone(),
            text: item.text.clone(),
            secs: half.as_secs_f64(),
        });
        tokio::time::sleep(half).await;
    }

    async fn hide(&self) {
        if self.visible.swap(false, Ordering::AcqRel) {
            self.play_hide().await;
        }
    }
}
