//! In-process fakes.

#![allow(dead_code)]

use async_trait::async_trait;
use lexicard::command::ChatMessage;
use lexicard::content::{ContentItem, ContentProvider, Headline, Lookup};
use lexicard::display::DisplaySurface;
use lexicard::error::LookupError;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::Instant;

/// A chat message with explicit roles.
pub struct TestMessage {
    pub text: String,
    pub username: String,
    pub moderator: bool,
    pub broadcaster: bool,
}

impl TestMessage {
    pub fn viewer(text: &str) -> Self {
        Self {
            text: text.to_string(),
            username: "viewer".to_string(),
            moderator: false,
            broadcaster: false,
        }
    }

    pub fn moderator(text: &str) -> Self {
        Self {
            moderator: true,
            username: "helper".to_string(),
            ..Self::viewer(text)
        }
    }
}

impl ChatMessage for TestMessage {
    fn text(&self) -> &str {
        &self.text
    }
    fn username(&self) -> &str {
        &self.username
    }
    fn is_moderator(&self) -> bool {
        self.moderator
    }
    fn is_broadcaster(&self) -> bool {
        self.broadcaster
    }
}

/// Holds a provider call open until released.
#[derive(Default)]
pub struct Gate {
    release: Notify,
}

impl Gate {
    pub fn release(&self) {
        self.release.notify_one();
    }
}

/// Provider answering every query with the same items, or failing.
pub struct ScriptedProvider {
    items: Vec<ContentItem>,
    failure: Option<fn() -> LookupError>,
    gate: Option<Arc<Gate>>,
    queries: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn returning(items: Vec<ContentItem>) -> Self {
        Self {
            items,
            failure: None,
            gate: None,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(failure: fn() -> LookupError) -> Self {
        Self {
            failure: Some(failure),
            ..Self::returning(Vec::new())
        }
    }

    pub fn gated(mut self, gate: Arc<Gate>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().clone()
    }
}

#[async_trait]
impl ContentProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn fetch(&self, query: &str) -> Result<Lookup, LookupError> {
        self.queries.lock().push(query.to_string());
        if let Some(ref gate) = self.gate {
            gate.release.notified().await;
        }
        if let Some(failure) = self.failure {
            return Err(failure());
        }
        Ok(Lookup {
            headline: Headline {
                word: query.to_string(),
                pronunciation: None,
            },
            items: self.items.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Seen {
    Change(String),
    Swap(String),
    Hide,
}

/// Surface recording every call with its offset from creation, in ms.
pub struct RecordingSurface {
    start: Instant,
    transition: Duration,
    events: Mutex<Vec<(u128, Seen)>>,
}

impl RecordingSurface {
    pub fn new() -> Arc<Self> {
        Self::with_transition(Duration::ZERO)
    }

    /// Each swap takes `transition` to resolve.
    pub fn with_transition(transition: Duration) -> Arc<Self> {
        Arc::new(Self {
            start: Instant::now(),
            transition,
            events: Mutex::new(Vec::new()),
        })
    }

    pub fn events(&self) -> Vec<(u128, Seen)> {
        self.events.lock().clone()
    }

    fn record(&self, seen: Seen) {
        let at = self.start.elapsed().as_millis();
        self.events.lock().push((at, seen));
    }
}

#[async_trait]
impl DisplaySurface for RecordingSurface {
    async fn change(&self, _headline: &Headline, item: &ContentItem) {
        self.record(Seen::Change(item.text.clone()));
    }

    async fn swap(&self, item: &ContentItem) {
        self.record(Seen::Swap(item.text.clone()));
        tokio::time::sleep(self.transition).await;
    }

    async fn hide(&self) {
        self.record(Seen::Hide);
    }
}
