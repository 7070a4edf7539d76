//! Timed rotation of content items over a display surface.
//!
//! # Run lifecycle
//!
//! ```text
//! Hidden ──change(0)──▶ Showing(0) ──dwell──▶ swap(1) ──▶ Showing(1) ── … ──▶ Hidden
//!   ▲                                                                          │
//!   └───────────── end-of-life: dwell × N + transition × (N − 1) ──────────────┘
//! ```
//!
//! The end-of-life deadline is computed once when the run starts and is a
//! hard ceiling: slow swaps delay the following advances but never the hide.
//!
//! Each run owns a [`CancellationToken`]. Starting a run cancels the token
//! of the previous one before anything else happens, and every pending
//! continuation checks its token before touching the surface, so there is
//! never more than one live advance chain or end-of-life timer.

use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug};

use super::DisplaySurface;
use crate::config::DisplayConfig;
use crate::content::{ContentItem, Headline};
use crate::metrics;
use crate::telemetry::spans;

/// Rotation timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationTiming {
    /// Time a single item stays on screen.
    pub dwell: Duration,
    /// Time budgeted for the handoff between two items.
    pub transition: Duration,
}

impl RotationTiming {
    pub fn from_config(config: &DisplayConfig) -> Self {
        Self {
            dwell: config.dwell(),
            transition: config.transition(),
        }
    }

    /// Total lifetime of a run over `items` items.
    pub fn lifetime(&self, items: usize) -> Duration {
        if items == 0 {
            return Duration::ZERO;
        }
        let n = u32::try_from(items).unwrap_or(u32::MAX);
        self.dwell
            .saturating_mul(n)
            .saturating_add(self.transition.saturating_mul(n - 1))
    }
}

/// The run currently allowed to touch the surface.
#[derive(Debug)]
struct ActiveRun {
    id: u64,
    token: CancellationToken,
}

/// Drives rotation runs; at most one run is live at any time.
pub struct RotationScheduler {
    surface: Arc<dyn DisplaySurface>,
    timing: RotationTiming,
    current: Arc<Mutex<Option<ActiveRun>>>,
    next_id: AtomicU64,
}

impl RotationScheduler {
    pub fn new(surface: Arc<dyn DisplaySurface>, timing: RotationTiming) -> Self {
        Self {
            surface,
            timing,
            current: Arc::new(Mutex::new(None)),
            next_id: AtomicU64::new(0),
        }
    }

    pub fn timing(&self) -> RotationTiming {
        self.timing
    }

    /// Whether a run has been started and has not reached its end of life.
    pub fn is_running(&self) -> bool {
        self.current.lock().is_some()
    }

    /// Start a run over `items`, superseding any live run.
    ///
    /// Returns once the first item is on screen; advancing and the final
    /// hide happen on background tasks.
    pub async fn run(&self, headline: Headline, items: Vec<ContentItem>) {
        let Some(first) = items.first().cloned() else {
            debug!("Ignoring rotation without items");
            return;
        };

        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let token = CancellationToken::new();
        let previous = self.current.lock().replace(ActiveRun {
            id,
            token: token.clone(),
        });
        if let Some(previous) = previous {
            previous.token.cancel();
            metrics::record_rotation_superseded();
            debug!(run = previous.id, by = id, "Superseded rotation");
        }
        metrics::record_rotation_started(items.len());

        let span = spans::rotation(id, items.len());
        async {
            self.surface.change(&headline, &first).await;

            if token.is_cancelled() {
                debug!("Superseded while showing first item");
                return;
            }

            let lifetime = self.timing.lifetime(items.len());
            debug!(lifetime = ?lifetime, "Rotation scheduled");

            tokio::spawn(
                end_of_life(
                    Arc::clone(&self.surface),
                    Arc::clone(&self.current),
                    id,
                    token.clone(),
                    lifetime,
                )
                .in_current_span(),
            );

            if items.len() > 1 {
                tokio::spawn(
                    advance_chain(Arc::clone(&self.surface), items, self.timing.dwell, token)
                        .in_current_span(),
                );
            }
        }
        .instrument(span)
        .await
    }
}

/// Hide the surface once the run's lifetime has elapsed.
async fn end_of_life(
    surface: Arc<dyn DisplaySurface>,
    current: Arc<Mutex<Option<ActiveRun>>>,
    id: u64,
    token: CancellationToken,
    lifetime: Duration,
) {
    tokio::select! {
        biased;
        _ = token.cancelled() => return,
        _ = tokio::time::sleep(lifetime) => {}
    }

    // Stops an advance chain still waiting on a slow swap.
    token.cancel();
    {
        let mut current = current.lock();
        if current.as_ref().is_some_and(|run| run.id == id) {
            *current = None;
        }
    }
    surface.hide().await;
    debug!("Rotation finished");
}

/// Show items 1.. one after the other, `dwell` apart.
///
/// The next wait is armed only after the previous swap has finished.
async fn advance_chain(
    surface: Arc<dyn DisplaySurface>,
    items: Vec<ContentItem>,
    dwell: Duration,
    token: CancellationToken,
) {
    for (index, item) in items.iter().enumerate().skip(1) {
        tokio::select! {
            biased;
            _ = token.cancelled() => return,
            _ = tokio::time::sleep(dwell) => {}
        }
        debug!(index, category = %item.category, "Advancing rotation");
        surface.swap(item).await;
    }
}
