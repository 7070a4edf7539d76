//! Telemetry utilities for lookup timing and span naming.

use std::time::Instant;

/// Guard for timing a provider call and recording metrics.
///
/// Records lookup latency when dropped, so early returns count too.
pub struct LookupTimer {
    provider: &'static str,
    start: Instant,
}

impl LookupTimer {
    /// Start timing a lookup against `provider`.
    pub fn new(provider: &'static str) -> Self {
        Self {
            provider,
            start: Instant::now(),
        }
    }
}

impl Drop for LookupTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        crate::metrics::record_lookup(self.provider, duration);
    }
}

/// Standardized span constructors.
pub mod spans {
    use tracing::{Span, info_span};

    /// Span for one lookup cycle.
    pub fn lookup(user: &str, query: &str) -> Span {
        info_span!("lookup", user = %user, query = %query)
    }

    /// Span for a rotation run and its background tasks.
    pub fn rotation(run: u64, items: usize) -> Span {
        info_span!("rotation", run, items)
    }

    /// Span for a chat connection.
    pub fn chat(channel: &str) -> Span {
        info_span!("chat", channel = %channel)
    }
}
