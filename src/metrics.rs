//! Prometheus metrics collection for lexicard.
//!
//! Exposed on the overlay HTTP server at `/metrics`.
//!
//! - `lexicard_triggers_total{outcome}` - Chat messages handled, by outcome
//! - `lexicard_lookup_errors_total{code}` - Rejected or failed lookups
//! - `lexicard_lookup_duration_seconds{provider}` - Provider latency
//! - `lexicard_rotations_started_total` - Rotation runs started
//! - `lexicard_rotations_superseded_total` - Runs cut short by a newer run
//! - `lexicard_rotation_items` - Items per rotation run

use prometheus::{
    Encoder, Histogram, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry,
    TextEncoder,
};
use std::sync::OnceLock;

/// Global Prometheus registry for all metrics.
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(Registry::new)
}

// ========================================================================
// Command pipeline
// ========================================================================

/// Chat messages handled, labelled by outcome.
pub static TRIGGERS: OnceLock<IntCounterVec> = OnceLock::new();

/// Lookup errors by error code.
pub static LOOKUP_ERRORS: OnceLock<IntCounterVec> = OnceLock::new();

/// Provider latency by provider name.
pub static LOOKUP_LATENCY: OnceLock<HistogramVec> = OnceLock::new();

// ========================================================================
// Rotation
// ========================================================================

pub static ROTATIONS_STARTED: OnceLock<IntCounter> = OnceLock::new();

pub static ROTATIONS_SUPERSEDED: OnceLock<IntCounter> = OnceLock::new();

/// Items per rotation run.
pub static ROTATION_ITEMS: OnceLock<Histogram> = OnceLock::new();

// ========================================================================
// Chat connection
// ========================================================================

/// Chat connection attempts by result.
pub static CHAT_CONNECTIONS: OnceLock<IntCounterVec> = OnceLock::new();

/// Initialize the Prometheus metrics registry.
///
/// Must be called once at startup before any metrics are recorded.
/// Recording before `init` is a silent no-op.
pub fn init() {
    let r = registry();

    macro_rules! register {
        ($metric:ident, $init:expr) => {
            match $init {
                Ok(m) => {
                    if let Err(e) = r.register(Box::new(m.clone())) {
                        tracing::warn!(error = %e, concat!("Failed to register metric ", stringify!($metric)));
                    }
                    let _ = $metric.set(m);
                }
                Err(e) => {
                    tracing::warn!(error = %e, concat!("Failed to create metric ", stringify!($metric)));
                }
            }
        };
    }

    register!(TRIGGERS, IntCounterVec::new(Opts::new("lexicard_triggers_total", "Chat messages handled by outcome"), &["outcome"]));
    register!(LOOKUP_ERRORS, IntCounterVec::new(Opts::new("lexicard_lookup_errors_total", "Rejected or failed lookups by code"), &["code"]));
    register!(LOOKUP_LATENCY, HistogramVec::new(
        HistogramOpts::new("lexicard_lookup_duration_seconds", "Content provider latency")
            .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        &["provider"]));
    register!(ROTATIONS_STARTED, IntCounter::new("lexicard_rotations_started_total", "Rotation runs started"));
    register!(ROTATIONS_SUPERSEDED, IntCounter::new("lexicard_rotations_superseded_total", "Rotation runs cut short by a newer run"));
    register!(ROTATION_ITEMS, Histogram::with_opts(
        HistogramOpts::new("lexicard_rotation_items", "Items per rotation run")
            .buckets(vec![1.0, 2.0, 3.0, 4.0, 6.0, 8.0, 12.0, 16.0])));
    register!(CHAT_CONNECTIONS, IntCounterVec::new(Opts::new("lexicard_chat_connections_total", "Chat connection attempts by result"), &["result"]));
}

/// Gather all metrics and encode them in Prometheus text format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = registry().gather();
    let mut buffer = vec![];
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode Prometheus metrics");
        return String::new();
    }
    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Prometheus metrics were not valid UTF-8");
            String::new()
        }
    }
}

// ============================================================================
// Helper functions for metric updates
// ============================================================================

/// Record the outcome of one chat message.
#[inline]
pub fn record_trigger(outcome: &str) {
    if let Some(c) = TRIGGERS.get() {
        c.with_label_values(&[outcome]).inc();
    }
}

/// Record a lookup error.
#[inline]
pub fn record_lookup_error(code: &str) {
    if let Some(c) = LOOKUP_ERRORS.get() {
        c.with_label_values(&[code]).inc();
    }
}

/// Record provider latency.
#[inline]
pub fn record_lookup(provider: &str, duration_secs: f64) {
    if let Some(h) = LOOKUP_LATENCY.get() {
        h.with_label_values(&[provider]).observe(duration_secs);
    }
}

/// Record a started rotation run.
#[inline]
pub fn record_rotation_started(items: usize) {
    if let Some(c) = ROTATIONS_STARTED.get() {
        c.inc();
    }
    if let Some(h) = ROTATION_ITEMS.get() {
        h.observe(items as f64);
    }
}

#[inline]
pub fn record_rotation_superseded() {
    if let Some(c) = ROTATIONS_SUPERSEDED.get() {
        c.inc();
    }
}

/// Record a chat connection attempt (`connected`, `error`).
#[inline]
pub fn record_chat_connection(result: &str) {
    if let Some(c) = CHAT_CONNECTIONS.get() {
        c.with_label_values(&[result]).inc();
    }
}
