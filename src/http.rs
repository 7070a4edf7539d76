//! HTTP server for the overlay feed and Prometheus metrics.
//!
//! - `GET /metrics`: Prometheus text format
//! - `GET /health`: liveness probe
//! - `GET /events`: server-sent events, one JSON [`OverlayFrame`] per event

use axum::{
    Router,
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
};
use futures_util::{Stream, StreamExt};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;

use crate::display::{OverlayFrame, OverlaySurface};

/// Handler for GET /metrics - returns Prometheus metrics in text format.
async fn metrics_handler() -> String {
    crate::metrics::gather_metrics()
}

async fn health_handler() -> &'static str {
    "ok"
}

/// Handler for GET /events - streams overlay frames to a browser source.
async fn events_handler(
    State(overlay): State<Arc<OverlaySurface>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    tracing::debug!("Overlay subscriber connected");
    let stream = BroadcastStream::new(overlay.subscribe()).filter_map(|frame| async move {
        match frame {
            Ok(frame) => frame_event(&frame).map(Ok),
            Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Overlay subscriber lagged");
                None
            }
        }
    });
    Sse::new(stream).keep_alive(KeepAlive::default())
}

fn frame_event(frame: &OverlayFrame) -> Option<Event> {
    match Event::default().id(frame.id.to_string()).json_data(frame) {
        Ok(event) => Some(event),
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode overlay frame");
            None
        }
    }
}

/// Build the router.
pub fn router(overlay: Arc<OverlaySurface>) -> Router {
    Router::new()
        .route("/metrics", get(metrics_handler))
        .route("/health", get(health_handler))
        .route("/events", get(events_handler))
        .with_state(overlay)
}

/// Run the HTTP server.
///
/// This is a long-running task that should be spawned in the background.
pub async fn run_http_server(addr: SocketAddr, overlay: Arc<OverlaySurface>) {
    let app = router(overlay);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind HTTP server on {}: {}", addr, e);
            return;
        }
    };
    tracing::info!("Overlay HTTP server listening on {}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("HTTP server error: {}", e);
    }
}
