//! Overlay HTTP endpoints over a real socket.

use lexicard::config::DisplayConfig;
use lexicard::content::{ContentItem, Headline};
use lexicard::display::{DisplaySurface, OverlaySurface};
use lexicard::http;
use std::sync::Arc;
use std::time::Duration;

async fn serve(overlay: Arc<OverlaySurface>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, http::router(overlay)).await.unwrap();
    });
    format!("http://{addr}")
}

fn overlay() -> Arc<OverlaySurface> {
    let display: DisplayConfig = toml::from_str("in_secs = 0\nout_secs = 0\n").unwrap();
    Arc::new(OverlaySurface::new(&display, 16))
}

#[tokio::test]
async fn health_and_metrics_respond() {
    lexicard::metrics::init();
    lexicard::metrics::record_trigger("no_trigger");
    let base = serve(overlay()).await;

    let health = reqwest::get(format!("{base}/health")).await.unwrap();
    assert!(health.status().is_success());
    assert_eq!(health.text().await.unwrap(), "ok");

    let metrics = reqwest::get(format!("{base}/metrics"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(metrics.contains("lexicard_triggers_total"));
}

#[tokio::test]
async fn events_stream_overlay_frames() {
    let overlay = overlay();
    let base = serve(Arc::clone(&overlay)).await;

    let mut response = reqwest::get(format!("{base}/events")).await.unwrap();
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "text/event-stream"
    );

    let headline = Headline {
        word: "wolf".into(),
        pronunciation: Some("/wʊlf/".into()),
    };
    overlay
        .change(&headline, &ContentItem::new("noun", "A large wild canine."))
        .await;

    let mut body = String::new();
    while !body.contains("\n\n") {
        let chunk = tokio::time::timeout(Duration::from_secs(5), response.chunk())
            .await
            .expect("no event within 5s")
            .unwrap()
            .expect("stream ended");
        body.push_str(std::str::from_utf8(&chunk).unwrap());
    }

    let data = body
        .lines()
        .find_map(|l| l.strip_prefix("data: "))
        .expect("event without data");
    let frame: serde_json::Value = serde_json::from_str(data).unwrap();
    assert_eq!(frame["type"], "show");
    assert_eq!(frame["word"], "wolf");
    assert_eq!(frame["category"], "noun");
}
