//! Rotation timing through the overlay surface on tokio's paused clock.

mod common;

use common::{RecordingSurface, Seen, config};
use lexicard::content::{ContentItem, Headline};
use lexicard::display::{OverlayEvent, OverlaySurface, RotationScheduler, RotationTiming};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

fn items(n: usize) -> Vec<ContentItem> {
    (1..=n).map(|i| ContentItem::new("noun", format!("meaning {i}"))).collect()
}

fn headline() -> Headline {
    Headline {
        word: "wolf".into(),
        pronunciation: None,
    }
}

/// Collect every overlay event with the paused-clock time it was emitted.
fn record(overlay: &OverlaySurface) -> Arc<Mutex<Vec<(u128, &'static str)>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut rx = overlay.subscribe();
    let start = Instant::now();
    let sink = Arc::clone(&seen);
    tokio::spawn(async move {
        while let Ok(frame) = rx.recv().await {
            let kind = match frame.event {
                OverlayEvent::Show { .. } => "show",
                OverlayEvent::Hide { .. } => "hide",
                OverlayEvent::Collapse { .. } => "collapse",
                OverlayEvent::Expand { .. } => "expand",
            };
            sink.lock().push((start.elapsed().as_millis(), kind));
        }
    });
    seen
}

#[tokio::test(start_paused = true)]
async fn overlay_rotation_follows_lifetime_formula() {
    let cfg = config(
        "[command]\ntrigger = \"!def\"\n[display]\ndwell_secs = 5\ntransition_secs = 0.5\nin_secs = 0\nout_secs = 1\n",
    );
    let overlay = Arc::new(OverlaySurface::new(&cfg.display, 32));
    let seen = record(&overlay);
    let scheduler = RotationScheduler::new(overlay.clone(), RotationTiming::from_config(&cfg.display));

    scheduler.run(headline(), items(3)).await;
    tokio::time::sleep(Duration::from_secs(60)).await;

    // Swaps take a full transition, so the second advance lands at
    // 5000 + 1000 + 5000; the hide still lands at 5000 * 3 + 1000 * 2.
    assert_eq!(
        *seen.lock(),
        vec![
            (0, "show"),
            (5000, "collapse"),
            (5500, "expand"),
            (11000, "collapse"),
            (11500, "expand"),
            (17000, "hide"),
        ]
    );
    assert!(!overlay.is_visible());
}

#[tokio::test(start_paused = true)]
async fn superseding_run_replaces_card_once() {
    let cfg = config(
        "[command]\ntrigger = \"!def\"\n[display]\ndwell_secs = 5\ntransition_secs = 0.5\nin_secs = 0\nout_secs = 0\n",
    );
    let overlay = Arc::new(OverlaySurface::new(&cfg.display, 32));
    let seen = record(&overlay);
    let scheduler = RotationScheduler::new(overlay.clone(), RotationTiming::from_config(&cfg.display));

    scheduler.run(headline(), items(3)).await;
    tokio::time::sleep(Duration::from_secs(2)).await;
    scheduler.run(headline(), items(1)).await;
    tokio::time::sleep(Duration::from_secs(60)).await;

    // The visible card is hidden before the new one is shown; the first
    // run never advances or hides on its own.
    assert_eq!(
        *seen.lock(),
        vec![(0, "show"), (2000, "hide"), (2000, "show"), (7000, "hide")]
    );
}

#[tokio::test(start_paused = true)]
async fn lifetime_holds_for_many_batch_sizes() {
    let timing = RotationTiming {
        dwell: Duration::from_millis(3000),
        transition: Duration::from_millis(800),
    };
    for n in 1..=6u64 {
        let surface = RecordingSurface::with_transition(Duration::from_millis(400));
        let scheduler = RotationScheduler::new(surface.clone(), timing);

        scheduler.run(headline(), items(n as usize)).await;
        tokio::time::sleep(Duration::from_secs(120)).await;

        let events = surface.events();
        let expected = u128::from(3000 * n + 800 * (n - 1));
        assert_eq!(events.last(), Some(&(expected, Seen::Hide)), "n = {n}");
        let swaps = events.iter().filter(|(_, s)| matches!(s, Seen::Swap(_))).count();
        assert_eq!(swaps as u64, n - 1, "n = {n}");
    }
}
