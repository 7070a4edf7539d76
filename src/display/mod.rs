//! Presentation of looked-up content.
//!
//! - [`DisplaySurface`]: the animated card (change, swap, hide)
//! - [`RotationScheduler`]: timed, cancellable rotation over a surface
//! - [`OverlaySurface`]: surface feeding the browser source over SSE
//! - [`Publisher`] / [`ChatReplyPublisher`]: single-item output into chat

pub mod chat_reply;
pub mod overlay;
pub mod scheduler;

use async_trait::async_trait;

use crate::content::{ContentItem, Headline};

pub use chat_reply::ChatReplyPublisher;
pub use overlay::{OverlayEvent, OverlayFrame, OverlaySurface};
pub use scheduler::{RotationScheduler, RotationTiming};

/// The on-screen card.
///
/// Every method resolves once its visual transition has finished.
#[async_trait]
pub trait DisplaySurface: Send + Sync {
    /// Hide the card if shown, replace all content, show it again.
    async fn change(&self, headline: &Headline, item: &ContentItem);

    /// Collapse the meaning block, replace the meaning, expand it again.
    async fn swap(&self, item: &ContentItem);

    /// Hide the card. No-op when already hidden.
    async fn hide(&self);
}

/// Single-item output used instead of a rotation.
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, headline: &Headline, item: &ContentItem);
}
