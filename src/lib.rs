//! lexicard - chat-command dictionary overlay.
//!
//! Listens to a Twitch channel for a trigger command, looks the requested
//! word up in a dictionary, and rotates the filtered meanings on a
//! browser-source overlay (or replies with the first one in chat).
//!
//! ```text
//! chat ──▶ Session ──▶ ContentProvider ──▶ filter_and_limit ──▶ RotationScheduler ──▶ overlay
//!             │                                                   (or Publisher ──▶ chat)
//!             └─ trigger / access / cooldown / busy
//! ```

pub mod chat;
pub mod command;
pub mod config;
pub mod content;
pub mod display;
pub mod error;
pub mod http;
pub mod metrics;
pub mod session;
pub mod telemetry;

pub use session::{IgnoreReason, Outcome, Presenter, Session};
