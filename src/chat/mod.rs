//! Twitch chat input and output.
//!
//! Reads the channel over plain IRC, turns PRIVMSG lines into
//! [`TwitchMessage`]s for the session, and writes queued reply lines.

pub mod connection;
pub mod message;

pub use connection::{run, run_once};
pub use message::TwitchMessage;
