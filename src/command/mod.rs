//! Command recognition and gating.
//!
//! Everything a chat message passes through before a lookup starts:
//! - **Trigger**: ordered, case-insensitive prefix matching
//! - **Access**: blocklist first, then role and allowlist checks
//! - **Cooldown**: global pause between successful lookups

pub mod access;
pub mod cooldown;
pub mod trigger;

pub use access::{AccessPolicy, UserList};
pub use cooldown::Cooldown;
pub use trigger::{TriggerMatch, TriggerSet};

/// A chat message as seen by the command pipeline.
///
/// Implemented by the Twitch chat reader and by test doubles.
pub trait ChatMessage: Send + Sync {
    /// Full message text, original case preserved.
    fn text(&self) -> &str;

    /// Lower-cased login name of the sender.
    fn username(&self) -> &str;

    /// Whether the sender moderates the channel.
    fn is_moderator(&self) -> bool;

    /// Whether the sender owns the channel.
    fn is_broadcaster(&self) -> bool;

    /// Whether the sender appears on `list`.
    fn username_on_list(&self, list: &UserList) -> bool {
        list.contains(self.username())
    }
}
