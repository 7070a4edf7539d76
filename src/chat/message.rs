//! Chat messages built from Twitch PRIVMSG lines.

use lexicard_irc::{Line, tags};

use crate::command::ChatMessage;

/// An owned Twitch chat message.
///
/// Owned so it can move onto the task that runs the session cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwitchMessage {
    text: String,
    username: String,
    moderator: bool,
    broadcaster: bool,
}

impl TwitchMessage {
    pub fn new(
        text: impl Into<String>,
        username: &str,
        moderator: bool,
        broadcaster: bool,
    ) -> Self {
        Self {
            text: text.into(),
            username: username.to_lowercase(),
            moderator,
            broadcaster,
        }
    }

    /// Build from a parsed PRIVMSG line.
    ///
    /// Moderator status comes from `mod=1` or a `moderator` badge; the
    /// broadcaster is recognized by the `broadcaster` badge alone.
    pub fn from_line(line: &Line<'_>) -> Option<Self> {
        if !line.is_command("PRIVMSG") {
            return None;
        }
        let text = line.param(1)?;
        let username = line.source_nickname()?;

        let badges = line.tag_value("badges").unwrap_or_default();
        let mut moderator = line.tag_value("mod").is_some_and(|v| v == "1");
        let mut broadcaster = false;
        for (badge, _) in tags::badges(&badges) {
            match badge {
                "broadcaster" => broadcaster = true,
                "moderator" => moderator = true,
                _ => {}
            }
        }

        Some(Self::new(text, username, moderator, broadcaster))
    }
}

impl ChatMessage for TwitchMessage {
    fn text(&self) -> &str {
        &self.text
    }

    fn username(&self) -> &str {
        &self.username
    }

    fn is_moderator(&self) -> bool {
        self.moderator
    }

    fn is_broadcaster(&self) -> bool {
        self.broadcaster
    }
}
