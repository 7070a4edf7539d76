//! Twitch chat connection configuration.

use serde::Deserialize;
use std::time::Duration;

/// Twitch IRC connection configuration.
///
/// Without a `token` the connection logs in anonymously (`justinfan` nicks
/// may read chat but not reply), which is enough for overlay mode.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// IRC server as `host:port` (default: irc.chat.twitch.tv:6667).
    #[serde(default = "default_server")]
    pub server: String,
    /// Channel to join, with or without the leading `#`.
    pub channel: String,
    /// Login nickname (default: anonymous justinfan nick).
    #[serde(default = "default_nick")]
    pub nick: String,
    /// OAuth token; required for chat replies.
    #[serde(default)]
    pub token: Option<String>,
    /// Seconds to wait before reconnecting (default: 5).
    #[serde(default = "default_reconnect_secs")]
    pub reconnect_secs: u64,
    /// Minimum milliseconds between two outgoing chat lines (default: 1500).
    #[serde(default = "default_reply_interval_ms")]
    pub reply_interval_ms: u64,
}

impl ChatConfig {
    /// Delay before reconnecting after a dropped connection.
    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_secs(self.reconnect_secs)
    }

    /// Minimum spacing of outgoing chat lines.
    pub fn reply_interval(&self) -> Duration {
        Duration::from_millis(self.reply_interval_ms)
    }
}

fn default_server() -> String {
    "irc.chat.twitch.tv:6667".to_string()
}

fn default_nick() -> String {
    "justinfan31415".to_string()
}

fn default_reconnect_secs() -> u64 {
    5
}

fn default_reply_interval_ms() -> u64 {
    1500
}
