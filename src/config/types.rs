//! Core configuration types and loading.

use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;

use super::access::AccessConfig;
use super::chat::ChatConfig;
use super::command::CommandConfig;
use super::content::ContentConfig;
use super::display::DisplayConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Service configuration, parsed once at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Trigger command and aliases.
    pub command: CommandConfig,
    /// Who may trigger lookups and how often.
    #[serde(default)]
    pub access: AccessConfig,
    /// Rotation timing, animations and content caps.
    #[serde(default)]
    pub display: DisplayConfig,
    /// Dictionary provider and banned words.
    #[serde(default)]
    pub content: ContentConfig,
    /// Twitch chat connection. Without it only test mode can show anything.
    pub chat: Option<ChatConfig>,
    /// HTTP listener serving the overlay feed and metrics.
    #[serde(default)]
    pub overlay: OverlayConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct OverlayConfig {
    /// Address serving `/events`, `/metrics` and `/health` (default: 127.0.0.1:8787).
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,
    /// Capacity of the overlay event broadcast channel (default: 64).
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            event_capacity: default_event_capacity(),
        }
    }
}

fn default_listen() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8787))
}

fn default_event_capacity() -> usize {
    64
}
