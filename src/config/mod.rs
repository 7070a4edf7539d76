//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Root config struct, loading, overlay listener settings
//! - [`command`]: Trigger command and aliases (CommandConfig)
//! - [`access`]: Permission level, user lists, cooldown (AccessConfig)
//! - [`display`]: Rotation timing, animations, content caps (DisplayConfig)
//! - [`content`]: Dictionary API and banned words (ContentConfig)
//! - [`chat`]: Twitch IRC connection (ChatConfig)
//! - [`validation`]: Startup validation collecting every error

mod access;
mod chat;
mod command;
mod content;
mod display;
mod types;
pub mod validation;

pub use access::{AccessConfig, PermissionLevel};
pub use chat::ChatConfig;
pub use command::CommandConfig;
pub use content::ContentConfig;
pub use display::{DisplayConfig, DisplayMode};
pub use types::{Config, ConfigError, OverlayConfig};
