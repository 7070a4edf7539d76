//! Trigger command configuration.

use serde::Deserialize;

/// Trigger command configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandConfig {
    /// Primary trigger (e.g. "!define"). Matched before any alias.
    pub trigger: String,
    /// Additional triggers, in precedence order. Blank entries are ignored.
    #[serde(default)]
    pub aliases: Vec<String>,
}
