//! Access control and cooldown configuration.

use serde::Deserialize;
use std::time::Duration;

/// Who may trigger a lookup besides the broadcaster and the allowlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PermissionLevel {
    /// Every chatter.
    Everyone,
    /// Moderators (and the broadcaster).
    #[default]
    Mods,
    /// Only the broadcaster and `allowed_users`.
    Broadcaster,
}

/// Access control configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessConfig {
    /// Permission level (default: mods).
    #[serde(default)]
    pub level: PermissionLevel,
    /// Users that may always trigger, regardless of level.
    #[serde(default)]
    pub allowed_users: Vec<String>,
    /// Users that are always ignored, even broadcaster or moderators.
    #[serde(default)]
    pub blocked_users: Vec<String>,
    /// Seconds between two successful lookups (default: 10).
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: f64,
    /// Whether a failed lookup also starts the cooldown (default: false).
    #[serde(default)]
    pub cooldown_on_failure: bool,
}

impl AccessConfig {
    /// Cooldown duration; invalid values collapse to zero.
    pub fn cooldown(&self) -> Duration {
        Duration::try_from_secs_f64(self.cooldown_secs).unwrap_or(Duration::ZERO)
    }
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            level: PermissionLevel::default(),
            allowed_users: Vec::new(),
            blocked_users: Vec::new(),
            cooldown_secs: default_cooldown_secs(),
            cooldown_on_failure: false,
        }
    }
}

fn default_cooldown_secs() -> f64 {
    10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_permission_levels() {
        let config: AccessConfig = toml::from_str("level = \"everyone\"").unwrap();
        assert_eq!(config.level, PermissionLevel::Everyone);
        let config: AccessConfig = toml::from_str("level = \"broadcaster\"").unwrap();
        assert_eq!(config.level, PermissionLevel::Broadcaster);
        assert!(toml::from_str::<AccessConfig>("level = \"vips\"").is_err());
    }

    #[test]
    fn default_values_are_correct() {
        let config = AccessConfig::default();
        assert_eq!(config.level, PermissionLevel::Mods);
        assert_eq!(config.cooldown(), Duration::from_secs(10));
        assert!(!config.cooldown_on_failure);
    }

    #[test]
    fn negative_cooldown_collapses_to_zero() {
        let config = AccessConfig {
            cooldown_secs: -3.0,
            ..AccessConfig::default()
        };
        assert_eq!(config.cooldown(), Duration::ZERO);
    }
}
