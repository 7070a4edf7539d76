//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::{Config, DisplayMode};
use crate::content::MeaningValidator;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("command.trigger is required")]
    MissingTrigger,
    #[error("access.cooldown_secs must be a finite number >= 0, got {0}")]
    InvalidCooldown(f64),
    #[error("display.dwell_secs must be a finite number > 0, got {0}")]
    InvalidDwell(f64),
    #[error("display.{0} must be a finite number >= 0, got {1}")]
    InvalidDuration(&'static str, f64),
    #[error("content.banned_words_in_meanings does not form a valid pattern: {0}")]
    InvalidBannedPattern(String),
    #[error("content.api_base is not a usable base url: {0}")]
    InvalidApiBase(String),
    #[error("chat.channel is required")]
    MissingChannel,
    #[error("chat.server must be host:port, got '{0}'")]
    InvalidChatServer(String),
    #[error("display.mode = \"chat\" requires a [chat] section with a token")]
    ChatModeWithoutLogin,
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.command.trigger.trim().is_empty() {
        errors.push(ValidationError::MissingTrigger);
    }

    let cooldown = config.access.cooldown_secs;
    if !cooldown.is_finite() || cooldown < 0.0 {
        errors.push(ValidationError::InvalidCooldown(cooldown));
    }

    // Timing
    let display = &config.display;
    if !display.dwell_secs.is_finite() || display.dwell_secs <= 0.0 {
        errors.push(ValidationError::InvalidDwell(display.dwell_secs));
    }
    for (field, value) in [
        ("transition_secs", display.transition_secs),
        ("in_secs", display.in_secs),
        ("out_secs", display.out_secs),
    ] {
        if !value.is_finite() || value < 0.0 {
            errors.push(ValidationError::InvalidDuration(field, value));
        }
    }

    // Content
    if let Err(e) = MeaningValidator::new(&config.content.banned_words_in_meanings) {
        errors.push(ValidationError::InvalidBannedPattern(e.to_string()));
    }
    match reqwest::Url::parse(&config.content.api_base) {
        Ok(url) if !url.cannot_be_a_base() => {}
        _ => errors.push(ValidationError::InvalidApiBase(
            config.content.api_base.clone(),
        )),
    }

    // Chat
    if let Some(ref chat) = config.chat {
        if chat.channel.trim().trim_start_matches('#').is_empty() {
            errors.push(ValidationError::MissingChannel);
        }
        let has_port = chat
            .server
            .rsplit_once(':')
            .is_some_and(|(host, port)| !host.is_empty() && port.parse::<u16>().is_ok());
        if !has_port {
            errors.push(ValidationError::InvalidChatServer(chat.server.clone()));
        }
    }
    if display.mode == DisplayMode::Chat
        && config.chat.as_ref().and_then(|c| c.token.as_ref()).is_none()
    {
        errors.push(ValidationError::ChatModeWithoutLogin);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_valid_config() -> String {
        r#"
[command]
trigger = "!define"
aliases = ["!def"]

[chat]
channel = "den"
"#
        .to_string()
    }

    #[test]
    fn test_valid_config_passes() {
        let config: Config = toml::from_str(&minimal_valid_config()).unwrap();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_blank_trigger_fails() {
        let config: Config = toml::from_str("[command]\ntrigger = \"  \"\n").unwrap();
        let errors = validate(&config).unwrap_err();
        assert!(errors.iter().any(|e| matches!(e, ValidationError::MissingTrigger)));
    }

    #[test]
    fn test_timing_errors_are_collected() {
        let toml = r#"
[command]
trigger = "!define"

[access]
cooldown_secs = -1.0

[display]
dwell_secs = 0.0
transition_secs = -0.5
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let errors = validate(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|e| matches!(e, ValidationError::InvalidCooldown(_))));
        assert!(errors.iter().any(|e| matches!(e, ValidationError::InvalidDwell(_))));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::InvalidDuration("transition_secs", _))));
    }

    #[test]
    fn test_broken_banned_pattern_fails() {
        let toml = r#"
[command]
trigger = "!define"

[content]
banned_words_in_meanings = ["(unclosed"]
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let errors = validate(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::InvalidBannedPattern(_))));
    }

    #[test]
    fn test_chat_section_checks() {
        let toml = r##"
[command]
trigger = "!define"

[chat]
channel = "#"
server = "irc.chat.twitch.tv"
"##;
        let config: Config = toml::from_str(toml).unwrap();
        let errors = validate(&config).unwrap_err();
        assert!(errors.iter().any(|e| matches!(e, ValidationError::MissingChannel)));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::InvalidChatServer(_))));
    }

    #[test]
    fn test_chat_mode_needs_token() {
        let toml = r#"
[command]
trigger = "!define"

[display]
mode = "chat"

[chat]
channel = "den"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let errors = validate(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::ChatModeWithoutLogin)));
    }
}
