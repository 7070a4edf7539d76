//! Display configuration: presentation mode, rotation timing and content caps.

use serde::Deserialize;
use std::num::NonZeroUsize;
use std::time::Duration;

/// Where looked-up content goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Rotate every item on the overlay.
    #[default]
    Overlay,
    /// Reply with the first item in chat.
    Chat,
}

/// Display configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Presentation mode (default: overlay).
    #[serde(default)]
    pub mode: DisplayMode,
    /// Seconds each meaning stays on screen (default: 8).
    #[serde(default = "default_dwell_secs")]
    pub dwell_secs: f64,
    /// Seconds for one half of a meaning swap (collapse or expand, default: 0.4).
    #[serde(default = "default_transition_secs")]
    pub transition_secs: f64,
    /// Entrance animation name forwarded to the overlay (default: "fadeIn").
    #[serde(default = "default_in_animation")]
    pub in_animation: String,
    /// Entrance animation length in seconds (default: 1).
    #[serde(default = "default_animation_secs")]
    pub in_secs: f64,
    /// Exit animation name forwarded to the overlay (default: "fadeOut").
    #[serde(default = "default_out_animation")]
    pub out_animation: String,
    /// Exit animation length in seconds (default: 1).
    #[serde(default = "default_animation_secs")]
    pub out_secs: f64,
    /// Distinct parts of speech shown per lookup, 0 for unbounded (default: 3).
    #[serde(default = "default_max_categories")]
    pub max_categories: usize,
    /// Meanings shown per part of speech, 0 for unbounded (default: 2).
    #[serde(default = "default_max_per_category")]
    pub max_per_category: usize,
    /// Show a mock-up entry at startup (default: false).
    #[serde(default)]
    pub test_mode: bool,
}

impl DisplayConfig {
    /// Time a single meaning is displayed.
    pub fn dwell(&self) -> Duration {
        secs(self.dwell_secs)
    }

    /// Time budgeted for a whole swap: collapse plus expand.
    pub fn transition(&self) -> Duration {
        secs(self.transition_secs).saturating_mul(2)
    }

    /// Time budgeted for one half of a swap.
    pub fn half_transition(&self) -> Duration {
        secs(self.transition_secs)
    }

    /// Entrance animation length.
    pub fn in_duration(&self) -> Duration {
        secs(self.in_secs)
    }

    /// Exit animation length.
    pub fn out_duration(&self) -> Duration {
        secs(self.out_secs)
    }

    /// Category cap; `None` means unbounded.
    pub fn category_limit(&self) -> Option<NonZeroUsize> {
        NonZeroUsize::new(self.max_categories)
    }

    /// Per-category cap; `None` means unbounded.
    pub fn per_category_limit(&self) -> Option<NonZeroUsize> {
        NonZeroUsize::new(self.max_per_category)
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            mode: DisplayMode::default(),
            dwell_secs: default_dwell_secs(),
            transition_secs: default_transition_secs(),
            in_animation: default_in_animation(),
            in_secs: default_animation_secs(),
            out_animation: default_out_animation(),
            out_secs: default_animation_secs(),
            max_categories: default_max_categories(),
            max_per_category: default_max_per_category(),
            test_mode: false,
        }
    }
}

fn secs(value: f64) -> Duration {
    Duration::try_from_secs_f64(value).unwrap_or(Duration::ZERO)
}

fn default_dwell_secs() -> f64 {
    8.0
}

fn default_transition_secs() -> f64 {
    0.4
}

fn default_in_animation() -> String {
    "fadeIn".to_string()
}

fn default_out_animation() -> String {
    "fadeOut".to_string()
}

fn default_animation_secs() -> f64 {
    1.0
}

fn default_max_categories() -> usize {
    3
}

fn default_max_per_category() -> usize {
    2
}
