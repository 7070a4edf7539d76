//! Content provider configuration.

use serde::Deserialize;
use std::time::Duration;

/// Dictionary provider and content validation configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentConfig {
    /// Base URL; the query is appended as one path segment.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Request timeout in seconds (default: 5).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Entry words that are never shown, including inflection redirects.
    #[serde(default)]
    pub banned_entry_words: Vec<String>,
    /// Whole words (pattern sources) that disqualify a single meaning.
    #[serde(default)]
    pub banned_words_in_meanings: Vec<String>,
}

impl ContentConfig {
    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            timeout_secs: default_timeout_secs(),
            banned_entry_words: Vec::new(),
            banned_words_in_meanings: Vec::new(),
        }
    }
}

fn default_api_base() -> String {
    "https://api.dictionaryapi.dev/api/v2/entries/en".to_string()
}

fn default_timeout_secs() -> u64 {
    5
}
