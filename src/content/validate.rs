//! Meaning validation against banned words.

use regex::{Regex, RegexBuilder};

/// Decides whether a single meaning may be shown.
///
/// A meaning is valid when it is non-empty and, if banned words are
/// configured, contains none of them as a whole word (case-insensitive).
/// Matches inside longer words are ignored.
#[derive(Debug, Clone, Default)]
pub struct MeaningValidator {
    banned: Option<Regex>,
}

impl MeaningValidator {
    /// Build a validator from banned word pattern sources.
    ///
    /// Entries are trimmed and lower-cased; blank entries are ignored.
    pub fn new<S: AsRef<str>>(banned_words: &[S]) -> Result<Self, regex::Error> {
        let words: Vec<String> = banned_words
            .iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        if words.is_empty() {
            return Ok(Self::default());
        }

        let pattern = format!(r"\b({})\b", words.join("|"));
        let banned = RegexBuilder::new(&pattern).case_insensitive(true).build()?;
        Ok(Self {
            banned: Some(banned),
        })
    }

    /// Whether `text` may be displayed.
    pub fn is_valid(&self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        match &self.banned {
            Some(banned) => !banned.is_match(text),
            None => true,
        }
    }
}
