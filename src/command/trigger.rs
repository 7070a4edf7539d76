//! Trigger phrase matching.

use crate::config::CommandConfig;

/// Delimiter appended to every phrase so a match always ends at a
/// parameter boundary. Chat platforms trim trailing whitespace, so a bare
/// command without a parameter never matches.
const DELIMITER: char = ' ';

/// A successful match against a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerMatch<'t> {
    /// Position of the matched phrase in precedence order (0 = primary).
    pub index: usize,
    /// Message text after the phrase, original case preserved.
    pub remainder: &'t str,
}

/// Ordered set of lower-cased trigger phrases, each ending in the delimiter.
#[derive(Debug, Clone)]
pub struct TriggerSet {
    phrases: Vec<String>,
    /// Length (in chars) of the longest phrase.
    max_len: usize,
}

impl TriggerSet {
    /// Build a set from a primary trigger and its aliases. Every entry,
    /// the primary included, is trimmed; blank entries are dropped; order
    /// is precedence.
    pub fn new<I, S>(primary: &str, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrases: Vec<String> = std::iter::once(primary.to_string())
            .chain(aliases.into_iter().map(|s| s.as_ref().to_string()))
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .map(|mut s| {
                s.push(DELIMITER);
                s
            })
            .collect();
        let max_len = phrases
            .iter()
            .map(|p| p.chars().count())
            .max()
            .unwrap_or(0);
        Self { phrases, max_len }
    }

    /// Build the set from the `[command]` section.
    pub fn from_config(config: &CommandConfig) -> Self {
        Self::new(&config.trigger, &config.aliases)
    }

    /// Configured phrases in precedence order, delimiter included.
    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    /// Match the start of `text` against the phrases.
    ///
    /// Only the leading `max_len` characters are lower-cased and compared.
    /// The first phrase in configured order wins.
    pub fn find<'t>(&self, text: &'t str) -> Option<TriggerMatch<'t>> {
        if self.phrases.is_empty() {
            return None;
        }
        let head: String = text.chars().take(self.max_len).collect::<String>().to_lowercase();
        let (index, phrase) = self
            .phrases
            .iter()
            .enumerate()
            .find(|(_, phrase)| head.starts_with(phrase.as_str()))?;

        let skip = phrase.chars().count();
        let remainder = text
            .char_indices()
            .nth(skip)
            .map_or("", |(offset, _)| &text[offset..]);
        Some(TriggerMatch { index, remainder })
    }
}
