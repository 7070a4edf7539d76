//! dictionaryapi.dev content provider.
//!
//! Queries `GET {api_base}/{word}` and flattens every meaning's definitions
//! into [`ContentItem`]s, part of speech as category. Entry words are
//! checked against the banned list for every returned entry, so redirects
//! from inflections are caught as well.

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use std::collections::HashSet;
use tracing::{debug, info};

use super::{ContentItem, ContentProvider, Headline, Lookup};
use crate::config::ContentConfig;
use crate::error::LookupError;

#[derive(Debug, Deserialize)]
struct ApiEntry {
    word: String,
    #[serde(default)]
    phonetic: Option<String>,
    #[serde(default)]
    phonetics: Vec<ApiPhonetic>,
    #[serde(default)]
    meanings: Vec<ApiMeaning>,
}

#[derive(Debug, Deserialize)]
struct ApiPhonetic {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiMeaning {
    #[serde(rename = "partOfSpeech", default)]
    part_of_speech: String,
    #[serde(default)]
    definitions: Vec<ApiDefinition>,
}

#[derive(Debug, Deserialize)]
struct ApiDefinition {
    #[serde(default)]
    definition: String,
}

/// HTTP client for the free dictionary API.
pub struct DictionaryApi {
    client: reqwest::Client,
    base: Url,
    banned_entry_words: HashSet<String>,
}

impl DictionaryApi {
    /// Create a client from the `[content]` section.
    pub fn new(config: &ContentConfig) -> Result<Self, LookupError> {
        let base = Url::parse(&config.api_base)
            .map_err(|e| LookupError::Url(format!("{}: {}", config.api_base, e)))?;
        if base.cannot_be_a_base() {
            return Err(LookupError::Url(config.api_base.clone()));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("lexicard/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        let banned_entry_words = config
            .banned_entry_words
            .iter()
            .map(|w| w.trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();

        info!(base = %base, timeout = ?config.timeout(), "Dictionary provider initialized");

        Ok(Self {
            client,
            base,
            banned_entry_words,
        })
    }

    fn entry_url(&self, query: &str) -> Result<Url, LookupError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| LookupError::Url(self.base.to_string()))?
            .pop_if_empty()
            .push(query);
        Ok(url)
    }

    fn is_banned(&self, word: &str) -> bool {
        self.banned_entry_words.contains(&word.to_lowercase())
    }

    fn collect(&self, query: &str, entries: Vec<ApiEntry>) -> Result<Lookup, LookupError> {
        let Some(first) = entries.first() else {
            return Err(LookupError::NotFound(query.to_string()));
        };
        let headline = Headline {
            word: first.word.clone(),
            pronunciation: first
                .phonetic
                .clone()
                .filter(|p| !p.is_empty())
                .or_else(|| {
                    first
                        .phonetics
                        .iter()
                        .filter_map(|p| p.text.clone())
                        .find(|t| !t.is_empty())
                }),
        };

        let mut items = Vec::new();
        for entry in entries {
            if self.is_banned(&entry.word) {
                return Err(LookupError::BannedEntryWord(entry.word));
            }
            for meaning in entry.meanings {
                for definition in meaning.definitions {
                    items.push(ContentItem::new(
                        meaning.part_of_speech.clone(),
                        definition.definition,
                    ));
                }
            }
        }

        Ok(Lookup { headline, items })
    }
}

#[async_trait]
impl ContentProvider for DictionaryApi {
    fn name(&self) -> &'static str {
        "dictionaryapi"
    }

    async fn fetch(&self, query: &str) -> Result<Lookup, LookupError> {
        let url = self.entry_url(query)?;
        debug!(url = %url, "Dictionary lookup");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound(query.to_string()));
        }
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let entries: Vec<ApiEntry> = serde_json::from_str(&body)?;
        self.collect(query, entries)
    }
}
