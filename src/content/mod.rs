//! Content lookup, validation and limiting.
//!
//! A [`ContentProvider`] turns a query into a headline plus an ordered list
//! of [`ContentItem`]s. The session then runs the items through
//! [`filter_and_limit`] with the configured [`MeaningValidator`] and caps.

pub mod dictionary;
pub mod filter;
pub mod mock;
pub mod validate;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::LookupError;

pub use dictionary::DictionaryApi;
pub use filter::{ContentLimits, category_key, filter_and_limit};
pub use validate::MeaningValidator;

/// One displayable unit: a meaning and the part of speech it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentItem {
    pub category: String,
    pub text: String,
}

impl ContentItem {
    pub fn new(category: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            text: text.into(),
        }
    }
}

/// Entry word and pronunciation, shown alongside the first item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Headline {
    pub word: String,
    pub pronunciation: Option<String>,
}

/// Result of a successful provider call.
#[derive(Debug, Clone)]
pub struct Lookup {
    pub headline: Headline,
    pub items: Vec<ContentItem>,
}

/// External lookup service.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Look up `query`.
    ///
    /// Fails on transport errors, when nothing is found, and when a
    /// returned entry word is banned by configuration.
    async fn fetch(&self, query: &str) -> Result<Lookup, LookupError>;
}
