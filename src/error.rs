//! Unified error handling for lexicard.
//!
//! Lookup errors are split into *rejections* (expected outcomes such as a
//! banned or unknown word) and *failures* (transport or decoding problems).
//! Both end a session cycle the same way: nothing is displayed and the busy
//! lock is released. The split decides log level and metric labels.

use thiserror::Error;

// ============================================================================
// Lookup Errors (content provider and filtering)
// ============================================================================

/// Errors that end a lookup without displaying anything.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("nothing to look up")]
    EmptyQuery,

    #[error("no entry found for '{0}'")]
    NotFound(String),

    #[error("'{0}' was banned by configuration")]
    BannedEntryWord(String),

    #[error("all meanings failed validation")]
    AllFiltered,

    #[error("invalid lookup url: {0}")]
    Url(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl LookupError {
    /// Get a static error code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyQuery => "empty_query",
            Self::NotFound(_) => "not_found",
            Self::BannedEntryWord(_) => "banned_entry_word",
            Self::AllFiltered => "all_filtered",
            Self::Url(_) => "url",
            Self::Http(_) => "http",
            Self::Status(_) => "status",
            Self::Decode(_) => "decode",
        }
    }

    /// Whether this is an expected, validation-driven rejection rather
    /// than an unexpected failure.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::EmptyQuery | Self::NotFound(_) | Self::BannedEntryWord(_) | Self::AllFiltered
        )
    }
}

// ============================================================================
// Chat Errors (IRC connection)
// ============================================================================

/// Errors that end a chat connection.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("connection failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("line codec error: {0}")]
    Codec(#[from] tokio_util::codec::LinesCodecError),

    #[error("server closed the connection")]
    Closed,
}
