//! Error types shared by the preference sync and the playlist player.

use thiserror::Error;

/// Everything that can go wrong while reading the page or rewriting URLs.
///
/// None of these reach the listener: handlers log them and leave the page as it was.
#[derive(Debug, Error)]
pub enum PlayerError {
    /// A URL could not be parsed as an absolute URL
    #[error("Invalid URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// A numeric control held something that is not an unsigned integer
    #[error("Invalid number for {key}: {value:?}")]
    InvalidNumber { key: &'static str, value: String },

    /// An element of the page contract is missing
    #[error("Missing element: {0}")]
    MissingElement(String),

    /// The embedded page configuration is not valid JSON
    #[error("Invalid page configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// A browser call failed
    #[error("DOM error: {0}")]
    Dom(String),
}

/// Result type for player and sync operations
pub type Result<T> = std::result::Result<T, PlayerError>;
