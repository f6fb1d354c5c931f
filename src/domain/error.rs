//! Error types for the SkillSearch widget.
//!
//! This module defines the centralized error type [`SkillSearchError`], the
//! [`FetchErrorKind`] taxonomy surfaced in result sets, and a [`Result`] alias
//! used throughout the crate. All errors are implemented with `thiserror`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classification of a failed remote call as seen by the widget.
///
/// Every kind is displayed to the user as a network error; the distinction is
/// kept for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchErrorKind {
    /// Transport failure or non-2xx status.
    Network,
    /// The response body was not the JSON shape we expected.
    Parse,
    /// The request exceeded the configured ceiling.
    Timeout,
}

impl std::fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Network => "network error",
            Self::Parse => "malformed response",
            Self::Timeout => "request timed out",
        };
        f.write_str(label)
    }
}

/// The main error type for SkillSearch operations.
///
/// Transport-level variants map onto [`FetchErrorKind`] through
/// [`SkillSearchError::kind`]; the remaining variants cover configuration,
/// filesystem and state machine misuse.
///
/// # Examples
///
/// ```
/// use skillsearch::{FetchErrorKind, SkillSearchError};
///
/// let err = SkillSearchError::Http { status: 503 };
/// assert_eq!(err.kind(), FetchErrorKind::Network);
/// ```
#[derive(Debug, Error)]
pub enum SkillSearchError {
    /// Transport failure before a response arrived.
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP error: status {status}")]
    Http {
        /// Status code returned by the server.
        status: u16,
    },

    /// The response body could not be decoded.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The request exceeded the configured ceiling.
    #[error("Request timed out")]
    Timeout,

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or unreadable.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An event does not apply to the filter editor's current state.
    #[error("Filter editor error: {0}")]
    Modal(String),
}

impl SkillSearchError {
    /// Folds this error into the user-facing fetch taxonomy.
    ///
    /// Non-transport variants are reported as [`FetchErrorKind::Network`] since
    /// they can only reach a result set through a failed remote call.
    #[must_use]
    pub const fn kind(&self) -> FetchErrorKind {
        match self {
            Self::Parse(_) => FetchErrorKind::Parse,
            Self::Timeout => FetchErrorKind::Timeout,
            _ => FetchErrorKind::Network,
        }
    }
}

impl From<reqwest::Error> for SkillSearchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Parse(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Http {
                status: status.as_u16(),
            }
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SkillSearchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// A specialized `Result` type for SkillSearch operations.
pub type Result<T> = std::result::Result<T, SkillSearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_errors_fold_into_kinds() {
        assert_eq!(SkillSearchError::Timeout.kind(), FetchErrorKind::Timeout);
        assert_eq!(
            SkillSearchError::Parse("eof".into()).kind(),
            FetchErrorKind::Parse
        );
        assert_eq!(
            SkillSearchError::Http { status: 500 }.kind(),
            FetchErrorKind::Network
        );
        assert_eq!(
            SkillSearchError::Network("reset".into()).kind(),
            FetchErrorKind::Network
        );
    }

    #[test]
    fn json_errors_become_parse_errors() {
        let err: SkillSearchError = serde_json::from_str::<Vec<u8>>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, SkillSearchError::Parse(_)));
    }
}
