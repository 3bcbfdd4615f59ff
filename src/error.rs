//! Custom error types for orcid-works.
//!
//! This module defines all error types used throughout the library.
//! A field missing from a registry document is never an error: extraction
//! substitutes an empty value instead.

use thiserror::Error;

/// Main error type for orcid-works operations.
///
/// Uses `thiserror` for ergonomic error handling and automatic `Display` implementation.
#[derive(Debug, Error)]
pub enum OrcidError {
    /// Registry returned JSON that is not an object
    #[error("Invalid response shape for {orcid}: expected a JSON object, got {kind}")]
    InvalidResponseShape {
        /// Identifier that was looked up
        orcid: String,
        /// JSON kind actually received (array, string, null, ...)
        kind: &'static str,
    },

    /// Transport or HTTP-level failure reaching the registry
    #[error("Lookup failed for {orcid}: {reason}")]
    LookupFailed {
        /// Identifier that was looked up
        orcid: String,
        /// Human readable cause
        reason: String,
    },

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),
}

impl OrcidError {
    /// Identifier the error is attached to, if it is a per-identifier failure.
    pub fn orcid(&self) -> Option<&str> {
        match self {
            Self::InvalidResponseShape { orcid, .. } | Self::LookupFailed { orcid, .. } => {
                Some(orcid)
            }
            _ => None,
        }
    }

    pub(crate) fn lookup_failed(orcid: &str, reason: impl std::fmt::Display) -> Self {
        Self::LookupFailed {
            orcid: orcid.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Result type alias using `OrcidError`
pub type Result<T> = std::result::Result<T, OrcidError>;
