//! Cookie persistence errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reported by a cookie store.
///
/// Managers treat every variant as best-effort: the breakpoint state update
/// still succeeds.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum CookieError {
    /// No cookie storage is reachable from this context
    #[error("Cookie storage unavailable: {message}")]
    Unavailable {
        /// Why storage is not reachable
        message: String,
    },

    /// The store refused the write
    #[error("Cookie {name} rejected: {message}")]
    Rejected {
        /// Cookie name
        name: String,
        /// Rejection reason
        message: String,
    },

    /// Cookie names must be non-empty tokens
    #[error("Invalid cookie name: {name:?}")]
    InvalidName {
        /// The offending name
        name: String,
    },
}
