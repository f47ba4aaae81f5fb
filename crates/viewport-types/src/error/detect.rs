//! Detection errors.
//!
//! These never reach callers of the detector; they are logged and replaced by
//! the fallback breakpoint.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Internal failures while classifying a request.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum DetectError {
    /// The user-agent classifier could not be loaded
    #[error("User-agent classifier unavailable: {message}")]
    ClassifierUnavailable {
        /// Loader failure description
        message: String,
    },

    /// The classifier raised while parsing a user agent
    #[error("User-agent classification failed: {message}")]
    ClassifierFailed {
        /// Classifier failure description
        message: String,
    },

    /// Loading or classification exceeded the configured budget
    #[error("User-agent classification timed out after {millis}ms")]
    Timeout {
        /// Timeout that elapsed, in milliseconds
        millis: u64,
    },
}
