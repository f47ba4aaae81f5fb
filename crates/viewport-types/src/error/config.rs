//! Configuration-related errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating viewport options.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum ConfigError {
    /// The breakpoint table has no entries
    #[error("Breakpoint table is empty")]
    EmptyBreakpoints,

    /// A breakpoint was configured with a zero width
    #[error("Breakpoint {name} must have a positive width")]
    InvalidWidth {
        /// Name of the offending breakpoint
        name: String,
    },

    /// The fallback breakpoint is not part of the table
    #[error("Fallback breakpoint {name} is not a configured breakpoint")]
    UnknownFallback {
        /// Configured fallback name
        name: String,
    },

    /// A default breakpoint mapping points outside the table
    #[error("Default breakpoint for device {device} points to unknown breakpoint {breakpoint}")]
    UnknownDefaultTarget {
        /// Device class key in the default map
        device: String,
        /// Breakpoint name it maps to
        breakpoint: String,
    },

    /// Boundary delta is not a usable epsilon
    #[error("Boundary delta {value} must be finite and within (0, 1]")]
    InvalidBoundaryDelta {
        /// Rendered delta value
        value: String,
    },

    /// Cookie lifetime exceeds what browsers accept
    #[error("Cookie expiry of {days} days exceeds the {max} day limit")]
    InvalidCookieExpiry {
        /// Configured lifetime in days
        days: u32,
        /// Largest accepted lifetime in days
        max: u32,
    },

    /// Options file not found at expected path
    #[error("Config not found: {path}")]
    NotFound {
        /// Filesystem path where options were expected
        path: String,
    },

    /// Options file parse error
    #[error("Config parse error: {message}")]
    ParseError {
        /// Description of the parse failure
        message: String,
    },
}

impl ConfigError {
    /// Create a parse error from a serde_json error.
    pub fn from_json_error(e: &serde_json::Error) -> Self {
        Self::ParseError { message: e.to_string() }
    }
}
