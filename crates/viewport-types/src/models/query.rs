//! Media-query ranges derived from a breakpoint table.

use serde::{Deserialize, Serialize};
use std::fmt;

/// CSS media feature used to build ranges.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum MediaFeature {
    /// Ascending boundaries: each breakpoint starts at its own width
    #[default]
    MinWidth,
    /// Descending boundaries: each breakpoint ends at its own width
    MaxWidth,
}

impl fmt::Display for MediaFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::MinWidth => write!(f, "minWidth"),
            Self::MaxWidth => write!(f, "maxWidth"),
        }
    }
}

/// One breakpoint's media query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MediaQueryRange {
    /// CSS media query, e.g. `(min-width: 768px) and (max-width: 1023.98px)`
    pub media_query: String,

    /// The breakpoint's configured width
    pub size: u32,
}
