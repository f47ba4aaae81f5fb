//! Coarse device classes inferred from request metadata.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Device class produced by header hints or user-agent classification.
///
/// Unrecognized values are preserved in [`DeviceClass::Other`] so a
/// configuration can still map them through its default breakpoints.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum DeviceClass {
    Mobile,
    Tablet,
    Desktop,
    Tv,
    Bot,
    Other(String),
}

impl DeviceClass {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Mobile => "mobile",
            Self::Tablet => "tablet",
            Self::Desktop => "desktop",
            Self::Tv => "tv",
            Self::Bot => "bot",
            Self::Other(value) => value.as_str(),
        }
    }

    /// Parse a device class, normalizing case and surrounding whitespace.
    pub fn parse(value: &str) -> Self {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "mobile" => Self::Mobile,
            "tablet" => Self::Tablet,
            "desktop" => Self::Desktop,
            "tv" => Self::Tv,
            "bot" => Self::Bot,
            _ => Self::Other(normalized),
        }
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceClass {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<String> for DeviceClass {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<DeviceClass> for String {
    fn from(value: DeviceClass) -> Self {
        value.as_str().to_string()
    }
}
