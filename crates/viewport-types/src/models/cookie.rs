//! Cookie options for persisting the chosen breakpoint.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default cookie lifetime.
pub const COOKIE_EXPIRES_IN_DAYS: u32 = 365;

/// Longest lifetime browsers honor; larger `Max-Age` values are clamped.
pub const MAX_COOKIE_EXPIRES_IN_DAYS: u32 = 400;

/// SameSite cookie attribute.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SameSite {
    #[default]
    #[serde(alias = "strict")]
    Strict,
    #[serde(alias = "lax")]
    Lax,
    #[serde(alias = "none")]
    None,
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Strict => write!(f, "Strict"),
            Self::Lax => write!(f, "Lax"),
            Self::None => write!(f, "None"),
        }
    }
}

/// Options passed through to the cookie write.
///
/// An empty `name` disables persistence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CookieOptions {
    /// Cookie name
    #[serde(default)]
    pub name: String,

    /// Lifetime in days; `None` makes a session cookie
    #[serde(default, rename = "expires")]
    pub expires_days: Option<u32>,

    /// Cookie path
    #[serde(default)]
    pub path: Option<String>,

    /// Cookie domain
    #[serde(default)]
    pub domain: Option<String>,

    /// SameSite policy
    #[serde(default)]
    pub same_site: Option<SameSite>,

    /// Only send over HTTPS
    #[serde(default)]
    pub secure: bool,
}

impl CookieOptions {
    /// Whether writes should happen at all.
    pub fn is_enabled(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// Apply the fields present in `patch`.
    pub fn merged(&self, patch: &CookieOptionsOverride) -> Self {
        Self {
            name: patch.name.clone().unwrap_or_else(|| self.name.clone()),
            expires_days: patch.expires_days.or(self.expires_days),
            path: patch.path.clone().or_else(|| self.path.clone()),
            domain: patch.domain.clone().or_else(|| self.domain.clone()),
            same_site: patch.same_site.or(self.same_site),
            secure: patch.secure.unwrap_or(self.secure),
        }
    }
}

impl Default for CookieOptions {
    fn default() -> Self {
        Self {
            name: "viewport".to_string(),
            expires_days: Some(COOKIE_EXPIRES_IN_DAYS),
            path: Some("/".to_string()),
            domain: None,
            same_site: Some(SameSite::Strict),
            secure: true,
        }
    }
}

/// Partial cookie options, merged field by field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CookieOptionsOverride {
    pub name: Option<String>,
    #[serde(rename = "expires")]
    pub expires_days: Option<u32>,
    pub path: Option<String>,
    pub domain: Option<String>,
    pub same_site: Option<SameSite>,
    pub secure: Option<bool>,
}
