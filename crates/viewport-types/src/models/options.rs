//! Viewport options: breakpoint table, detection defaults and cookie settings.

use serde::{Deserialize, Serialize};

use super::breakpoint::{BreakpointTable, DefaultBreakpointsMap};
use super::cookie::{CookieOptions, CookieOptionsOverride, MAX_COOKIE_EXPIRES_IN_DAYS};
use super::query::MediaFeature;
use crate::error::ConfigError;

/// Epsilon kept between adjacent ranges.
///
/// Avoids double matches at exact pixel boundaries under fractional OS UI
/// scaling.
pub const DEFAULT_BOUNDARY_DELTA: f64 = 0.02;

fn default_boundary_delta() -> f64 {
    DEFAULT_BOUNDARY_DELTA
}

/// Full viewport configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ViewportOptions {
    /// Breakpoint name to pixel width
    pub breakpoints: BreakpointTable,

    /// Cookie used to persist the chosen breakpoint
    #[serde(default)]
    pub cookie: CookieOptions,

    /// Device class to breakpoint, used by auto detection.
    ///
    /// Known devices: "bot", "desktop", "mobile", "tablet", "tv".
    #[serde(default)]
    pub default_breakpoints: DefaultBreakpointsMap,

    /// Breakpoint used when nothing else resolves
    pub fallback_breakpoint: String,

    /// CSS media feature
    #[serde(default)]
    pub feature: MediaFeature,

    /// Gap between adjacent range boundaries, in px
    #[serde(default = "default_boundary_delta")]
    pub boundary_delta: f64,
}

impl ViewportOptions {
    /// Check the invariants the manager and detector rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.breakpoints.is_empty() {
            return Err(ConfigError::EmptyBreakpoints);
        }

        if let Some((name, _)) = self.breakpoints.iter().find(|(_, width)| *width == 0) {
            return Err(ConfigError::InvalidWidth { name: name.to_string() });
        }

        if !self.breakpoints.contains(&self.fallback_breakpoint) {
            return Err(ConfigError::UnknownFallback { name: self.fallback_breakpoint.clone() });
        }

        if let Some((device, breakpoint)) =
            self.default_breakpoints.iter().find(|(_, bp)| !self.breakpoints.contains(bp))
        {
            return Err(ConfigError::UnknownDefaultTarget {
                device: device.to_string(),
                breakpoint: breakpoint.to_string(),
            });
        }

        let delta = self.boundary_delta;
        if !delta.is_finite() || delta <= 0.0 || delta > 1.0 {
            return Err(ConfigError::InvalidBoundaryDelta { value: delta.to_string() });
        }

        if let Some(days) = self.cookie.expires_days.filter(|d| *d > MAX_COOKIE_EXPIRES_IN_DAYS) {
            return Err(ConfigError::InvalidCookieExpiry { days, max: MAX_COOKIE_EXPIRES_IN_DAYS });
        }

        Ok(())
    }

    /// Return a copy with `patch` applied.
    ///
    /// Present top-level fields replace the current ones; `cookie` is merged
    /// field by field.
    pub fn extend(&self, patch: &ViewportOptionsOverride) -> Self {
        Self {
            breakpoints: patch.breakpoints.clone().unwrap_or_else(|| self.breakpoints.clone()),
            cookie: match &patch.cookie {
                Some(cookie) => self.cookie.merged(cookie),
                None => self.cookie.clone(),
            },
            default_breakpoints: patch
                .default_breakpoints
                .clone()
                .unwrap_or_else(|| self.default_breakpoints.clone()),
            fallback_breakpoint: patch
                .fallback_breakpoint
                .clone()
                .unwrap_or_else(|| self.fallback_breakpoint.clone()),
            feature: patch.feature.unwrap_or(self.feature),
            boundary_delta: patch.boundary_delta.unwrap_or(self.boundary_delta),
        }
    }
}

impl Default for ViewportOptions {
    fn default() -> Self {
        Self {
            breakpoints: [
                ("desktop", 1024),
                ("desktopMedium", 1280),
                ("desktopWide", 1600),
                ("mobile", 320),
                ("mobileMedium", 375),
                ("mobileWide", 425),
                ("tablet", 768),
            ]
            .into_iter()
            .collect(),
            cookie: CookieOptions::default(),
            default_breakpoints: [
                ("desktop", "desktop"),
                ("mobile", "mobile"),
                ("tablet", "tablet"),
            ]
            .into_iter()
            .collect(),
            fallback_breakpoint: "desktop".to_string(),
            feature: MediaFeature::MinWidth,
            boundary_delta: DEFAULT_BOUNDARY_DELTA,
        }
    }
}

/// Partial options document (config file or per-route override).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ViewportOptionsOverride {
    pub breakpoints: Option<BreakpointTable>,
    pub cookie: Option<CookieOptionsOverride>,
    pub default_breakpoints: Option<DefaultBreakpointsMap>,
    pub fallback_breakpoint: Option<String>,
    pub feature: Option<MediaFeature>,
    pub boundary_delta: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(ViewportOptions::default().validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_empty_table() {
        let options =
            ViewportOptions { breakpoints: BreakpointTable::new(), ..ViewportOptions::default() };
        assert_eq!(options.validate(), Err(ConfigError::EmptyBreakpoints));
    }

    #[test]
    fn test_validate_rejects_unknown_fallback() {
        let options = ViewportOptions {
            fallback_breakpoint: "watch".to_string(),
            ..ViewportOptions::default()
        };
        assert_eq!(
            options.validate(),
            Err(ConfigError::UnknownFallback { name: "watch".to_string() })
        );
    }

    #[test]
    fn test_validate_rejects_zero_width() {
        let mut options = ViewportOptions::default();
        options.breakpoints.insert("nothing", 0);
        assert_eq!(
            options.validate(),
            Err(ConfigError::InvalidWidth { name: "nothing".to_string() })
        );
    }

    #[test]
    fn test_validate_rejects_dangling_default() {
        let mut options = ViewportOptions::default();
        options.default_breakpoints.insert("tv", "cinema");
        assert!(matches!(
            options.validate(),
            Err(ConfigError::UnknownDefaultTarget { ref device, .. }) if device == "tv"
        ));
    }

    #[test]
    fn test_validate_rejects_bad_delta() {
        for delta in [0.0, -1.0, 2.0, f64::NAN] {
            let options = ViewportOptions { boundary_delta: delta, ..ViewportOptions::default() };
            assert!(matches!(options.validate(), Err(ConfigError::InvalidBoundaryDelta { .. })));
        }
    }

    #[test]
    fn test_validate_bounds_cookie_expiry() {
        let mut options = ViewportOptions::default();
        options.cookie.expires_days = Some(MAX_COOKIE_EXPIRES_IN_DAYS);
        assert_eq!(options.validate(), Ok(()));

        options.cookie.expires_days = Some(u32::MAX);
        assert_eq!(
            options.validate(),
            Err(ConfigError::InvalidCookieExpiry { days: u32::MAX, max: 400 })
        );
    }

    #[test]
    fn test_extend_merges_cookie_fieldwise() {
        let patch: ViewportOptionsOverride = serde_json::from_str(
            r#"{"fallbackBreakpoint":"mobile","feature":"maxWidth","cookie":{"name":"bp"}}"#,
        )
        .unwrap();

        let extended = ViewportOptions::default().extend(&patch);

        assert_eq!(extended.fallback_breakpoint, "mobile");
        assert_eq!(extended.feature, MediaFeature::MaxWidth);
        assert_eq!(extended.cookie.name, "bp");
        assert_eq!(extended.cookie.path.as_deref(), Some("/"));
        assert_eq!(extended.breakpoints, ViewportOptions::default().breakpoints);
    }

    #[test]
    fn test_extend_replaces_table_wholesale() {
        let patch = ViewportOptionsOverride {
            breakpoints: Some([("sm", 1), ("lg", 900)].into_iter().collect()),
            ..ViewportOptionsOverride::default()
        };
        let extended = ViewportOptions::default().extend(&patch);
        assert_eq!(extended.breakpoints.len(), 2);
        assert!(!extended.breakpoints.contains("desktop"));
    }

    #[test]
    fn test_options_wire_format() {
        let json = serde_json::to_value(ViewportOptions::default()).unwrap();
        assert_eq!(json["fallbackBreakpoint"], "desktop");
        assert_eq!(json["feature"], "minWidth");
        assert_eq!(json["cookie"]["sameSite"], "Strict");
        assert_eq!(json["cookie"]["expires"], 365);
    }
}
