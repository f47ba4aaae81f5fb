//! Typed error definitions for viewport detection.
//!
//! This module provides a structured error hierarchy with specific error types
//! for different domains. All errors are designed to be:
//!
//! - **Serializable** for API responses via serde
//! - **Displayable** for logging via Display trait
//! - **Matchable** for error handling logic via enum variants

mod config;
mod cookie;
mod detect;

pub use config::ConfigError;
pub use cookie::CookieError;
pub use detect::DetectError;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let err = ConfigError::UnknownFallback { name: "huge".to_string() };

        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["type"], "UnknownFallback");
        assert_eq!(json["details"]["name"], "huge");

        let deserialized: ConfigError = serde_json::from_value(json).unwrap();
        assert_eq!(err, deserialized);
    }

    #[test]
    fn test_error_display() {
        let err = DetectError::Timeout { millis: 250 };

        let msg = format!("{}", err);
        assert!(msg.contains("250"));
    }
}
