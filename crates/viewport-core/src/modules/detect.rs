//! Breakpoint detection.
//!
//! Sources are consulted in a fixed order, first match wins:
//!
//! 1. cookie holding a configured breakpoint name
//! 2. CDN / edge device headers
//! 3. user-agent classification
//! 4. default breakpoint for the resolved device class
//! 5. fallback breakpoint
//!
//! Detection never fails: every internal error is logged and ends at the
//! fallback breakpoint.

use std::time::Duration;
use tracing::{debug, warn};
use viewport_types::{DetectError, DeviceClass, RequestHeaders, ViewportOptions};

use super::cookie::parse_cookie_header;
use super::headers::device_class_from_headers;
use super::logger::log_detection_fallback;
use super::user_agent::LazyClassifier;

/// Budget for loading the classifier and classifying one user agent.
pub const DEFAULT_CLASSIFIER_TIMEOUT: Duration = Duration::from_millis(250);

/// Request metadata available to the detector. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectInput {
    /// Value of the breakpoint cookie, if already extracted
    pub cookie: Option<String>,
    /// Request headers (server side)
    pub headers: Option<RequestHeaders>,
    /// User agent, overriding the `user-agent` header
    pub user_agent: Option<String>,
}

impl DetectInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookie = Some(cookie.into());
        self
    }

    pub fn with_headers(mut self, headers: RequestHeaders) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Explicit cookie value, else the named cookie from the `cookie` header.
    fn cookie_value(&self, cookie_name: &str) -> Option<String> {
        if let Some(cookie) = &self.cookie {
            return Some(cookie.clone());
        }
        let raw = self.headers.as_ref()?.get("cookie")?;
        parse_cookie_header(raw).remove(cookie_name)
    }

    /// Explicit user agent, else the `user-agent` header. Blank values count as absent.
    fn user_agent(&self) -> Option<&str> {
        self.user_agent
            .as_deref()
            .or_else(|| self.headers.as_ref().and_then(|headers| headers.get("user-agent")))
            .map(str::trim)
            .filter(|ua| !ua.is_empty())
    }
}

/// Resolves one breakpoint name per request.
pub struct BreakpointDetector {
    classifier: LazyClassifier,
    timeout: Duration,
}

impl BreakpointDetector {
    pub fn new(classifier: LazyClassifier) -> Self {
        Self { classifier, timeout: DEFAULT_CLASSIFIER_TIMEOUT }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Detect the breakpoint for `input`. Always returns a name; with validated
    /// options it is always a configured breakpoint.
    pub async fn detect(&self, options: &ViewportOptions, input: &DetectInput) -> String {
        if let Some(cookie) = input.cookie_value(&options.cookie.name) {
            if options.breakpoints.contains(&cookie) {
                debug!("[detect] using breakpoint from cookie: {}", cookie);
                return cookie;
            }
            debug!("[detect] ignoring unknown cookie breakpoint: {}", cookie);
        }

        match self.resolve_device(input).await {
            Ok(Some(device)) => match options.default_breakpoints.resolve(&device) {
                Some(breakpoint) if options.breakpoints.contains(breakpoint) => {
                    debug!("[detect] device {} maps to {}", device, breakpoint);
                    return breakpoint.to_string();
                }
                Some(breakpoint) => {
                    warn!("[detect] device {} maps to unknown breakpoint {}", device, breakpoint);
                }
                None => debug!("[detect] no default breakpoint for device {}", device),
            },
            Ok(None) => debug!("[detect] no device signal"),
            Err(e) => log_detection_fallback(&e, &options.fallback_breakpoint),
        }

        options.fallback_breakpoint.clone()
    }

    async fn resolve_device(
        &self,
        input: &DetectInput,
    ) -> Result<Option<DeviceClass>, DetectError> {
        if let Some(device) = input.headers.as_ref().and_then(device_class_from_headers) {
            return Ok(Some(device));
        }

        let Some(user_agent) = input.user_agent() else {
            return Ok(None);
        };

        let millis = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
        let classification = tokio::time::timeout(self.timeout, async {
            let classifier = self.classifier.get().await?;
            classifier.classify(user_agent).await
        })
        .await
        .map_err(|_| DetectError::Timeout { millis })??;

        Ok(classification.device_class)
    }
}

impl Default for BreakpointDetector {
    fn default() -> Self {
        Self::new(LazyClassifier::default())
    }
}

/// Detect with the built-in classifier and default timeout.
pub async fn detect_breakpoint(options: &ViewportOptions, input: &DetectInput) -> String {
    BreakpointDetector::default().detect(options, input).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::user_agent::{
        Classification, ClassifierLoader, StaticLoader, UserAgentClassifier,
    };
    use async_trait::async_trait;
    use std::sync::Arc;

    const DESKTOP_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";
    const PHONE_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_5 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.5 Mobile/15E148 Safari/604.1";

    fn headers(pairs: &[(&str, &str)]) -> RequestHeaders {
        pairs.iter().copied().collect()
    }

    struct FailingClassifier;

    #[async_trait]
    impl UserAgentClassifier for FailingClassifier {
        async fn classify(&self, _user_agent: &str) -> Result<Classification, DetectError> {
            Err(DetectError::ClassifierFailed { message: "parser exploded".to_string() })
        }
    }

    struct SlowClassifier;

    #[async_trait]
    impl UserAgentClassifier for SlowClassifier {
        async fn classify(&self, _user_agent: &str) -> Result<Classification, DetectError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(Classification { device_class: Some(DeviceClass::Mobile) })
        }
    }

    struct BrokenLoader;

    #[async_trait]
    impl ClassifierLoader for BrokenLoader {
        async fn load(&self) -> Result<Arc<dyn UserAgentClassifier>, DetectError> {
            Err(DetectError::ClassifierUnavailable { message: "chunk missing".to_string() })
        }
    }

    fn detector_with(classifier: Arc<dyn UserAgentClassifier>) -> BreakpointDetector {
        BreakpointDetector::new(LazyClassifier::new(StaticLoader::new(classifier)))
    }

    #[tokio::test]
    async fn test_cookie_wins_over_everything() {
        let options = ViewportOptions::default();
        let input = DetectInput::new()
            .with_cookie("tablet")
            .with_headers(headers(&[("cf-device-type", "mobile")]))
            .with_user_agent(DESKTOP_UA);

        assert_eq!(detect_breakpoint(&options, &input).await, "tablet");
    }

    #[tokio::test]
    async fn test_cookie_read_from_header() {
        let options = ViewportOptions::default();
        let input = DetectInput::new()
            .with_headers(headers(&[("cookie", "theme=dark; viewport=mobileWide")]));

        assert_eq!(detect_breakpoint(&options, &input).await, "mobileWide");
    }

    #[tokio::test]
    async fn test_unknown_cookie_is_ignored() {
        let options = ViewportOptions::default();
        let input = DetectInput::new().with_cookie("watch").with_user_agent(PHONE_UA);

        assert_eq!(detect_breakpoint(&options, &input).await, "mobile");
    }

    #[tokio::test]
    async fn test_header_hint_beats_user_agent() {
        let options = ViewportOptions::default();
        let input = DetectInput::new()
            .with_headers(headers(&[("cf-device-type", "mobile"), ("user-agent", DESKTOP_UA)]));

        assert_eq!(detect_breakpoint(&options, &input).await, "mobile");
    }

    #[tokio::test]
    async fn test_user_agent_from_header() {
        let options = ViewportOptions::default();
        let input = DetectInput::new().with_headers(headers(&[("User-Agent", PHONE_UA)]));

        assert_eq!(detect_breakpoint(&options, &input).await, "mobile");
    }

    #[tokio::test]
    async fn test_empty_input_returns_fallback() {
        let options = ViewportOptions::default();
        assert_eq!(detect_breakpoint(&options, &DetectInput::new()).await, "desktop");
    }

    #[tokio::test]
    async fn test_unmapped_device_returns_fallback() {
        let options = ViewportOptions {
            fallback_breakpoint: "tablet".to_string(),
            ..ViewportOptions::default()
        };
        let input = DetectInput::new().with_headers(headers(&[("cf-device-type", "tv")]));

        assert_eq!(detect_breakpoint(&options, &input).await, "tablet");
    }

    #[tokio::test]
    async fn test_classifier_error_returns_fallback() {
        let options = ViewportOptions::default();
        let detector = detector_with(Arc::new(FailingClassifier));
        let input = DetectInput::new().with_user_agent(PHONE_UA);

        assert_eq!(detector.detect(&options, &input).await, "desktop");
    }

    #[tokio::test]
    async fn test_loader_error_returns_fallback() {
        let options = ViewportOptions::default();
        let detector = BreakpointDetector::new(LazyClassifier::new(BrokenLoader));
        let input = DetectInput::new().with_user_agent(PHONE_UA);

        assert_eq!(detector.detect(&options, &input).await, "desktop");
    }

    #[tokio::test]
    async fn test_timeout_returns_fallback() {
        let options = ViewportOptions::default();
        let detector =
            detector_with(Arc::new(SlowClassifier)).with_timeout(Duration::from_millis(50));
        let input = DetectInput::new().with_user_agent(PHONE_UA);

        assert_eq!(detector.detect(&options, &input).await, "desktop");
    }

    #[tokio::test]
    async fn test_dangling_default_target_returns_fallback() {
        let mut options = ViewportOptions::default();
        options.default_breakpoints.insert("mobile", "watch");
        let input = DetectInput::new().with_user_agent(PHONE_UA);

        assert_eq!(detect_breakpoint(&options, &input).await, "desktop");
    }
}
