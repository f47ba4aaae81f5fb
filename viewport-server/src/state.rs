//! Application State
//!
//! Holds the active viewport options and the shared breakpoint detector.

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

use viewport_core::{BreakpointDetector, DetectInput, LazyClassifier, MediaQueries};
use viewport_types::ViewportOptions;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub(crate) inner: Arc<AppStateInner>,
}

pub struct AppStateInner {
    pub options: ViewportOptions,
    pub queries: MediaQueries,
    pub detector: BreakpointDetector,
}

impl AppState {
    /// Create AppState from options; fails if the options are invalid.
    pub fn new(options: ViewportOptions, classifier_timeout: Duration) -> Result<Self> {
        Self::new_with_detector(
            options,
            BreakpointDetector::new(LazyClassifier::default()).with_timeout(classifier_timeout),
        )
    }

    pub fn new_with_detector(
        options: ViewportOptions,
        detector: BreakpointDetector,
    ) -> Result<Self> {
        options.validate()?;
        let queries = viewport_core::build_queries(
            &options.breakpoints,
            options.feature,
            options.boundary_delta,
        );

        Ok(Self { inner: Arc::new(AppStateInner { options, queries, detector }) })
    }

    pub fn options(&self) -> &ViewportOptions {
        &self.inner.options
    }

    pub fn queries(&self) -> &MediaQueries {
        &self.inner.queries
    }

    pub async fn detect(&self, input: &DetectInput) -> String {
        self.inner.detector.detect(&self.inner.options, input).await
    }
}
