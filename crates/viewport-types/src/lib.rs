//! # Viewport Types
//!
//! Core types, models, and error definitions for viewport breakpoint detection.
//!
//! This crate provides the foundational type system for the viewport workspace:
//!
//! - **`error`** - Typed error hierarchy for configuration, detection, and cookies
//! - **`models`** - Domain models (BreakpointTable, ViewportOptions, CookieOptions)
//!
//! ## Architecture Role
//!
//! `viewport-types` sits at the bottom of the dependency graph:
//!
//! ```text
//!         viewport-types (this crate)
//!                 │
//!                 ▼
//!          viewport-core
//!                 │
//!                 ▼
//!         viewport-server
//! ```
//!
//! All types are designed to be:
//! - **Serializable** via serde for API and config files
//! - **Clone** for cheap sharing between managers and requests
//! - **PartialEq** for testing and comparison

pub mod error;
pub mod models;

// Re-export error types for convenience
pub use error::{ConfigError, CookieError, DetectError};

// Re-export core model types
pub use models::{
    BreakpointTable, CookieOptions, CookieOptionsOverride, DefaultBreakpointsMap, DeviceClass,
    MediaFeature, MediaQueryRange, RequestHeaders, SameSite, ViewportOptions,
    ViewportOptionsOverride, DEFAULT_BOUNDARY_DELTA,
};
