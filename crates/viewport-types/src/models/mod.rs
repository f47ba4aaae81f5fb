//! Core domain models for viewport breakpoints.
//!
//! This module contains all shared data structures used across the workspace.

mod breakpoint;
mod cookie;
mod device;
mod headers;
mod options;
mod query;

// Re-export all models
pub use breakpoint::{BreakpointTable, DefaultBreakpointsMap};
pub use cookie::{
    CookieOptions, CookieOptionsOverride, SameSite, COOKIE_EXPIRES_IN_DAYS,
    MAX_COOKIE_EXPIRES_IN_DAYS,
};
pub use device::DeviceClass;
pub use headers::RequestHeaders;
pub use options::{ViewportOptions, ViewportOptionsOverride, DEFAULT_BOUNDARY_DELTA};
pub use query::{MediaFeature, MediaQueryRange};
