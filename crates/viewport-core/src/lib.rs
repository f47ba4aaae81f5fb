//! # Viewport Core
//!
//! Breakpoint detection and reactive breakpoint state.
//!
//! ## Architecture
//!
//! ```text
//!   request headers / cookie / user agent
//!                  │
//!                  ▼
//!   modules/detect.rs      BreakpointDetector (cookie → edge headers → UA → default → fallback)
//!                  │ initial breakpoint
//!                  ▼
//!   modules/manager.rs     ViewportManager ── Observable<String> state
//!        │         │                      └─ Computed<MediaQueries> (modules/queries.rs)
//!        │         ▼
//!        │   modules/cookie.rs   CookieStore (memory / response jar)
//!        ▲
//!   modules/binder.rs      media-query listeners (client only)
//! ```
//!
//! `reactive/` holds the single-threaded observable primitives the manager is
//! built on. Detection is async and `Send`; the manager is not.

#![cfg_attr(
    test,
    allow(clippy::panic, clippy::float_cmp, clippy::assertions_on_result_states)
)]

pub mod modules;
pub mod reactive;

// Re-export commonly used types
pub use modules::binder::{
    bind_media_queries, BinderGuard, ExecutionEnvironment, ListenerId, MediaListener,
    MediaQueryList, MediaQuerySource,
};
pub use modules::config::{extend_options, load_options, load_options_or_default, parse_options};
pub use modules::cookie::{
    parse_cookie_header, render_set_cookie, CookieStore, MemoryCookieStore, ResponseCookieJar,
};
pub use modules::detect::{detect_breakpoint, BreakpointDetector, DetectInput};
pub use modules::headers::{device_class_from_headers, is_device_hint_header};
pub use modules::manager::{create_viewport_manager, ViewportManager, ViewportManagerBuilder};
pub use modules::queries::{build_queries, MediaQueries};
pub use modules::user_agent::{
    Classification, ClassifierLoader, LazyClassifier, RegexClassifier, UserAgentClassifier,
};
