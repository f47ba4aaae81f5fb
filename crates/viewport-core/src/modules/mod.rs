//! Breakpoint detection, media queries, cookie persistence and the viewport manager.

pub mod binder;
pub mod config;
pub mod cookie;
pub mod detect;
pub mod headers;
pub(crate) mod logger;
pub mod manager;
pub mod queries;
pub mod user_agent;
