//! Viewport Server - Headless Breakpoint Detection
//!
//! A pure Rust HTTP server that:
//! - Detects the breakpoint of each request from cookies, edge headers and the user agent
//! - Exposes the media queries and comparison results as JSON on /api/*
//! - Emits the breakpoint cookie when a client assigns a breakpoint
//!
//! Access via: http://localhost:8046

use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

mod api;
mod cli;
mod commands;
mod router;
mod server_utils;
mod state;
#[cfg(test)]
mod test_helpers;

use cli::{Cli, Commands};
use state::AppState;
use viewport_core::load_options_or_default;

fn init_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_target(false).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    if matches!(cli.command, Some(Commands::Validate)) {
        return commands::handle_validate(cli.config.as_deref());
    }

    let options = load_options_or_default(cli.config.as_deref())?;
    let classifier_timeout = Duration::from_millis(cli.classifier_timeout_ms);

    match cli.command {
        None => serve(options, cli.port, classifier_timeout).await,
        Some(Commands::Serve { port }) => serve(options, port, classifier_timeout).await,
        Some(Commands::Detect { user_agent, cookie, headers }) => {
            commands::handle_detect(&options, classifier_timeout, user_agent, cookie, &headers)
                .await
        }
        Some(Commands::Queries { json }) => commands::handle_queries(&options, json),
        Some(Commands::Validate) => Ok(()),
    }
}

async fn serve(
    options: viewport_types::ViewportOptions,
    port: u16,
    classifier_timeout: Duration,
) -> Result<()> {
    info!("Viewport Server starting on port {}...", port);
    info!(
        "{} breakpoints, fallback {}, feature {}",
        options.breakpoints.len(),
        options.fallback_breakpoint,
        options.feature
    );

    let state = AppState::new(options, classifier_timeout)?;
    let app = router::build_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("API available at http://localhost:{}/api/", port);

    axum::serve(listener, app).with_graceful_shutdown(server_utils::shutdown_signal()).await?;

    info!("Server stopped");
    Ok(())
}
