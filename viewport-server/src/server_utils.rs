//! Signals that end `serve`.

use std::fmt;
use tokio::signal;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    Interrupt,
    Terminate,
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interrupt => write!(f, "Ctrl+C"),
            Self::Terminate => write!(f, "SIGTERM"),
        }
    }
}

async fn interrupt() -> ShutdownReason {
    if let Err(e) = signal::ctrl_c().await {
        warn!("[server] Ctrl+C handler unavailable: {}", e);
        std::future::pending::<()>().await;
    }
    ShutdownReason::Interrupt
}

#[cfg(unix)]
async fn terminate() -> ShutdownReason {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
        Ok(mut stream) => {
            stream.recv().await;
        }
        Err(e) => {
            warn!("[server] SIGTERM handler unavailable: {}", e);
            std::future::pending::<()>().await;
        }
    }
    ShutdownReason::Terminate
}

#[cfg(not(unix))]
async fn terminate() -> ShutdownReason {
    std::future::pending().await
}

/// Resolves on the first shutdown signal. A handler that cannot be installed
/// never fires.
pub async fn shutdown_signal() {
    let reason = tokio::select! {
        reason = interrupt() => reason,
        reason = terminate() => reason,
    };
    info!("[server] received {}, draining connections", reason);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_names_the_signal() {
        assert_eq!(ShutdownReason::Interrupt.to_string(), "Ctrl+C");
        assert_eq!(ShutdownReason::Terminate.to_string(), "SIGTERM");
    }
}
