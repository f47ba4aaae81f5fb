//! Logging helpers for outcomes that are recovered rather than returned.

use tracing::{debug, warn};
use viewport_types::{CookieError, DetectError};

/// Detection error turned into the fallback breakpoint.
pub(crate) fn log_detection_fallback(error: &DetectError, fallback: &str) {
    warn!("[detect] falling back to {} after error: {}", fallback, error);
}

/// Cookie write or removal refused by the store; state has already changed.
pub(crate) fn log_persistence_skipped(operation: &str, error: &CookieError) {
    match error {
        CookieError::Unavailable { .. } => {
            debug!("[viewport] cookie {} skipped: {}", operation, error);
        }
        CookieError::Rejected { .. } | CookieError::InvalidName { .. } => {
            warn!("[viewport] cookie {} rejected: {}", operation, error);
        }
    }
}
