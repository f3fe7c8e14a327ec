// Fatal errors surfaced by the refresh loop

use thiserror::Error;

/// Errors that end monitoring. Per-group sampling failures are not errors; they
/// travel inside the snapshot as `Reading::Unavailable`.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("metrics source unavailable: {0}")]
    SourceUnavailable(String),
    #[error("terminal I/O failed: {0}")]
    Terminal(#[from] std::io::Error),
}
