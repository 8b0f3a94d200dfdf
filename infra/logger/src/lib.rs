//! # Logger
//!
//! Installs the process-wide `tracing` subscriber of BoxDraft binaries.
//!
//! * Compact, colored console output on stderr.
//! * Optional rolling log files fed by a non-blocking worker, as plain text or JSON.
//! * A default level plus module directives (e.g., `"boxdraft_registry=debug"`); `RUST_LOG` is
//!   read when no directives are given.
//!
//! The `[logging]` config section maps onto the builder through [`LoggerBuilder::apply`].
//!
//! ## Example
//!
//! ```rust
//! # use boxdraft_logger::{Logger, LevelFilter};
//!
//! let _logger = Logger::builder()
//!     .name("boxdraft")
//!     .console(true)
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

mod builder;
mod error;
mod layers;

pub use crate::builder::{LoggerBuilder, Named, Unnamed};
pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use tracing_appender::non_blocking::WorkerGuard;

/// Handle of the installed subscriber.
///
/// Owns the worker guard of the file writer. Keep it alive until shutdown; dropping it flushes
/// what is still buffered.
#[must_use = "Dropping this handle stops the background log writer"]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    pub(crate) const fn new(guard: Option<WorkerGuard>) -> Self {
        Self { guard }
    }

    /// `true` when records also go to rolling files.
    #[must_use]
    pub const fn writes_files(&self) -> bool {
        self.guard.is_some()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::info!("Flushing log files");
        }
    }
}

/// Parses a level name such as `"info"` or `"DEBUG"`; `"off"` silences everything.
///
/// # Errors
/// [`LoggerError::InvalidConfiguration`] for unknown names.
pub fn parse_level(level: &str) -> Result<LevelFilter, LoggerError> {
    level.trim().parse::<LevelFilter>().map_err(|e| LoggerError::InvalidConfiguration {
        message: format!("Unknown log level '{level}': {e}").into(),
        context: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level(" Warn ").unwrap(), LevelFilter::WARN);
        assert_eq!(parse_level("off").unwrap(), LevelFilter::OFF);
        assert!(matches!(parse_level("chatty"), Err(LoggerError::InvalidConfiguration { .. })));
    }
}
