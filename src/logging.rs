//! Logging

use anyhow::Result;
use log::LevelFilter;

/// Leveled logging capability, isolated for testing
#[cfg_attr(test, mockall::automock)]
pub trait Logger: Send + Sync {
    fn error(&self, error: &anyhow::Error);
    fn info(&self, message: &str);
}

/// Forwards to the [log] facade
#[derive(Clone, Debug)]
pub struct LogLogger {
    target: String,
}

impl LogLogger {
    pub fn new() -> Self {
        LogLogger {
            target: env!("CARGO_PKG_NAME").to_string(),
        }
    }
}

impl Default for LogLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for LogLogger {
    fn error(&self, error: &anyhow::Error) {
        /* Alternate format prints the whole context chain */
        log::error!(target: self.target.as_str(), "{error:#}");
    }

    fn info(&self, message: &str) {
        log::info!(target: self.target.as_str(), "{message}");
    }
}

/// Sets up `env_logger` with `level` as default. `RUST_LOG` still takes precedence.
pub fn init(level: LevelFilter) -> Result<()> {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_env("RUST_LOG")
        .try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_logger_logs_under_crate_name() {
        let logger = LogLogger::default();

        assert_eq!(logger.target, "envkit");
    }

    #[test]
    fn init_when_logger_is_already_set_then_fails() {
        /* Only the first call in the test process can succeed */
        let _ = init(LevelFilter::Info);

        let result = init(LevelFilter::Debug);

        assert!(result.is_err());
    }
}
