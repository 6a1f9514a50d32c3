//! Logging utilities
//!
//! This module sets up the `log` facade with `env_logger`.
//!
//! # Example
//!
//! ```rust
//! use docloader::utils::Logger;
//! use log::LevelFilter;
//!
//! Logger::init_with_level(LevelFilter::Debug);
//! log::debug!("logger ready");
//! ```

use log::LevelFilter;

/// Logger setup
pub struct Logger;

impl Logger {
    /// Initialize the logger at info level
    ///
    /// `RUST_LOG` still overrides the level (e.g., `RUST_LOG=docloader=trace`).
    pub fn init() {
        Self::init_with_level(LevelFilter::Info);
    }

    /// Initialize the logger with a default level
    ///
    /// Calling this more than once keeps the first logger.
    pub fn init_with_level(level: LevelFilter) {
        let _ = env_logger::Builder::new()
            .filter_level(level)
            .parse_default_env()
            .format_timestamp_millis()
            .try_init();
    }

    /// Level for a `-v` count: 0 = info, 1 = debug, 2+ = trace
    pub fn level_for_verbosity(verbose: u8) -> LevelFilter {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
