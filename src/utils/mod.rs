//! Utilities module
//!
//! - `logger`: env_logger setup
//! - `helpers`: summary formatting
//!
//! # Example
//!
//! ```rust
//! use docloader::utils::{Helpers, Logger};
//!
//! Logger::init();
//! log::info!("loaded {} rows", Helpers::format_count(12000));
//! ```

pub mod helpers;
pub mod logger;

// Re-export main types for convenience
pub use helpers::Helpers;
pub use logger::Logger;
