//! Load configuration
//!
//! The command line (or a library caller) fills in a `LoadConfig`; the
//! loader only ever sees a validated one.

use crate::csv::Separator;
use crate::error::{LoadError, Result};
use std::path::PathBuf;

/// Default number of documents per insert call
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Everything needed for one load run
#[derive(Debug, Clone, PartialEq)]
pub struct LoadConfig {
    /// Store connection target
    pub target: String,

    /// Database name
    pub database: String,

    /// Collection name
    pub collection: String,

    /// Input file
    pub input: PathBuf,

    /// Column separator
    pub separator: Separator,

    /// Lines to discard before the first row
    pub skip_lines: u64,

    /// Comma-separated column names
    pub column_names: String,

    /// Comma-separated column type letters
    pub column_types: String,

    /// Documents per insert call
    pub batch_size: usize,
}

impl LoadConfig {
    /// Create a configuration with default separator, skip count and batch size
    pub fn new(
        target: impl Into<String>,
        database: impl Into<String>,
        collection: impl Into<String>,
        input: impl Into<PathBuf>,
        column_names: impl Into<String>,
        column_types: impl Into<String>,
    ) -> Self {
        Self {
            target: target.into(),
            database: database.into(),
            collection: collection.into(),
            input: input.into(),
            separator: Separator::default(),
            skip_lines: 0,
            column_names: column_names.into(),
            column_types: column_types.into(),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Set the separator
    pub fn with_separator(mut self, separator: Separator) -> Self {
        self.separator = separator;
        self
    }

    /// Set the number of leading lines to skip
    pub fn with_skip_lines(mut self, skip_lines: u64) -> Self {
        self.skip_lines = skip_lines;
        self
    }

    /// Set the batch size
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Check required values
    ///
    /// # Returns
    /// `Err(LoadError::Config)` naming the first missing or invalid option
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("uri", self.target.as_str()),
            ("database", self.database.as_str()),
            ("collection", self.collection.as_str()),
            ("names", self.column_names.as_str()),
            ("types", self.column_types.as_str()),
        ];
        for (option, value) in required {
            if value.trim().is_empty() {
                return Err(LoadError::config(format!("option '{}' is required", option)));
            }
        }
        if self.input.as_os_str().is_empty() {
            return Err(LoadError::config("option 'input' is required"));
        }
        if self.batch_size == 0 {
            return Err(LoadError::config("batch size must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> LoadConfig {
        LoadConfig::new("memory://", "db", "coll", "in.csv", "a,b", "i,S")
    }

    #[test]
    fn test_defaults() {
        let config = config();
        assert_eq!(config.separator, Separator::Semicolon);
        assert_eq!(config.skip_lines, 0);
        assert_eq!(config.batch_size, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_required_option() {
        let mut config = config();
        config.database.clear();
        match config.validate() {
            Err(LoadError::Config(msg)) => assert!(msg.contains("database")),
            other => panic!("unexpected result: {:?}", other),
        }

        let config = LoadConfig::new("memory://", "db", "coll", "", "a", "i");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_batch_size() {
        assert!(config().with_batch_size(0).validate().is_err());
    }

    #[test]
    fn test_builders() {
        let config = config()
            .with_separator(Separator::Tab)
            .with_skip_lines(3)
            .with_batch_size(5);
        assert_eq!(config.separator, Separator::Tab);
        assert_eq!(config.skip_lines, 3);
        assert_eq!(config.batch_size, 5);
    }
}
