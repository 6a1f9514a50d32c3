//! Error types
//!
//! Every failure aborts the run. Errors carry enough position information
//! (input line, column, committed documents) to explain where the load stopped.

use thiserror::Error;

/// Result type alias for loading operations
pub type Result<T> = std::result::Result<T, LoadError>;

/// Failure converting a single cell
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoerceError {
    /// Text is not a valid literal for the column type
    #[error("invalid {expected} literal {raw:?}")]
    Format { raw: String, expected: &'static str },

    /// Value does not fit the column width
    #[error("value {raw:?} overflows {expected}")]
    Overflow { raw: String, expected: &'static str },

    /// Column was declared with an unknown type letter
    #[error("unsupported column type {0:?}")]
    UnsupportedType(char),
}

/// Failure reported by a document store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Connection target scheme is not recognised
    #[error("unsupported connection target: {0}")]
    UnsupportedTarget(String),

    /// Filesystem failure in a file-backed store
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Documents could not be encoded
    #[error("failed to encode documents: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Transport failure talking to a remote store
    #[cfg(feature = "http")]
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Driver failure talking to a MongoDB deployment
    #[cfg(feature = "mongo")]
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// Store answered but refused the request
    #[error("store rejected request: {0}")]
    Rejected(String),

    /// Failure injected into an in-memory store
    #[error("injected failure on insert call {0}")]
    Injected(usize),
}

/// Errors that abort a load
#[derive(Debug, Error)]
pub enum LoadError {
    /// Missing or invalid configuration value
    #[error("configuration error: {0}")]
    Config(String),

    /// Column name and type lists differ in length
    #[error("count of columns and column types mismatch: {names} names, {types} types")]
    SchemaMismatch { names: usize, types: usize },

    /// Separator other than ',', ';' or TAB
    #[error("unsupported CSV separator {0:?}")]
    UnsupportedSeparator(char),

    /// Input could not be opened or read
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Input line is not valid UTF-8
    #[error("line {line}: invalid UTF-8 after byte {offset}")]
    Encoding { line: u64, offset: usize },

    /// Tokenized row length differs from the schema
    #[error("line {line}: expected {expected} columns, found {found}")]
    RowShape {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// Cell coercion failed
    #[error("line {line}, column {column:?}: {source}")]
    Cell {
        line: u64,
        column: String,
        #[source]
        source: CoerceError,
    },

    /// Store could not be opened; nothing was inserted
    #[error("failed to open store: {0}")]
    Connect(#[source] StoreError),

    /// Insert failed; earlier batches stay in the store
    #[error("insert failed after {committed} documents in {batches} batches were committed: {source}")]
    Store {
        committed: u64,
        batches: u64,
        #[source]
        source: StoreError,
    },
}

impl LoadError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an I/O error for `path`
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Documents durably inserted before the failure, when known
    pub fn committed(&self) -> Option<u64> {
        match self {
            LoadError::Store { committed, .. } => Some(*committed),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = LoadError::SchemaMismatch { names: 3, types: 2 };
        assert_eq!(
            err.to_string(),
            "count of columns and column types mismatch: 3 names, 2 types"
        );

        let err = LoadError::Cell {
            line: 4,
            column: "age".to_string(),
            source: CoerceError::Format {
                raw: "abc".to_string(),
                expected: "int32",
            },
        };
        assert_eq!(err.to_string(), r#"line 4, column "age": invalid int32 literal "abc""#);

        let err = LoadError::Encoding { line: 1, offset: 5 };
        assert_eq!(err.to_string(), "line 1: invalid UTF-8 after byte 5");

        let err = LoadError::Connect(StoreError::UnsupportedTarget("ftp://host".into()));
        assert_eq!(
            err.to_string(),
            "failed to open store: unsupported connection target: ftp://host"
        );
    }

    #[test]
    fn test_committed() {
        let err = LoadError::Store {
            committed: 200,
            batches: 2,
            source: StoreError::Injected(3),
        };
        assert_eq!(err.committed(), Some(200));
        assert_eq!(LoadError::config("x").committed(), None);

        let err = LoadError::Connect(StoreError::UnsupportedTarget("ftp://".into()));
        assert_eq!(err.committed(), None);
    }
}
