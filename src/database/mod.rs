//! Schema, stores and the load driver
//!
//! The database module consists of:
//! - `schema`: column schema built from the name and type lists
//! - `storage`: the `DocumentStore` trait and the memory and file stores
//! - `http`: REST store (`http` feature)
//! - `mongo`: MongoDB store (`mongo` feature)
//! - `batch`: bounded batch inserter with progress reporting
//! - `loader`: the line-by-line load loop
//!
//! # Example
//!
//! ```rust
//! use docloader::config::LoadConfig;
//! use docloader::database::load;
//! use std::io::Write;
//!
//! let mut input = tempfile::NamedTempFile::new().unwrap();
//! writeln!(input, "1;Alice;9.5").unwrap();
//!
//! let config = LoadConfig::new("memory://", "school", "scores", input.path(), "id,name,score", "I,S,F");
//! let summary = load(&config, None).unwrap();
//! assert_eq!(summary.rows_loaded, 1);
//! ```

pub mod batch;
#[cfg(feature = "http")]
pub mod http;
pub mod loader;
#[cfg(feature = "mongo")]
pub mod mongo;
pub mod schema;
pub mod storage;

// Re-export main types for convenience
pub use batch::{BatchInserter, InsertStats, ProgressObserver};
pub use loader::{load, DocumentLoader, LoadSummary};
pub use schema::Schema;
pub use storage::{open_store, DocumentStore, FileStore, MemoryStore};
