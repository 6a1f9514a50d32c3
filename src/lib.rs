//! DocLoader: schema-driven loading of delimited text into document stores
//!
//! Each input line is split on a single separator, every cell is converted
//! to the type its column declares, and the resulting ordered documents are
//! inserted into the store in bounded batches.
//!
//! # Example
//!
//! ```rust
//! use docloader::csv::{LineSource, Separator};
//! use docloader::database::{DocumentLoader, MemoryStore, Schema};
//!
//! let schema = Schema::build("id,name,score", "I,S,F")?;
//! let loader = DocumentLoader::new(schema, Separator::Semicolon);
//!
//! let mut store = MemoryStore::new();
//! let input = std::io::Cursor::new("1;Alice;9.5\n");
//! loader.run(LineSource::from_reader(input), &mut store, None)?;
//!
//! assert_eq!(store.documents[0].to_json()?, r#"{"id":1,"name":"Alice","score":9.5}"#);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// DocLoader version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod csv;
pub mod database;
pub mod error;
pub mod types;
pub mod utils;

pub use config::LoadConfig;
pub use error::{CoerceError, LoadError, Result, StoreError};
pub use types::{ColumnType, Document, TypedValue};
