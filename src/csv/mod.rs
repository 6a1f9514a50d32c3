//! Delimited text parsing
//!
//! This module turns input lines into ordered documents:
//! - `source`: forward-only line reader with a skip prefix
//! - `tokenizer`: single-character separator splitting
//! - `coercer`: per-type cell conversion
//! - `assembler`: row + schema to document
//!
//! # Example
//!
//! ```rust
//! use docloader::csv::{assemble, tokenize, Separator};
//! use docloader::database::Schema;
//!
//! let schema = Schema::build("id,name", "i,S").unwrap();
//! let row = tokenize("1; Alice", Separator::Semicolon);
//! let doc = assemble(&row, &schema).unwrap();
//! assert_eq!(doc.to_json().unwrap(), r#"{"id":1,"name":"Alice"}"#);
//! ```

pub mod assembler;
pub mod coercer;
pub mod source;
pub mod tokenizer;

pub use assembler::{assemble, AssembleError};
pub use coercer::coerce;
pub use source::LineSource;
pub use tokenizer::{tokenize, Separator};
