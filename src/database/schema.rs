//! Load schema
//!
//! This module builds the ordered column schema from the comma-separated
//! name and type lists given on the command line.
//!
//! # Example
//!
//! ```rust
//! use docloader::database::Schema;
//! use docloader::types::ColumnType;
//!
//! let schema = Schema::build("id,name,score", "I,S,F").unwrap();
//! assert_eq!(schema.len(), 3);
//! assert_eq!(schema.columns()[2].column_type, ColumnType::Float);
//! ```

use crate::error::{LoadError, Result};
use crate::types::{Column, ColumnType};

/// Ordered column schema
///
/// Immutable once built. Column names need not be unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<Column>,
}

impl Schema {
    /// Build a schema from comma-separated name and type lists
    ///
    /// Only the first character of each type token is significant. Unknown
    /// type letters are accepted here and rejected when a cell is coerced.
    ///
    /// # Arguments
    /// * `names_csv` - Column names, e.g. `"id,name,score"`
    /// * `types_csv` - Type letters, e.g. `"I,S,F"`
    ///
    /// # Returns
    /// `Ok(Schema)` if both lists have the same non-zero length
    pub fn build(names_csv: &str, types_csv: &str) -> Result<Self> {
        let names: Vec<&str> = split_list(names_csv).collect();
        let types: Vec<ColumnType> = split_list(types_csv)
            .filter_map(|token| token.chars().next())
            .map(ColumnType::from_tag)
            .collect();

        if names.len() != types.len() {
            return Err(LoadError::SchemaMismatch {
                names: names.len(),
                types: types.len(),
            });
        }
        if names.is_empty() {
            return Err(LoadError::config("column list is empty"));
        }

        let columns = names
            .into_iter()
            .zip(types)
            .map(|(name, column_type)| Column::new(name, column_type))
            .collect();

        Ok(Self { columns })
    }

    /// Columns in declaration order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Always false for a built schema
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column names in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Columns declared with a type letter coercion will reject
    pub fn unsupported_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns
            .iter()
            .filter(|c| matches!(c.column_type, ColumnType::Unsupported(_)))
    }
}

// Empty tokens are dropped, so "a,,b" names two columns
fn split_list(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').filter(|token| !token.is_empty())
}
