//! Document assembly
//!
//! Zips a tokenized row with the schema, coercing each cell in column order.

use crate::csv::coercer::coerce;
use crate::database::schema::Schema;
use crate::error::{CoerceError, LoadError};
use crate::types::{Document, Row};
use thiserror::Error;

/// Failure assembling one row
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssembleError {
    /// Row has more or fewer cells than the schema has columns
    #[error("expected {expected} columns, found {found}")]
    Shape { expected: usize, found: usize },

    /// A cell could not be coerced
    #[error("column {column:?}: {source}")]
    Cell {
        column: String,
        #[source]
        source: CoerceError,
    },
}

impl AssembleError {
    /// Attach the input line number
    pub fn at_line(self, line: u64) -> LoadError {
        match self {
            AssembleError::Shape { expected, found } => LoadError::RowShape {
                line,
                expected,
                found,
            },
            AssembleError::Cell { column, source } => LoadError::Cell {
                line,
                column,
                source,
            },
        }
    }
}

/// Build the document for `row`
///
/// The first failing cell aborts the row; nothing partial is returned.
pub fn assemble(row: &Row<'_>, schema: &Schema) -> Result<Document, AssembleError> {
    if row.len() != schema.len() {
        return Err(AssembleError::Shape {
            expected: schema.len(),
            found: row.len(),
        });
    }

    let mut document = Document::with_capacity(schema.len());
    for (cell, column) in row.cells.iter().zip(schema.columns()) {
        let value = coerce(cell, column.column_type).map_err(|source| AssembleError::Cell {
            column: column.name.clone(),
            source,
        })?;
        document.push(column.name.as_str(), value);
    }

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TypedValue;

    #[test]
    fn test_assemble() {
        let schema = Schema::build("id,name,score", "I,S,F").unwrap();
        let row = Row::new(vec!["1", "Alice", "9.5"]);

        let doc = assemble(&row, &schema).unwrap();
        assert_eq!(
            doc.fields,
            vec![
                ("id".to_string(), TypedValue::Int64(1)),
                ("name".to_string(), TypedValue::String("Alice".to_string())),
                ("score".to_string(), TypedValue::Float64(9.5)),
            ]
        );
    }

    #[test]
    fn test_assemble_short_row() {
        let schema = Schema::build("a,b,c", "i,i,i").unwrap();
        let row = Row::new(vec!["1", "2"]);
        assert_eq!(
            assemble(&row, &schema),
            Err(AssembleError::Shape {
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn test_assemble_long_row() {
        let schema = Schema::build("a", "i").unwrap();
        let row = Row::new(vec!["1", "2"]);
        assert!(matches!(
            assemble(&row, &schema),
            Err(AssembleError::Shape { expected: 1, found: 2 })
        ));
    }

    #[test]
    fn test_assemble_names_failing_column() {
        let schema = Schema::build("id,age", "i,i").unwrap();
        let row = Row::new(vec!["1", "old"]);

        match assemble(&row, &schema) {
            Err(AssembleError::Cell { column, source }) => {
                assert_eq!(column, "age");
                assert!(matches!(source, CoerceError::Format { .. }));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_unsupported_type_rejected_per_row() {
        let schema = Schema::build("id,tag", "i,Q").unwrap();
        let row = Row::new(vec!["1", "x"]);

        let err = assemble(&row, &schema).unwrap_err();
        assert_eq!(
            err,
            AssembleError::Cell {
                column: "tag".to_string(),
                source: CoerceError::UnsupportedType('Q'),
            }
        );
    }

    #[test]
    fn test_at_line() {
        let err = AssembleError::Shape {
            expected: 2,
            found: 1,
        }
        .at_line(7);
        assert!(matches!(
            err,
            LoadError::RowShape {
                line: 7,
                expected: 2,
                found: 1
            }
        ));
    }
}
