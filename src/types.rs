//! Core types for the loading pipeline
//!
//! This module defines the data structures that flow through docloader:
//! - Column definitions and their declared types
//! - Raw rows produced by the tokenizer
//! - Typed values and the ordered documents built from them

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// Declared type of a column
///
/// Built from the first character of a type token. Letters outside the
/// supported table are kept as `Unsupported` and only rejected when a cell
/// of that column is coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// 32-bit signed integer (`i`)
    Int32,

    /// 64-bit signed integer (`I`)
    Int64,

    /// 32-bit float, stored as a double (`F`)
    Float,

    /// Text (`S`)
    String,

    /// Any other type letter
    Unsupported(char),
}

impl ColumnType {
    /// Map a type letter to a column type
    pub fn from_tag(tag: char) -> Self {
        match tag {
            'i' => ColumnType::Int32,
            'I' => ColumnType::Int64,
            'F' => ColumnType::Float,
            'S' => ColumnType::String,
            other => ColumnType::Unsupported(other),
        }
    }

    /// Type letter this column type was built from
    pub fn tag(&self) -> char {
        match self {
            ColumnType::Int32 => 'i',
            ColumnType::Int64 => 'I',
            ColumnType::Float => 'F',
            ColumnType::String => 'S',
            ColumnType::Unsupported(c) => *c,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Int32 => write!(f, "int32"),
            ColumnType::Int64 => write!(f, "int64"),
            ColumnType::Float => write!(f, "float"),
            ColumnType::String => write!(f, "string"),
            ColumnType::Unsupported(c) => write!(f, "unsupported({:?})", c),
        }
    }
}

/// Column definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column name, used as the document key
    pub name: String,

    /// Declared type
    pub column_type: ColumnType,
}

impl Column {
    /// Create a new column
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }
}

/// Raw cells of one input line
///
/// Cells borrow from the line they were split from, so a row never
/// outlives a single loop iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row<'a> {
    /// Trimmed cell strings in input order
    pub cells: Vec<&'a str>,
}

impl<'a> Row<'a> {
    /// Create a new row
    pub fn new(cells: Vec<&'a str>) -> Self {
        Self { cells }
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the row has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get the cell at column index
    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.cells.get(index).copied()
    }
}

/// Coerced cell value
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    /// 32-bit integer
    Int32(i32),

    /// 64-bit integer
    Int64(i64),

    /// Floating point number
    Float64(f64),

    /// String value
    String(String),
}

impl Serialize for TypedValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            TypedValue::Int32(v) => serializer.serialize_i32(*v),
            TypedValue::Int64(v) => serializer.serialize_i64(*v),
            TypedValue::Float64(v) => serializer.serialize_f64(*v),
            TypedValue::String(v) => serializer.serialize_str(v),
        }
    }
}

/// Ordered document built from one row
///
/// Fields keep column order. Duplicate keys are allowed and serialized as
/// they are; keeping names unique is up to whoever declares the schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Key-value pairs in column order
    pub fields: Vec<(String, TypedValue)>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Create an empty document with room for `capacity` fields
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    /// Append a field
    pub fn push(&mut self, key: impl Into<String>, value: TypedValue) {
        self.fields.push((key.into(), value));
    }

    /// Get the first value stored under `key`
    pub fn get(&self, key: &str) -> Option<&TypedValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the document has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over keys in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    /// Serialize to a compact JSON object
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

// Serialized as a map so key order follows the columns
impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
