//! MongoDB document store
//!
//! This module writes batches to a MongoDB collection through the driver's
//! blocking API. It is only available when the `mongo` feature is enabled.
//!
//! Connection targets are passed to the driver unchanged, so both
//! `mongodb://` and `mongodb+srv://` strings (with credentials and options)
//! work. The driver connects lazily: a bad host shows up on the first insert
//! or count, not when the store is opened.
//!
//! # Example
//!
//! ```rust,no_run
//! use docloader::database::mongo::MongoStore;
//! use docloader::database::DocumentStore;
//!
//! let mut store = MongoStore::connect("mongodb://127.0.0.1:27017", "shop", "orders").unwrap();
//! println!("{} documents", store.count().unwrap());
//! ```

use crate::database::storage::{check_name, DocumentStore};
use crate::error::StoreError;
use crate::types::{Document, TypedValue};
use mongodb::bson::{self, doc, Bson};
use mongodb::sync::{Client, Collection};

/// Blocking MongoDB collection handle
pub struct MongoStore {
    collection: Collection<bson::Document>,
}

impl MongoStore {
    /// Create a handle for `database`.`collection` on the deployment at `uri`
    pub fn connect(uri: &str, database: &str, collection: &str) -> Result<Self, StoreError> {
        check_name("database", database)?;
        check_name("collection", collection)?;

        let client = Client::with_uri_str(uri)?;
        Ok(Self {
            collection: client.database(database).collection(collection),
        })
    }

    /// Full namespace, `database.collection`
    pub fn namespace(&self) -> String {
        self.collection.namespace().to_string()
    }
}

/// Convert a document to BSON, keeping field order
///
/// A repeated key keeps its first position and its last value.
pub fn to_bson(document: &Document) -> bson::Document {
    let mut out = bson::Document::new();
    for (key, value) in &document.fields {
        out.insert(key.as_str(), bson_value(value));
    }
    out
}

fn bson_value(value: &TypedValue) -> Bson {
    match value {
        TypedValue::Int32(v) => Bson::Int32(*v),
        TypedValue::Int64(v) => Bson::Int64(*v),
        TypedValue::Float64(v) => Bson::Double(*v),
        TypedValue::String(v) => Bson::String(v.clone()),
    }
}

impl DocumentStore for MongoStore {
    fn insert_many(&mut self, documents: &[Document]) -> Result<(), StoreError> {
        let batch: Vec<bson::Document> = documents.iter().map(to_bson).collect();
        let result = self.collection.insert_many(batch).run()?;

        if result.inserted_ids.len() != documents.len() {
            return Err(StoreError::Rejected(format!(
                "inserted {} of {} documents",
                result.inserted_ids.len(),
                documents.len()
            )));
        }
        Ok(())
    }

    fn count(&mut self) -> Result<u64, StoreError> {
        Ok(self.collection.count_documents(doc! {}).run()?)
    }

    fn name(&self) -> &str {
        "mongodb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> Document {
        let mut doc = Document::new();
        doc.push("id", TypedValue::Int32(7));
        doc.push("big", TypedValue::Int64(9_000_000_000));
        doc.push("score", TypedValue::Float64(9.5));
        doc.push("name", TypedValue::String("Alice".to_string()));
        doc
    }

    #[test]
    fn test_to_bson_types_and_order() {
        let converted = to_bson(&document());

        let keys: Vec<&str> = converted.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["id", "big", "score", "name"]);
        assert_eq!(converted.get("id"), Some(&Bson::Int32(7)));
        assert_eq!(converted.get("big"), Some(&Bson::Int64(9_000_000_000)));
        assert_eq!(converted.get("score"), Some(&Bson::Double(9.5)));
        assert_eq!(converted.get_str("name").unwrap(), "Alice");
    }

    #[test]
    fn test_to_bson_repeated_key() {
        let mut doc = Document::new();
        doc.push("x", TypedValue::Int32(1));
        doc.push("y", TypedValue::Int32(2));
        doc.push("x", TypedValue::Int32(3));

        let converted = to_bson(&doc);
        assert_eq!(converted.len(), 2);
        assert_eq!(converted.get_i32("x").unwrap(), 3);
    }

    #[test]
    fn test_connect_is_lazy() {
        // no server is needed until the first operation
        let store = MongoStore::connect("mongodb://127.0.0.1:1", "shop", "orders").unwrap();
        assert_eq!(store.namespace(), "shop.orders");
        assert_eq!(store.name(), "mongodb");
    }

    #[test]
    fn test_connect_rejects_bad_names() {
        assert!(matches!(
            MongoStore::connect("mongodb://127.0.0.1:1", "a/b", "orders"),
            Err(StoreError::Rejected(_))
        ));
    }

    #[test]
    fn test_connect_rejects_bad_uri() {
        assert!(matches!(
            MongoStore::connect("mongodb://", "shop", "orders"),
            Err(StoreError::Mongo(_))
        ));
    }
}
