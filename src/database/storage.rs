//! Document stores
//!
//! This module defines the store interface the loader writes to and the
//! stores selected by connection target:
//! - `memory://` keeps documents in process
//! - `file://<dir>` appends JSON lines to `<dir>/<database>/<collection>.jsonl`
//! - `http://` / `https://` posts batches to a REST endpoint (`http` feature)
//! - `mongodb://` / `mongodb+srv://` inserts into MongoDB (`mongo` feature)
//!
//! # Example
//!
//! ```rust
//! use docloader::database::{open_store, DocumentStore};
//!
//! let mut store = open_store("memory://", "shop", "orders").unwrap();
//! assert_eq!(store.count().unwrap(), 0);
//! ```

use crate::error::StoreError;
use crate::types::Document;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Store the loader inserts documents into
///
/// One handle covers one database + collection for the whole run.
pub trait DocumentStore {
    /// Insert all documents in one call
    ///
    /// A failure means the whole batch failed.
    fn insert_many(&mut self, documents: &[Document]) -> Result<(), StoreError>;

    /// Total number of documents in the collection
    fn count(&mut self) -> Result<u64, StoreError>;

    /// Store name for logging
    fn name(&self) -> &str;
}

/// Open the store named by `target`
///
/// # Arguments
/// * `target` - Connection target (`memory://`, `file://<dir>`, `http(s)://...`,
///   `mongodb://...`, `mongodb+srv://...`)
/// * `database` - Database name
/// * `collection` - Collection name
pub fn open_store(
    target: &str,
    database: &str,
    collection: &str,
) -> Result<Box<dyn DocumentStore>, StoreError> {
    if target == "memory://" || target == "memory:" {
        return Ok(Box::new(MemoryStore::new()));
    }
    if let Some(dir) = target.strip_prefix("file://") {
        return Ok(Box::new(FileStore::open(dir, database, collection)?));
    }
    if target.starts_with("http://") || target.starts_with("https://") {
        return open_http(target, database, collection);
    }
    if target.starts_with("mongodb://") || target.starts_with("mongodb+srv://") {
        return open_mongo(target, database, collection);
    }
    Err(StoreError::UnsupportedTarget(target.to_string()))
}

#[cfg(feature = "http")]
fn open_http(
    target: &str,
    database: &str,
    collection: &str,
) -> Result<Box<dyn DocumentStore>, StoreError> {
    Ok(Box::new(super::http::HttpStore::new(
        target, database, collection,
    )?))
}

#[cfg(not(feature = "http"))]
fn open_http(
    target: &str,
    _database: &str,
    _collection: &str,
) -> Result<Box<dyn DocumentStore>, StoreError> {
    Err(StoreError::UnsupportedTarget(format!(
        "{} (built without the http feature)",
        target
    )))
}

#[cfg(feature = "mongo")]
fn open_mongo(
    target: &str,
    database: &str,
    collection: &str,
) -> Result<Box<dyn DocumentStore>, StoreError> {
    Ok(Box::new(super::mongo::MongoStore::connect(
        target, database, collection,
    )?))
}

#[cfg(not(feature = "mongo"))]
fn open_mongo(
    target: &str,
    _database: &str,
    _collection: &str,
) -> Result<Box<dyn DocumentStore>, StoreError> {
    Err(StoreError::UnsupportedTarget(format!(
        "{} (built without the mongo feature)",
        target
    )))
}

/// Reject names that would escape the store directory or URL path
pub(crate) fn check_name(kind: &str, name: &str) -> Result<(), StoreError> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(StoreError::Rejected(format!(
            "invalid {} name {:?}",
            kind, name
        )));
    }
    Ok(())
}

/// In-process store
///
/// Records every insert call, which makes it the store used in tests. A
/// failure can be injected on a chosen insert call.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    /// All inserted documents in insertion order
    pub documents: Vec<Document>,

    /// Size of each successful insert call
    pub insert_calls: Vec<usize>,

    /// Number of `count` calls
    pub count_calls: usize,

    fail_on_call: Option<usize>,
    attempts: usize,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the `call`-th insert (1-based) fail
    pub fn fail_on_call(mut self, call: usize) -> Self {
        self.fail_on_call = Some(call);
        self
    }

    /// Number of insert attempts, failed ones included
    pub fn attempts(&self) -> usize {
        self.attempts
    }
}

impl DocumentStore for MemoryStore {
    fn insert_many(&mut self, documents: &[Document]) -> Result<(), StoreError> {
        self.attempts += 1;
        if self.fail_on_call == Some(self.attempts) {
            return Err(StoreError::Injected(self.attempts));
        }
        self.documents.extend_from_slice(documents);
        self.insert_calls.push(documents.len());
        Ok(())
    }

    fn count(&mut self) -> Result<u64, StoreError> {
        self.count_calls += 1;
        Ok(self.documents.len() as u64)
    }

    fn name(&self) -> &str {
        "memory"
    }
}

/// Newline-delimited JSON file store
///
/// Each insert serializes the whole batch before writing, so a batch that
/// fails to encode leaves the file untouched.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    file: File,
    count: u64,
}

impl FileStore {
    /// Open (or create) `<dir>/<database>/<collection>.jsonl`
    pub fn open(
        dir: impl AsRef<Path>,
        database: &str,
        collection: &str,
    ) -> Result<Self, StoreError> {
        check_name("database", database)?;
        check_name("collection", collection)?;

        let db_dir = dir.as_ref().join(database);
        fs::create_dir_all(&db_dir)?;
        let path = db_dir.join(format!("{}.jsonl", collection));

        let count = if path.exists() {
            count_lines(&path)?
        } else {
            0
        };
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self { path, file, count })
    }

    /// Path of the collection file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn count_lines(path: &Path) -> Result<u64, StoreError> {
    let reader = BufReader::new(File::open(path)?);
    let mut count = 0;
    for line in reader.lines() {
        if !line?.trim().is_empty() {
            count += 1;
        }
    }
    Ok(count)
}

impl DocumentStore for FileStore {
    fn insert_many(&mut self, documents: &[Document]) -> Result<(), StoreError> {
        let mut buffer = Vec::new();
        for document in documents {
            serde_json::to_writer(&mut buffer, document)?;
            buffer.push(b'\n');
        }
        self.file.write_all(&buffer)?;
        self.file.flush()?;
        self.count += documents.len() as u64;
        Ok(())
    }

    fn count(&mut self) -> Result<u64, StoreError> {
        Ok(self.count)
    }

    fn name(&self) -> &str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TypedValue;

    fn doc(id: i32) -> Document {
        let mut doc = Document::new();
        doc.push("id", TypedValue::Int32(id));
        doc
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        store.insert_many(&[doc(1), doc(2)]).unwrap();
        store.insert_many(&[doc(3)]).unwrap();

        assert_eq!(store.insert_calls, vec![2, 1]);
        assert_eq!(store.count().unwrap(), 3);
        assert_eq!(store.count_calls, 1);
    }

    #[test]
    fn test_memory_store_injected_failure() {
        let mut store = MemoryStore::new().fail_on_call(2);
        store.insert_many(&[doc(1)]).unwrap();
        assert!(matches!(
            store.insert_many(&[doc(2)]),
            Err(StoreError::Injected(2))
        ));
        assert_eq!(store.documents.len(), 1);
        assert_eq!(store.attempts(), 2);
    }

    #[test]
    fn test_file_store_appends_json_lines() {
        let dir = tempfile::tempdir().unwrap();

        let mut store = FileStore::open(dir.path(), "shop", "orders").unwrap();
        store.insert_many(&[doc(1), doc(2)]).unwrap();
        assert_eq!(store.count().unwrap(), 2);

        let contents = fs::read_to_string(store.path()).unwrap();
        assert_eq!(contents, "{\"id\":1}\n{\"id\":2}\n");

        // reopening picks up the existing count
        let mut store = FileStore::open(dir.path(), "shop", "orders").unwrap();
        store.insert_many(&[doc(3)]).unwrap();
        assert_eq!(store.count().unwrap(), 3);
    }

    #[test]
    fn test_file_store_rejects_path_names() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            FileStore::open(dir.path(), "../up", "orders"),
            Err(StoreError::Rejected(_))
        ));
        assert!(FileStore::open(dir.path(), "shop", "").is_err());
    }

    #[test]
    fn test_open_store_targets() {
        let dir = tempfile::tempdir().unwrap();
        let target = format!("file://{}", dir.path().display());

        assert_eq!(open_store("memory://", "db", "c").unwrap().name(), "memory");
        assert_eq!(open_store(&target, "db", "c").unwrap().name(), "file");
        assert!(matches!(
            open_store("ftp://localhost", "db", "c"),
            Err(StoreError::UnsupportedTarget(_))
        ));
        assert!(matches!(
            open_store("memory", "db", "c"),
            Err(StoreError::UnsupportedTarget(_))
        ));
    }

    #[cfg(feature = "mongo")]
    #[test]
    fn test_open_store_mongo() {
        let store = open_store("mongodb://127.0.0.1:1", "db", "c").unwrap();
        assert_eq!(store.name(), "mongodb");
    }

    #[cfg(not(feature = "mongo"))]
    #[test]
    fn test_open_store_mongo_needs_feature() {
        for target in ["mongodb://localhost", "mongodb+srv://cluster.example.net"] {
            match open_store(target, "db", "c") {
                Err(StoreError::UnsupportedTarget(message)) => {
                    assert!(message.contains("mongo feature"), "{}", message)
                }
                Err(other) => panic!("unexpected error: {:?}", other),
                Ok(store) => panic!("opened {} store", store.name()),
            }
        }
    }
}
