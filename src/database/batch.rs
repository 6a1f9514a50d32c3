//! Batched inserts
//!
//! Documents are collected into a bounded batch and written with one
//! `insert_many` call per batch. Flushing is synchronous: the next row is
//! not read until the store has answered.
//!
//! # Example
//!
//! ```rust
//! use docloader::database::{BatchInserter, MemoryStore};
//! use docloader::types::{Document, TypedValue};
//!
//! let mut store = MemoryStore::new();
//! let mut inserter = BatchInserter::new(&mut store, 2);
//! for id in 0..3 {
//!     let mut doc = Document::new();
//!     doc.push("id", TypedValue::Int32(id));
//!     inserter.add(doc).unwrap();
//! }
//! inserter.close().unwrap();
//! assert_eq!(store.insert_calls, vec![2, 1]);
//! ```

use crate::database::storage::DocumentStore;
use crate::error::{LoadError, Result};
use crate::types::Document;

/// Receives the store's document count after each flush
pub trait ProgressObserver {
    /// Called after a successful flush with the collection's total count
    fn on_flush(&mut self, total_count: u64);
}

impl<F: FnMut(u64)> ProgressObserver for F {
    fn on_flush(&mut self, total_count: u64) {
        self(total_count)
    }
}

/// Totals for a finished inserter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InsertStats {
    /// Documents written by this inserter
    pub documents: u64,

    /// Successful `insert_many` calls
    pub batches: u64,

    /// Last count reported by the store, if one was queried
    pub last_count: Option<u64>,
}

/// Accumulates documents and flushes them in bounded batches
pub struct BatchInserter<'a, S: DocumentStore + ?Sized> {
    store: &'a mut S,
    batch: Vec<Document>,
    batch_size: usize,
    observer: Option<&'a mut dyn ProgressObserver>,
    stats: InsertStats,
}

impl<'a, S: DocumentStore + ?Sized> BatchInserter<'a, S> {
    /// Create an inserter writing to `store`
    ///
    /// A `batch_size` of zero is treated as one.
    pub fn new(store: &'a mut S, batch_size: usize) -> Self {
        let batch_size = batch_size.max(1);
        Self {
            store,
            batch: Vec::with_capacity(batch_size),
            batch_size,
            observer: None,
            stats: InsertStats::default(),
        }
    }

    /// Report the store count to `observer` after every flush
    pub fn with_observer(mut self, observer: &'a mut dyn ProgressObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Append a document, flushing when the batch is full
    pub fn add(&mut self, document: Document) -> Result<()> {
        self.batch.push(document);
        if self.batch.len() >= self.batch_size {
            self.flush()?;
        }
        Ok(())
    }

    /// Write the current batch in one call and clear it
    ///
    /// On failure the batch is left as it was and nothing is retried.
    pub fn flush(&mut self) -> Result<()> {
        if self.batch.is_empty() {
            return Ok(());
        }

        self.store
            .insert_many(&self.batch)
            .map_err(|source| LoadError::Store {
                committed: self.stats.documents,
                batches: self.stats.batches,
                source,
            })?;

        let inserted = self.batch.len() as u64;
        self.batch.clear();
        self.stats.documents += inserted;
        self.stats.batches += 1;
        log::debug!(
            "flushed {} documents to {} store (batch {})",
            inserted,
            self.store.name(),
            self.stats.batches
        );

        self.report_progress();
        Ok(())
    }

    fn report_progress(&mut self) {
        let Some(observer) = self.observer.as_mut() else {
            return;
        };
        match self.store.count() {
            Ok(total) => {
                self.stats.last_count = Some(total);
                observer.on_flush(total);
            }
            Err(e) => log::warn!("failed to count documents after flush: {}", e),
        }
    }

    /// Flush the remaining documents and finish
    pub fn close(mut self) -> Result<InsertStats> {
        self.flush()?;
        Ok(self.stats)
    }

    /// Documents waiting in the current batch
    pub fn pending(&self) -> usize {
        self.batch.len()
    }
}
