//! Document loader
//!
//! This module runs the load: skip the prefix lines, then for every line
//! tokenize, assemble and hand the document to the batch inserter. The
//! first error stops the run; batches flushed before it stay in the store.
//!
//! # Example
//!
//! ```rust
//! use docloader::csv::{LineSource, Separator};
//! use docloader::database::{DocumentLoader, MemoryStore, Schema};
//! use std::io::Cursor;
//!
//! let schema = Schema::build("id,name,score", "I,S,F").unwrap();
//! let loader = DocumentLoader::new(schema, Separator::Semicolon).with_batch_size(2);
//!
//! let input = Cursor::new("1;Alice;9.5\n2;Bob;7.25\n");
//! let mut store = MemoryStore::new();
//! let summary = loader
//!     .run(LineSource::from_reader(input), &mut store, None)
//!     .unwrap();
//!
//! assert_eq!(summary.rows_loaded, 2);
//! assert_eq!(store.insert_calls, vec![2]);
//! ```

use crate::config::{LoadConfig, DEFAULT_BATCH_SIZE};
use crate::csv::{assemble, tokenize, LineSource, Separator};
use crate::database::batch::{BatchInserter, ProgressObserver};
use crate::database::schema::Schema;
use crate::database::storage::{open_store, DocumentStore};
use crate::error::{LoadError, Result};
use std::io::BufRead;
use std::time::{Duration, Instant};

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadSummary {
    /// Lines discarded before the first row
    pub lines_skipped: u64,

    /// Documents inserted
    pub rows_loaded: u64,

    /// Insert calls made
    pub batches: u64,

    /// Store count after the last flush, when an observer asked for it
    pub total_in_store: Option<u64>,

    /// Wall time of the run
    pub elapsed: Duration,
}

/// Drives one load from a line source into a store
#[derive(Debug, Clone)]
pub struct DocumentLoader {
    schema: Schema,
    separator: Separator,
    skip_lines: u64,
    batch_size: usize,
}

impl DocumentLoader {
    /// Create a loader for `schema`
    pub fn new(schema: Schema, separator: Separator) -> Self {
        Self {
            schema,
            separator,
            skip_lines: 0,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Create a loader from a validated configuration
    ///
    /// Builds the schema, so name/type count mismatches fail here.
    pub fn from_config(config: &LoadConfig) -> Result<Self> {
        config.validate()?;
        let schema = Schema::build(&config.column_names, &config.column_types)?;
        Ok(Self::new(schema, config.separator)
            .with_skip_lines(config.skip_lines)
            .with_batch_size(config.batch_size))
    }

    /// Skip `skip_lines` lines before reading rows
    pub fn with_skip_lines(mut self, skip_lines: u64) -> Self {
        self.skip_lines = skip_lines;
        self
    }

    /// Insert `batch_size` documents per call
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Load every remaining line of `source` into `store`
    ///
    /// # Arguments
    /// * `source` - Input lines, not yet read
    /// * `store` - Open store handle
    /// * `observer` - Optional progress callback, given the store count after each flush
    ///
    /// # Returns
    /// `Ok(LoadSummary)` when the whole input was inserted, or the first error
    pub fn run<R, S>(
        &self,
        mut source: LineSource<R>,
        store: &mut S,
        observer: Option<&mut dyn ProgressObserver>,
    ) -> Result<LoadSummary>
    where
        R: BufRead,
        S: DocumentStore + ?Sized,
    {
        let started = Instant::now();

        for column in self.schema.unsupported_columns() {
            log::warn!(
                "column {:?} has type {}; any row reaching it will fail",
                column.name,
                column.column_type
            );
        }

        let lines_skipped = source.skip(self.skip_lines)?;
        if lines_skipped > 0 {
            log::info!("skipped {} lines of {}", lines_skipped, source.path());
        }

        let mut inserter = BatchInserter::new(store, self.batch_size);
        if let Some(observer) = observer {
            inserter = inserter.with_observer(observer);
        }

        while let Some(line) = source.next_line()? {
            let line_number = source.line_number();
            log::trace!("line {}: {}", line_number, line);

            let row = tokenize(&line, self.separator);
            let document = assemble(&row, &self.schema).map_err(|e| e.at_line(line_number))?;
            inserter.add(document)?;
        }

        let stats = inserter.close()?;
        Ok(LoadSummary {
            lines_skipped,
            rows_loaded: stats.documents,
            batches: stats.batches,
            total_in_store: stats.last_count,
            elapsed: started.elapsed(),
        })
    }
}

/// Run a full load described by `config`
///
/// Validates the configuration and builds the schema before touching the
/// input, then opens the input before connecting to the store.
pub fn load(
    config: &LoadConfig,
    observer: Option<&mut dyn ProgressObserver>,
) -> Result<LoadSummary> {
    let loader = DocumentLoader::from_config(config)?;
    let source = LineSource::open(&config.input)?;

    let mut store = open_store(&config.target, &config.database, &config.collection)
        .map_err(LoadError::Connect)?;
    log::debug!(
        "opened {} store for {}.{}",
        store.name(),
        config.database,
        config.collection
    );

    loader.run(source, &mut *store, observer)
}
