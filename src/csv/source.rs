//! Line source
//!
//! Lazy, forward-only reader over the input lines. Lines can be skipped
//! before the first one is handed out; the source cannot be rewound.

use crate::error::{LoadError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Forward-only line reader
pub struct LineSource<R> {
    reader: R,
    buf: Vec<u8>,
    path: String,
    line_number: u64,
}

impl LineSource<BufReader<File>> {
    /// Open a file for reading
    ///
    /// # Returns
    /// `Err(LoadError::Io)` if the file cannot be opened
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let file = File::open(path).map_err(|e| LoadError::io(display.clone(), e))?;
        Ok(Self::with_name(BufReader::new(file), display))
    }
}

impl<R: BufRead> LineSource<R> {
    /// Wrap an existing buffered reader
    pub fn from_reader(reader: R) -> Self {
        Self::with_name(reader, "<reader>")
    }

    fn with_name(reader: R, path: impl Into<String>) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            path: path.into(),
            line_number: 0,
        }
    }

    /// Discard up to `n` lines
    ///
    /// Running out of input while skipping is not an error. Skipped lines
    /// are not decoded, so they may hold any bytes.
    ///
    /// # Returns
    /// The number of lines actually skipped
    pub fn skip(&mut self, n: u64) -> Result<u64> {
        let mut skipped = 0;
        while skipped < n {
            if !self.read_raw_line()? {
                break;
            }
            skipped += 1;
        }
        Ok(skipped)
    }

    /// Next line without its terminator, or `None` at end of input
    ///
    /// # Returns
    /// `Err(LoadError::Encoding)` with the line number if the line is not UTF-8
    pub fn next_line(&mut self) -> Result<Option<String>> {
        if !self.read_raw_line()? {
            return Ok(None);
        }
        match std::str::from_utf8(&self.buf) {
            Ok(line) => Ok(Some(line.to_owned())),
            Err(e) => Err(LoadError::Encoding {
                line: self.line_number,
                offset: e.valid_up_to(),
            }),
        }
    }

    // Fills `buf` with the next line minus "\n" / "\r\n"; false at end of input
    fn read_raw_line(&mut self) -> Result<bool> {
        self.buf.clear();
        let read = self
            .reader
            .read_until(b'\n', &mut self.buf)
            .map_err(|e| LoadError::io(self.path.clone(), e))?;
        if read == 0 {
            return Ok(false);
        }

        self.line_number += 1;
        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
        }
        if self.buf.last() == Some(&b'\r') {
            self.buf.pop();
        }
        Ok(true)
    }

    /// 1-based number of the last line returned
    pub fn line_number(&self) -> u64 {
        self.line_number
    }

    /// Name of the underlying input
    pub fn path(&self) -> &str {
        &self.path
    }
}
