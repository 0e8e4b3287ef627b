// src/utils/csv.rs

//! CSV file writing.
//!
//! Thin wrapper over the `csv` crate that owns the output path, creates the
//! containing directory, and makes the final flush explicit.

use std::fs::File;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Writer for one delimited output file.
pub struct CsvWriter {
    writer: csv::Writer<File>,
    path: PathBuf,
}

impl CsvWriter {
    /// Create the output directory if needed and open a writer for
    /// `dir/filename`.
    pub fn create(dir: impl AsRef<Path>, filename: &str) -> Result<Self> {
        std::fs::create_dir_all(dir.as_ref())?;
        let path = dir.as_ref().join(filename);
        let writer = csv::Writer::from_path(&path)?;
        Ok(Self { writer, path })
    }

    /// Write one record (header or data row).
    pub fn write_row<I, S>(&mut self, row: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        self.writer.write_record(row)?;
        Ok(())
    }

    /// Flush buffered rows and return the output path.
    ///
    /// Dropping the writer also flushes, so an early error return still
    /// leaves a closed file behind; calling this surfaces flush errors.
    pub fn finish(mut self) -> Result<PathBuf> {
        self.writer.flush()?;
        Ok(self.path)
    }

    /// Path of the file being written.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
