//! CSV writing module for converted tables
//!
//! Handles creating the output directory, writing a `DataFrame` with a
//! header row, and printing a short preview of what was written.

use crate::error::{ProcessorError, Result};

use colored::*;
use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::debug;

/// CSV writer bound to one output file
#[derive(Debug, Clone)]
pub struct CsvTableWriter {
    output_path: PathBuf,
    preview_rows: usize,
}

impl CsvTableWriter {
    /// Create a new CSV writer
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
            preview_rows: 0,
        }
    }

    /// Print the first `rows` rows after a successful write
    pub fn with_preview(mut self, rows: usize) -> Self {
        self.preview_rows = rows;
        self
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Write the frame, creating parent directories as needed
    ///
    /// An empty frame still produces a file holding the header row.
    pub fn write(&self, df: &mut DataFrame) -> Result<usize> {
        self.ensure_parent_dir()?;

        let mut file = File::create(&self.output_path).map_err(|source| self.write_failed(source))?;

        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(df)
            .map_err(|e| self.write_failed(std::io::Error::other(e.to_string())))?;

        debug!(
            "Wrote {} rows x {} columns to {}",
            df.height(),
            df.width(),
            self.output_path.display()
        );

        if self.preview_rows > 0 {
            self.print_preview(df);
        }

        Ok(df.height())
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        match self.output_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent).map_err(|source| self.write_failed(source))
            }
            _ => Ok(()),
        }
    }

    fn print_preview(&self, df: &DataFrame) {
        println!(
            "\n{} {}",
            format!("--- First {} rows of", self.preview_rows).bright_black(),
            self.output_path.display().to_string().bright_black()
        );
        println!("{}", df.head(Some(self.preview_rows)));
    }

    fn write_failed(&self, source: std::io::Error) -> ProcessorError {
        ProcessorError::WriteFailed {
            path: self.output_path.clone(),
            source,
        }
    }
}
