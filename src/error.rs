//! Error handling for GHCN-D conversion steps.
//!
//! Each transform returns these errors instead of printing and bailing, so
//! the pipeline can decide whether to continue with the next step.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Input file not found: {path}")]
    MissingInput { path: PathBuf },

    #[error("Malformed record in {path} at line {line}: {reason}")]
    MalformedRecord {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("Required column '{column}' missing from {path}")]
    MissingColumn { path: PathBuf, column: String },

    #[error("Failed to write output {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Coarse failure category used for user-facing status lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    MissingInput,
    Processing,
    Write,
}

impl FailureKind {
    pub fn label(&self) -> &'static str {
        match self {
            FailureKind::MissingInput => "Missing input",
            FailureKind::Processing => "Processing error",
            FailureKind::Write => "Write error",
        }
    }
}

impl ProcessorError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ProcessorError::MissingInput { .. } => FailureKind::MissingInput,
            ProcessorError::WriteFailed { .. } => FailureKind::Write,
            _ => FailureKind::Processing,
        }
    }

    pub fn missing_input(path: impl Into<PathBuf>) -> Self {
        Self::MissingInput { path: path.into() }
    }

    pub fn malformed(path: impl Into<PathBuf>, line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            path: path.into(),
            line,
            reason: reason.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProcessorError>;
