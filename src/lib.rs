//! GHCN-D Processor Library
//!
//! A Rust library for turning NOAA Global Historical Climatology Network
//! Daily metadata into analysis-ready CSV tables.
//!
//! This library provides tools for:
//! - Parsing the fixed-width `ghcnd-stations.txt` registry
//! - Parsing the `ghcnd-countries.txt` code list
//! - Joining stations with country names through the FIPS prefix of their id
//! - Extracting Global Surface Network (GSN) stations
//! - Concatenating per-station Global Summary of the Year files whose
//!   columns differ
//!
//! Each step is exposed as a function returning [`Result`], and
//! [`processor::Pipeline`] chains them with continue-on-failure semantics.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod processor;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use config::PipelineConfig;
pub use error::{FailureKind, ProcessorError, Result};
pub use models::{CombinedStationRecord, CountryRecord, StationRecord};
pub use processor::{Pipeline, PipelineReport, Step, StepStatus};
