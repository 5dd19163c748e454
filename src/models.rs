//! Core data structures for GHCN-D metadata processing.
//!
//! Defines the typed station and country records parsed from the raw
//! NOAA files, the joined record written to the combined tables, and the
//! statistics each conversion step reports.

use crate::constants::{COUNTRY_CODE_LEN, GSN_FLAG_VALUE};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One row of the GHCN-D station registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    /// 11-character station code, first two characters are the FIPS country code
    pub id: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Metres above sea level (-999.9 when unknown upstream)
    pub elevation: Option<f64>,
    /// U.S. state or Canadian province
    pub state: Option<String>,
    pub name: String,
    pub gsn_flag: Option<String>,
    pub hcn_crn_flag: Option<String>,
    pub wmo_id: Option<String>,
}

impl StationRecord {
    /// FIPS country code derived from the leading characters of the id
    pub fn country_code(&self) -> String {
        country_code_for(&self.id)
    }
}

/// Country code of a station id: its first two characters
pub fn country_code_for(id: &str) -> String {
    id.chars().take(COUNTRY_CODE_LEN).collect()
}

/// One entry of the GHCN-D country list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRecord {
    pub code: String,
    pub name: String,
}

impl CountryRecord {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// Station enriched with its country, as written to the combined table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedStationRecord {
    /// `None` when no country matched the code
    pub country_name: Option<String>,
    pub country_code: String,
    pub station: StationRecord,
}

impl CombinedStationRecord {
    /// GSN membership: flag present and equal to `GSN` once whitespace is stripped
    pub fn is_gsn(&self) -> bool {
        self.station
            .gsn_flag
            .as_deref()
            .is_some_and(|flag| flag.trim() == GSN_FLAG_VALUE)
    }
}

/// Statistics for the fixed-width station conversion
#[derive(Debug, Clone, Default)]
pub struct StationConversionStats {
    pub rows_written: usize,
    /// Lines that could not be turned into a record
    pub records_skipped: usize,
    pub output_path: PathBuf,
}

/// Statistics for the country list conversion
#[derive(Debug, Clone, Default)]
pub struct CountryConversionStats {
    pub rows_written: usize,
    pub output_path: PathBuf,
}

/// Statistics for the station/country join
#[derive(Debug, Clone, Default)]
pub struct CombineStats {
    pub rows_written: usize,
    /// Stations whose country code had no entry in the country table
    pub unmatched_stations: usize,
    /// Country rows ignored because an earlier row had the same code
    pub duplicate_country_codes: usize,
    pub output_path: PathBuf,
}

/// Statistics for the GSN filter
#[derive(Debug, Clone, Default)]
pub struct GsnFilterStats {
    pub rows_read: usize,
    pub rows_written: usize,
    pub output_path: PathBuf,
}

/// Statistics for the GSOY concatenation
#[derive(Debug, Clone, Default)]
pub struct ConcatStats {
    pub groups_visited: usize,
    pub files_read: usize,
    pub files_failed: usize,
    pub total_rows: usize,
    pub total_columns: usize,
    pub output_path: PathBuf,
}
