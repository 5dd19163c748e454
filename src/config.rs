//! Configuration management and validation.
//!
//! Every input and output location used by the conversion steps is derived
//! from a single data directory, mirroring the `raw/` → `interim/` →
//! `processed/` layout the GHCN-D download tooling produces. Individual
//! paths can then be overridden from the command line.

use crate::constants::{DEFAULT_PREVIEW_ROWS, default_paths};
use crate::error::{ProcessorError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File locations for the station metadata steps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationPaths {
    /// Fixed-width `ghcnd-stations.txt`
    pub stations_txt: PathBuf,

    /// Station registry converted to CSV
    pub stations_csv: PathBuf,

    /// Whitespace-delimited `ghcnd-countries.txt`
    pub countries_txt: PathBuf,

    /// Country list converted to CSV
    pub countries_csv: PathBuf,

    /// Stations joined with country names
    pub combined_csv: PathBuf,

    /// GSN subset of the combined table
    pub gsn_csv: PathBuf,
}

/// File locations for the GSOY concatenation step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GsoyPaths {
    /// Root holding one directory per country
    pub input_dir: PathBuf,

    /// Unified output table
    pub output_csv: PathBuf,
}

/// Global configuration for a processing run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub data_dir: PathBuf,

    pub stations: StationPaths,

    pub gsoy: GsoyPaths,

    /// Rows printed after each table is written (0 disables previews)
    pub preview_rows: usize,

    /// Show spinners while reading many files
    pub show_progress: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::for_data_dir(default_paths::DATA_DIR)
    }
}

impl PipelineConfig {
    /// Build the default layout rooted at `data_dir`
    pub fn for_data_dir(data_dir: impl AsRef<Path>) -> Self {
        let root = data_dir.as_ref();

        Self {
            data_dir: root.to_path_buf(),
            stations: StationPaths {
                stations_txt: root.join(default_paths::STATIONS_TXT),
                stations_csv: root.join(default_paths::STATIONS_CSV),
                countries_txt: root.join(default_paths::COUNTRIES_TXT),
                countries_csv: root.join(default_paths::COUNTRIES_CSV),
                combined_csv: root.join(default_paths::COMBINED_CSV),
                gsn_csv: root.join(default_paths::GSN_CSV),
            },
            gsoy: GsoyPaths {
                input_dir: root.join(default_paths::GSOY_DIR),
                output_csv: root.join(default_paths::GSOY_CSV),
            },
            preview_rows: DEFAULT_PREVIEW_ROWS,
            show_progress: true,
        }
    }

    pub fn with_stations_txt(mut self, path: PathBuf) -> Self {
        self.stations.stations_txt = path;
        self
    }

    pub fn with_stations_csv(mut self, path: PathBuf) -> Self {
        self.stations.stations_csv = path;
        self
    }

    pub fn with_countries_txt(mut self, path: PathBuf) -> Self {
        self.stations.countries_txt = path;
        self
    }

    pub fn with_countries_csv(mut self, path: PathBuf) -> Self {
        self.stations.countries_csv = path;
        self
    }

    pub fn with_combined_csv(mut self, path: PathBuf) -> Self {
        self.stations.combined_csv = path;
        self
    }

    pub fn with_gsn_csv(mut self, path: PathBuf) -> Self {
        self.stations.gsn_csv = path;
        self
    }

    pub fn with_gsoy_input_dir(mut self, path: PathBuf) -> Self {
        self.gsoy.input_dir = path;
        self
    }

    pub fn with_gsoy_output_csv(mut self, path: PathBuf) -> Self {
        self.gsoy.output_csv = path;
        self
    }

    pub fn with_preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = rows;
        self
    }

    /// Disable progress spinners (quiet mode, tests)
    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Reject layouts where a step would overwrite one of its own inputs
    pub fn validate(&self) -> Result<()> {
        let s = &self.stations;
        let clashes = [
            (&s.stations_txt, &s.stations_csv, "station input and output"),
            (&s.countries_txt, &s.countries_csv, "country input and output"),
            (&s.stations_csv, &s.combined_csv, "station CSV and combined output"),
            (&s.countries_csv, &s.combined_csv, "country CSV and combined output"),
            (&s.combined_csv, &s.gsn_csv, "combined CSV and GSN output"),
        ];

        for (input, output, what) in clashes {
            if input == output {
                return Err(ProcessorError::configuration(format!(
                    "{} share the same path: {}",
                    what,
                    input.display()
                )));
            }
        }

        // The unified file must not be picked up by its own discovery pass
        if self.gsoy.output_csv.starts_with(&self.gsoy.input_dir) {
            return Err(ProcessorError::configuration(format!(
                "GSOY output {} lies inside the input directory {}",
                self.gsoy.output_csv.display(),
                self.gsoy.input_dir.display()
            )));
        }

        debug!("Configuration validated for data dir {}", self.data_dir.display());
        Ok(())
    }
}
