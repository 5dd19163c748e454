//! Multi-step tests for the processor module
//!
//! Runs the conversion chain over small GHCN-D fixtures laid out the way
//! the download tooling leaves them under a data directory.

pub mod error_handling;

use crate::config::PipelineConfig;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub const STATIONS_TXT: &str = "\
ACW00011604  17.1167  -61.7833   10.1    ST JOHNS COOLIDGE FLD
AE000041196  25.3330   55.5170   34.0    SHARJAH INTER. AIRP            GSN     41196
USC00011084  31.0581  -87.0547   25.9 AL BREWTON 3 SSE                  GSN HCN 72223
";

pub const COUNTRIES_TXT: &str = "\
AC Antigua and Barbuda
AE United Arab Emirates
US United States
";

/// Data directory with both raw metadata files in place
pub fn create_raw_layout(temp_dir: &TempDir) -> PipelineConfig {
    let config = PipelineConfig::for_data_dir(temp_dir.path().join("data"))
        .with_preview_rows(0)
        .without_progress();

    write_file(&config.stations.stations_txt, STATIONS_TXT);
    write_file(&config.stations.countries_txt, COUNTRIES_TXT);
    config
}

pub fn write_file(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}
