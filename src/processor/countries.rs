//! Country code list parsing
//!
//! `ghcnd-countries.txt` holds `<FIPS code> <country name>` per line. Only
//! the first run of whitespace separates the two, so multi-word names stay
//! intact.

use crate::error::{ProcessorError, Result};
use crate::models::{CountryConversionStats, CountryRecord};
use crate::processor::frames::countries_to_frame;
use crate::processor::writer::CsvTableWriter;

use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Parse one country line; blank lines yield `None`
pub fn parse_country_line(line: &str) -> Option<CountryRecord> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let (code, name) = match line.split_once(char::is_whitespace) {
        Some((code, rest)) => (code, rest.trim_start()),
        None => (line, ""),
    };

    Some(CountryRecord::new(code, name))
}

/// Parse the whole country list, keeping line order
pub fn parse_countries(text: &str) -> Vec<CountryRecord> {
    text.lines().filter_map(parse_country_line).collect()
}

/// Convert `ghcnd-countries.txt` into the country CSV
pub fn convert_countries_to_csv(
    input: &Path,
    writer: &CsvTableWriter,
) -> Result<CountryConversionStats> {
    if !input.exists() {
        return Err(ProcessorError::missing_input(input));
    }

    debug!("Parsing country list from {}", input.display());
    let text = fs::read_to_string(input)?;
    let countries = parse_countries(&text);

    let mut df = countries_to_frame(&countries)?;
    let rows_written = writer.write(&mut df)?;
    info!("Converted {} countries from {}", rows_written, input.display());

    Ok(CountryConversionStats {
        rows_written,
        output_path: writer.output_path().to_path_buf(),
    })
}
