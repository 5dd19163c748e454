//! Fixed-width station registry parsing
//!
//! `ghcnd-stations.txt` stores one station per line with every field at a
//! fixed byte offset (see [`station_layout`]). Lines shorter than the last
//! offset simply have missing trailing fields. A line whose numeric fields
//! cannot be parsed is skipped and reported; it never aborts the file.

use crate::constants::station_layout::{self, FieldSpan};
use crate::error::{ProcessorError, Result};
use crate::models::{StationConversionStats, StationRecord};
use crate::processor::frames::{non_blank, parse_decimal, stations_to_frame};
use crate::processor::writer::CsvTableWriter;

use std::borrow::Cow;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// A line that could not be turned into a [`StationRecord`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordError {
    /// 1-based line number in the source file
    pub line: usize,
    pub reason: String,
}

/// Result of parsing a whole registry file
#[derive(Debug, Default)]
pub struct ParsedStations {
    pub records: Vec<StationRecord>,
    pub errors: Vec<RecordError>,
}

/// Slice a field out of a line; out-of-range spans yield an empty field
fn field(line: &str, span: FieldSpan) -> Cow<'_, str> {
    let bytes = line.as_bytes();
    let start = span.start.min(bytes.len());
    let end = span.end.min(bytes.len());
    String::from_utf8_lossy(&bytes[start..end])
}

/// Parse one registry line
///
/// The id is the literal first 11 bytes; only the name is trimmed.
pub fn parse_station_line(line: &str) -> std::result::Result<StationRecord, String> {
    let id = field(line, station_layout::ID);
    if id.trim().is_empty() {
        return Err("empty station id".to_string());
    }

    let decimal = |span: FieldSpan, label: &str| {
        parse_decimal(Some(&*field(line, span))).map_err(|reason| format!("{label}: {reason}"))
    };

    Ok(StationRecord {
        id: id.into_owned(),
        latitude: decimal(station_layout::LATITUDE, "latitude")?,
        longitude: decimal(station_layout::LONGITUDE, "longitude")?,
        elevation: decimal(station_layout::ELEVATION, "elevation")?,
        state: non_blank(Some(&*field(line, station_layout::STATE))),
        name: field(line, station_layout::NAME).trim().to_string(),
        gsn_flag: non_blank(Some(&*field(line, station_layout::GSN_FLAG))),
        hcn_crn_flag: non_blank(Some(&*field(line, station_layout::HCN_CRN_FLAG))),
        wmo_id: non_blank(Some(&*field(line, station_layout::WMO_ID))),
    })
}

/// Parse registry text, keeping line order and collecting per-line errors
pub fn parse_stations(text: &str) -> ParsedStations {
    let mut parsed = ParsedStations::default();

    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        match parse_station_line(line) {
            Ok(record) => parsed.records.push(record),
            Err(reason) => parsed.errors.push(RecordError {
                line: index + 1,
                reason,
            }),
        }
    }

    parsed
}

/// Convert `ghcnd-stations.txt` into the station CSV
pub fn convert_stations_to_csv(
    input: &Path,
    writer: &CsvTableWriter,
) -> Result<StationConversionStats> {
    if !input.exists() {
        return Err(ProcessorError::missing_input(input));
    }

    debug!("Parsing fixed-width stations from {}", input.display());
    let text = fs::read_to_string(input)?;
    let parsed = parse_stations(&text);

    for error in &parsed.errors {
        warn!(
            "Skipping station at {}:{}: {}",
            input.display(),
            error.line,
            error.reason
        );
    }

    let mut df = stations_to_frame(&parsed.records)?;
    let rows_written = writer.write(&mut df)?;

    info!(
        "Converted {} stations from {} ({} skipped)",
        rows_written,
        input.display(),
        parsed.errors.len()
    );

    Ok(StationConversionStats {
        rows_written,
        records_skipped: parsed.errors.len(),
        output_path: writer.output_path().to_path_buf(),
    })
}
