//! Station/country join
//!
//! Every station keeps its row (left outer join). The country code is the
//! id prefix; when the country table repeats a code the first entry wins.
//! The written table carries the station CSV's own columns, in their
//! original order, after `COUNTRY_NAME` and `COUNTRY_CODE_FIPS`.

use crate::error::{ProcessorError, Result};
use crate::models::{CombineStats, CombinedStationRecord, CountryRecord, StationRecord};
pub use crate::models::country_code_for;
use crate::processor::frames::{
    combined_to_frame, countries_from_frame, read_text_frame, stations_from_frame,
};
use crate::processor::writer::CsvTableWriter;

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::Path;
use tracing::{debug, info, warn};

/// Lookup from FIPS code to country name, first occurrence wins
#[derive(Debug, Default)]
pub struct CountryIndex {
    names: HashMap<String, String>,
    duplicates: Vec<String>,
}

impl CountryIndex {
    pub fn from_records(countries: &[CountryRecord]) -> Self {
        let mut index = Self::default();

        for country in countries {
            match index.names.entry(country.code.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(country.name.clone());
                }
                Entry::Occupied(existing) => {
                    debug!(
                        "Ignoring duplicate country code {} ('{}'), keeping '{}'",
                        country.code,
                        country.name,
                        existing.get()
                    );
                    index.duplicates.push(country.code.clone());
                }
            }
        }

        index
    }

    pub fn name_for(&self, code: &str) -> Option<&str> {
        self.names.get(code).map(String::as_str)
    }

    /// Codes that appeared more than once, in the order they were ignored
    pub fn duplicate_codes(&self) -> &[String] {
        &self.duplicates
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Left-join stations onto countries, preserving station order
pub fn combine_records(
    stations: &[StationRecord],
    countries: &[CountryRecord],
) -> Vec<CombinedStationRecord> {
    let index = CountryIndex::from_records(countries);
    join_with_index(stations, &index)
}

fn join_with_index(stations: &[StationRecord], index: &CountryIndex) -> Vec<CombinedStationRecord> {
    stations
        .iter()
        .map(|station| {
            let country_code = station.country_code();
            CombinedStationRecord {
                country_name: index.name_for(&country_code).map(str::to_string),
                country_code,
                station: station.clone(),
            }
        })
        .collect()
}

/// Join the station CSV with the country CSV and write the combined table
///
/// Both inputs are checked before anything is read, so a missing file
/// leaves no output behind.
pub fn combine_stations_with_countries(
    stations_csv: &Path,
    countries_csv: &Path,
    writer: &CsvTableWriter,
) -> Result<CombineStats> {
    for input in [stations_csv, countries_csv] {
        if !input.exists() {
            return Err(ProcessorError::missing_input(input));
        }
    }

    let station_frame = read_text_frame(stations_csv)?;
    let stations = stations_from_frame(&station_frame, stations_csv)?;
    let countries = countries_from_frame(&read_text_frame(countries_csv)?, countries_csv)?;

    let index = CountryIndex::from_records(&countries);
    if !index.duplicate_codes().is_empty() {
        warn!(
            "{} duplicate country codes in {}; first entry kept for each",
            index.duplicate_codes().len(),
            countries_csv.display()
        );
    }

    let combined = join_with_index(&stations, &index);
    let unmatched_stations = combined.iter().filter(|r| r.country_name.is_none()).count();
    if unmatched_stations > 0 {
        warn!("{} stations have no matching country code", unmatched_stations);
    }

    let mut df = combined_to_frame(&station_frame, &combined)?;
    let rows_written = writer.write(&mut df)?;

    info!(
        "Combined {} stations with {} countries",
        rows_written,
        index.len()
    );

    Ok(CombineStats {
        rows_written,
        unmatched_stations,
        duplicate_country_codes: index.duplicate_codes().len(),
        output_path: writer.output_path().to_path_buf(),
    })
}
