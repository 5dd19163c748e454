//! Conversion between typed records and polars `DataFrame`s.
//!
//! CSV tables are always read with every column as text so that station
//! ids, WMO numbers and flags keep their literal content. Typed fields are
//! parsed here, where a failure can be reported against a row number.

use crate::constants::columns;
use crate::error::{ProcessorError, Result};
use crate::models::{CombinedStationRecord, CountryRecord, StationRecord};

use polars::prelude::*;
use std::path::Path;
use tracing::debug;

/// Read a CSV file with a header row, every column as text
pub fn read_text_frame(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(ProcessorError::missing_input(path));
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    debug!(
        "Read {} rows x {} columns from {}",
        df.height(),
        df.width(),
        path.display()
    );
    Ok(df)
}

/// Build the station table, columns in registry order
pub fn stations_to_frame(records: &[StationRecord]) -> Result<DataFrame> {
    Ok(DataFrame::new(station_columns(records.iter()))?)
}

/// Build the country table
pub fn countries_to_frame(records: &[CountryRecord]) -> Result<DataFrame> {
    let codes: Vec<&str> = records.iter().map(|r| r.code.as_str()).collect();
    let names: Vec<Option<&str>> = records.iter().map(|r| empty_as_null(&r.name)).collect();

    Ok(DataFrame::new(vec![
        Column::new(columns::COUNTRY_CODE_FIPS.into(), codes),
        Column::new(columns::COUNTRY_NAME.into(), names),
    ])?)
}

/// Build the combined table from a station table and its joined records
///
/// `COUNTRY_NAME` and `COUNTRY_CODE_FIPS` lead; every column of `stations`
/// follows in its original order, extra columns included. `combined` must
/// hold one record per station row, in row order.
pub fn combined_to_frame(
    stations: &DataFrame,
    combined: &[CombinedStationRecord],
) -> Result<DataFrame> {
    if stations.height() != combined.len() {
        return Err(PolarsError::ShapeMismatch(
            format!(
                "{} joined records for {} station rows",
                combined.len(),
                stations.height()
            )
            .into(),
        )
        .into());
    }

    let names: Vec<Option<&str>> = combined
        .iter()
        .map(|r| r.country_name.as_deref().and_then(empty_as_null))
        .collect();
    let codes: Vec<&str> = combined.iter().map(|r| r.country_code.as_str()).collect();

    let mut frame_columns = vec![
        Column::new(columns::COUNTRY_NAME.into(), names),
        Column::new(columns::COUNTRY_CODE_FIPS.into(), codes),
    ];
    frame_columns.extend(
        stations
            .get_columns()
            .iter()
            .filter(|c| {
                let name = c.name().as_str();
                name != columns::COUNTRY_NAME && name != columns::COUNTRY_CODE_FIPS
            })
            .cloned(),
    );

    Ok(DataFrame::new(frame_columns)?)
}

fn station_columns<'a>(stations: impl Iterator<Item = &'a StationRecord> + Clone) -> Vec<Column> {
    let text = |f: fn(&'a StationRecord) -> Option<&'a str>| -> Vec<Option<&'a str>> {
        stations.clone().map(f).collect()
    };
    let decimal = |f: fn(&'a StationRecord) -> Option<f64>| -> Vec<Option<f64>> {
        stations.clone().map(f).collect()
    };

    vec![
        Column::new(columns::ID.into(), text(|s| Some(s.id.as_str()))),
        Column::new(columns::LATITUDE.into(), decimal(|s| s.latitude)),
        Column::new(columns::LONGITUDE.into(), decimal(|s| s.longitude)),
        Column::new(columns::ELEVATION.into(), decimal(|s| s.elevation)),
        Column::new(columns::STATE.into(), text(|s| s.state.as_deref())),
        Column::new(columns::NAME.into(), text(|s| empty_as_null(&s.name))),
        Column::new(columns::GSN_FLAG.into(), text(|s| s.gsn_flag.as_deref())),
        Column::new(
            columns::HCN_CRN_FLAG.into(),
            text(|s| s.hcn_crn_flag.as_deref()),
        ),
        Column::new(columns::WMO_ID.into(), text(|s| s.wmo_id.as_deref())),
    ]
}

/// Empty text is written as an empty field rather than a quoted `""`
fn empty_as_null(value: &str) -> Option<&str> {
    Some(value).filter(|v| !v.is_empty())
}

/// Read typed stations back from a station table
pub fn stations_from_frame(df: &DataFrame, path: &Path) -> Result<Vec<StationRecord>> {
    let station_cols = StationColumns::from_frame(df, path)?;
    (0..df.height())
        .map(|row| station_cols.record(row, path))
        .collect()
}

/// Read typed countries back from a country table
pub fn countries_from_frame(df: &DataFrame, path: &Path) -> Result<Vec<CountryRecord>> {
    let codes = text_column(df, path, columns::COUNTRY_CODE_FIPS)?;
    let names = text_column(df, path, columns::COUNTRY_NAME)?;

    codes
        .into_iter()
        .zip(names)
        .enumerate()
        .map(|(row, (code, name))| {
            let code = non_blank(code).ok_or_else(|| {
                ProcessorError::malformed(path, csv_line(row), "empty country code")
            })?;
            Ok(CountryRecord::new(code, name.unwrap_or_default()))
        })
        .collect()
}

/// Read typed combined records back from a combined table
pub fn combined_from_frame(df: &DataFrame, path: &Path) -> Result<Vec<CombinedStationRecord>> {
    let country_names = text_column(df, path, columns::COUNTRY_NAME)?;
    let country_codes = text_column(df, path, columns::COUNTRY_CODE_FIPS)?;
    let station_cols = StationColumns::from_frame(df, path)?;

    (0..df.height())
        .map(|row| {
            let station = station_cols.record(row, path)?;
            let country_code = non_blank(country_codes[row]).unwrap_or_else(|| station.country_code());
            Ok(CombinedStationRecord {
                country_name: non_blank(country_names[row]),
                country_code,
                station,
            })
        })
        .collect()
}

/// Borrowed text columns of a station table
struct StationColumns<'a> {
    id: Vec<Option<&'a str>>,
    latitude: Vec<Option<&'a str>>,
    longitude: Vec<Option<&'a str>>,
    elevation: Vec<Option<&'a str>>,
    state: Vec<Option<&'a str>>,
    name: Vec<Option<&'a str>>,
    gsn_flag: Vec<Option<&'a str>>,
    hcn_crn_flag: Vec<Option<&'a str>>,
    wmo_id: Vec<Option<&'a str>>,
}

impl<'a> StationColumns<'a> {
    fn from_frame(df: &'a DataFrame, path: &Path) -> Result<Self> {
        Ok(Self {
            id: text_column(df, path, columns::ID)?,
            latitude: text_column(df, path, columns::LATITUDE)?,
            longitude: text_column(df, path, columns::LONGITUDE)?,
            elevation: text_column(df, path, columns::ELEVATION)?,
            state: text_column(df, path, columns::STATE)?,
            name: text_column(df, path, columns::NAME)?,
            gsn_flag: text_column(df, path, columns::GSN_FLAG)?,
            hcn_crn_flag: text_column(df, path, columns::HCN_CRN_FLAG)?,
            wmo_id: text_column(df, path, columns::WMO_ID)?,
        })
    }

    fn record(&self, row: usize, path: &Path) -> Result<StationRecord> {
        let line = csv_line(row);
        let id = non_blank(self.id[row])
            .ok_or_else(|| ProcessorError::malformed(path, line, "empty station id"))?;

        let decimal = |value: Option<&str>, column: &str| {
            parse_decimal(value)
                .map_err(|reason| ProcessorError::malformed(path, line, format!("{column}: {reason}")))
        };

        Ok(StationRecord {
            latitude: decimal(self.latitude[row], columns::LATITUDE)?,
            longitude: decimal(self.longitude[row], columns::LONGITUDE)?,
            elevation: decimal(self.elevation[row], columns::ELEVATION)?,
            state: non_blank(self.state[row]),
            name: self.name[row].unwrap_or_default().trim().to_string(),
            gsn_flag: non_blank(self.gsn_flag[row]),
            hcn_crn_flag: non_blank(self.hcn_crn_flag[row]),
            wmo_id: non_blank(self.wmo_id[row]),
            id,
        })
    }
}

/// Values of a text column, or `MissingColumn` when the header lacks it
fn text_column<'a>(df: &'a DataFrame, path: &Path, name: &str) -> Result<Vec<Option<&'a str>>> {
    let column = df.column(name).map_err(|_| ProcessorError::MissingColumn {
        path: path.to_path_buf(),
        column: name.to_string(),
    })?;

    let values = column.as_materialized_series().str()?;
    Ok(values.into_iter().collect())
}

/// Parse an optional decimal; blank means missing, anything else must be numeric
pub(crate) fn parse_decimal(value: Option<&str>) -> std::result::Result<Option<f64>, String> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text
            .parse::<f64>()
            .map(Some)
            .map_err(|_| format!("invalid decimal '{text}'")),
    }
}

/// Keep a value only if it has non-whitespace content; content is not trimmed
pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
}

/// 1-based file line of a data row (line 1 is the header)
fn csv_line(row: usize) -> usize {
    row + 2
}
