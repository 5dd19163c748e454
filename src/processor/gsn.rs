//! GSN station filter
//!
//! Keeps the combined rows whose `GSN_FLAG` is `GSN` after stripping
//! surrounding whitespace. Matching is case-sensitive. Rows are selected
//! from the input table itself, so every column passes through unchanged.

use crate::error::{ProcessorError, Result};
use crate::models::{CombinedStationRecord, GsnFilterStats};
use crate::processor::frames::{combined_from_frame, read_text_frame};
use crate::processor::writer::CsvTableWriter;

use polars::prelude::{BooleanChunked, NewChunkedArray};
use std::path::Path;
use tracing::info;

pub fn is_gsn_station(record: &CombinedStationRecord) -> bool {
    record.is_gsn()
}

/// Keep GSN stations, preserving their relative order
pub fn filter_gsn(records: Vec<CombinedStationRecord>) -> Vec<CombinedStationRecord> {
    records.into_iter().filter(is_gsn_station).collect()
}

/// Filter the combined table down to GSN stations
///
/// No match is not an error: the output then holds only the header row.
pub fn filter_gsn_stations(input: &Path, writer: &CsvTableWriter) -> Result<GsnFilterStats> {
    if !input.exists() {
        return Err(ProcessorError::missing_input(input));
    }

    let frame = read_text_frame(input)?;
    let combined = combined_from_frame(&frame, input)?;
    let rows_read = combined.len();

    let keep: Vec<bool> = combined.iter().map(is_gsn_station).collect();
    let mask = BooleanChunked::from_slice("gsn".into(), &keep);
    let mut df = frame.filter(&mask)?;
    let rows_written = writer.write(&mut df)?;

    info!(
        "Found {} GSN stations among {} in {}",
        rows_written,
        rows_read,
        input.display()
    );

    Ok(GsnFilterStats {
        rows_read,
        rows_written,
        output_path: writer.output_path().to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StationRecord;
    use std::fs;
    use tempfile::TempDir;

    const HEADER: &str = "COUNTRY_NAME,COUNTRY_CODE_FIPS,ID,LATITUDE,LONGITUDE,ELEVATION,STATE,NAME,GSN_FLAG,HCN_CRN_FLAG,WMO_ID";

    fn combined(id: &str, gsn_flag: Option<&str>) -> CombinedStationRecord {
        CombinedStationRecord {
            country_name: Some("Antigua and Barbuda".to_string()),
            country_code: "AC".to_string(),
            station: StationRecord {
                id: id.to_string(),
                latitude: Some(17.1167),
                longitude: Some(-61.7833),
                elevation: Some(10.1),
                state: None,
                name: "ST JOHNS".to_string(),
                gsn_flag: gsn_flag.map(str::to_string),
                hcn_crn_flag: None,
                wmo_id: None,
            },
        }
    }

    #[test]
    fn test_filter_predicate() {
        assert!(is_gsn_station(&combined("A1", Some(" GSN "))));
        assert!(!is_gsn_station(&combined("A2", Some("HCN"))));
        assert!(!is_gsn_station(&combined("A3", None)));
    }

    #[test]
    fn test_filter_keeps_order() {
        let kept = filter_gsn(vec![
            combined("A1", Some("GSN")),
            combined("A2", Some("HCN")),
            combined("A3", Some("GSN ")),
            combined("A4", None),
        ]);

        let ids: Vec<&str> = kept.iter().map(|r| r.station.id.as_str()).collect();
        assert_eq!(ids, vec!["A1", "A3"]);
    }

    #[test]
    fn test_filter_file_with_padded_flag() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("combined.csv");
        let output = temp_dir.path().join("gsn.csv");
        fs::write(
            &input,
            format!(
                "{HEADER}\n\
                 United Arab Emirates,AE,AE000041196,25.333,55.517,34.0,,SHARJAH INTER. AIRP, GSN ,,41196\n\
                 United States,US,USC00011084,31.0581,-87.0547,25.9,AL,BREWTON 3 SSE,,HCN,\n"
            ),
        )
        .unwrap();

        let stats = filter_gsn_stations(&input, &CsvTableWriter::new(&output)).unwrap();

        assert_eq!(stats.rows_read, 2);
        assert_eq!(stats.rows_written, 1);
        let content = fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], HEADER);
        assert!(lines[1].contains("AE000041196"));
    }

    #[test]
    fn test_filter_keeps_every_input_column() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("combined.csv");
        let output = temp_dir.path().join("gsn.csv");
        let header = "COUNTRY_NAME,COUNTRY_CODE_FIPS,NAME,ID,LATITUDE,LONGITUDE,ELEVATION,STATE,GSN_FLAG,HCN_CRN_FLAG,WMO_ID,SOURCE";
        fs::write(
            &input,
            format!(
                "{header}
                 United States,US,BREWTON 3 SSE,USC00011084,31.0581,-87.0547,25.9,AL,,HCN,,coop
                 United Arab Emirates,AE,SHARJAH INTER. AIRP,AE000041196,25.3330,55.5170,34.0,,GSN,,41196,synop
"
            ),
        )
        .unwrap();

        let stats = filter_gsn_stations(&input, &CsvTableWriter::new(&output)).unwrap();

        assert_eq!(stats.rows_written, 1);
        let content = fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], header);
        assert_eq!(
            lines[1],
            "United Arab Emirates,AE,SHARJAH INTER. AIRP,AE000041196,25.3330,55.5170,34.0,,GSN,,41196,synop"
        );
    }

    #[test]
    fn test_no_match_writes_header_only() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("combined.csv");
        let output = temp_dir.path().join("gsn.csv");
        fs::write(
            &input,
            format!("{HEADER}\nUnited States,US,USC00011084,31.0581,-87.0547,25.9,AL,BREWTON 3 SSE,,HCN,\n"),
        )
        .unwrap();

        let stats = filter_gsn_stations(&input, &CsvTableWriter::new(&output)).unwrap();

        assert_eq!(stats.rows_written, 0);
        let content = fs::read_to_string(&output).unwrap();
        assert_eq!(content.trim_end(), HEADER);
    }

    #[test]
    fn test_missing_combined_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = filter_gsn_stations(
            &temp_dir.path().join("absent.csv"),
            &CsvTableWriter::new(temp_dir.path().join("gsn.csv")),
        );
        assert!(matches!(result, Err(ProcessorError::MissingInput { .. })));
    }
}
