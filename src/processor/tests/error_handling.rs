//! Failure handling across steps

use super::{create_raw_layout, write_file};
use crate::config::PipelineConfig;
use crate::error::{FailureKind, ProcessorError};
use crate::processor::{Pipeline, Step, StepStatus};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_missing_station_file_does_not_halt_chain() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_raw_layout(&temp_dir);
    fs::remove_file(&config.stations.stations_txt).unwrap();

    let report = Pipeline::new(config.clone()).run(&Step::STATION_CHAIN);

    assert!(!report.succeeded());
    let kinds: Vec<Option<FailureKind>> =
        report.steps.iter().map(|s| s.failure_kind()).collect();
    assert_eq!(
        kinds,
        vec![
            Some(FailureKind::MissingInput),
            None,
            Some(FailureKind::MissingInput),
            Some(FailureKind::MissingInput),
        ]
    );

    // The country step still ran to completion
    assert!(config.stations.countries_csv.exists());
    assert!(!config.stations.combined_csv.exists());
    assert!(!config.stations.gsn_csv.exists());
}

#[test]
fn test_missing_input_names_the_path() {
    let temp_dir = TempDir::new().unwrap();
    let config = PipelineConfig::for_data_dir(temp_dir.path().join("empty"))
        .with_preview_rows(0)
        .without_progress();

    let report = Pipeline::new(config.clone()).run(&[Step::GsnFilter]);

    match &report.step(Step::GsnFilter).unwrap().status {
        StepStatus::Failed(ProcessorError::MissingInput { path }) => {
            assert_eq!(path, &config.stations.combined_csv);
        }
        other => panic!("Expected MissingInput, got {:?}", other),
    }
}

#[test]
fn test_malformed_station_line_is_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_raw_layout(&temp_dir);
    write_file(
        &config.stations.stations_txt,
        "ACW00011604  17.1167  -61.7833   10.1    ST JOHNS COOLIDGE FLD\n\
         BAD00000001  notanum  -61.7833   10.1    BROKEN\n\
         USC00011084  31.0581  -87.0547   25.9 AL BREWTON 3 SSE                  GSN HCN 72223\n",
    );

    let stats = Pipeline::new(config).convert_stations().unwrap();

    assert_eq!(stats.rows_written, 2);
    assert_eq!(stats.records_skipped, 1);
}

#[test]
fn test_malformed_combined_row_fails_gsn_step() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_raw_layout(&temp_dir);
    write_file(
        &config.stations.combined_csv,
        "COUNTRY_NAME,COUNTRY_CODE_FIPS,ID,LATITUDE,LONGITUDE,ELEVATION,STATE,NAME,GSN_FLAG,HCN_CRN_FLAG,WMO_ID\n\
         United States,US,USC00011084,north,-87.0547,25.9,AL,BREWTON 3 SSE,GSN,HCN,72223\n",
    );

    let report = Pipeline::new(config.clone()).run(&[Step::GsnFilter]);

    let step = report.step(Step::GsnFilter).unwrap();
    assert_eq!(step.failure_kind(), Some(FailureKind::Processing));
    assert!(matches!(
        step.status,
        StepStatus::Failed(ProcessorError::MalformedRecord { line: 2, .. })
    ));
    assert!(!config.stations.gsn_csv.exists());
}

#[test]
fn test_missing_column_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_raw_layout(&temp_dir);
    write_file(&config.stations.stations_csv, "ID,NAME\nUSC00011084,BREWTON\n");
    write_file(
        &config.stations.countries_csv,
        "COUNTRY_CODE_FIPS,COUNTRY_NAME\nUS,United States\n",
    );

    let result = Pipeline::new(config).combine();

    match result {
        Err(ProcessorError::MissingColumn { column, .. }) => assert_eq!(column, "LATITUDE"),
        other => panic!("Expected MissingColumn, got {:?}", other),
    }
}

#[test]
fn test_unwritable_output_is_a_write_failure() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_raw_layout(&temp_dir);
    // A regular file where the output directory should be
    let blocker = temp_dir.path().join("blocker");
    fs::write(&blocker, "").unwrap();
    let config = config.with_countries_csv(blocker.join("countries.csv"));

    let report = Pipeline::new(config).run(&[Step::Countries]);

    assert_eq!(
        report.step(Step::Countries).unwrap().failure_kind(),
        Some(FailureKind::Write)
    );
}
