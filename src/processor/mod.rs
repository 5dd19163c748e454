//! Conversion steps and their orchestration.
//!
//! Each step is an independent, fallible transform from input files to one
//! output CSV. [`Pipeline`] runs the requested steps in the given order,
//! prints a status line per step, and keeps going after a failure: a step
//! whose input was never produced fails on its own with `MissingInput`.

pub mod combine;
pub mod concat;
pub mod countries;
pub mod discovery;
pub mod frames;
pub mod gsn;
pub mod stations;
pub mod writer;

#[cfg(test)]
pub mod tests;

use self::concat::ConcatOutcome;
use self::writer::CsvTableWriter;

use crate::config::PipelineConfig;
use crate::error::{FailureKind, ProcessorError, Result};
use crate::models::{
    CombineStats, CountryConversionStats, GsnFilterStats, StationConversionStats,
};

use colored::*;
use std::fmt;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// One conversion step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Stations,
    Countries,
    Combine,
    GsnFilter,
    Gsoy,
}

impl Step {
    /// The station metadata chain in dependency order
    pub const STATION_CHAIN: [Step; 4] = [
        Step::Stations,
        Step::Countries,
        Step::Combine,
        Step::GsnFilter,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Step::Stations => "Station registry conversion",
            Step::Countries => "Country list conversion",
            Step::Combine => "Station/country combination",
            Step::GsnFilter => "GSN station filter",
            Step::Gsoy => "GSOY concatenation",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a step ended
#[derive(Debug)]
pub enum StepStatus {
    Succeeded { summary: String },
    /// Nothing to do; not a failure, nothing written
    NoInput { summary: String },
    Failed(ProcessorError),
}

#[derive(Debug)]
pub struct StepReport {
    pub step: Step,
    pub status: StepStatus,
    pub elapsed: Duration,
}

impl StepReport {
    pub fn is_failure(&self) -> bool {
        matches!(self.status, StepStatus::Failed(_))
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match &self.status {
            StepStatus::Failed(e) => Some(e.kind()),
            _ => None,
        }
    }
}

/// Outcome of a pipeline run
#[derive(Debug, Default)]
pub struct PipelineReport {
    pub steps: Vec<StepReport>,
    pub elapsed: Duration,
}

impl PipelineReport {
    pub fn succeeded(&self) -> bool {
        self.steps.iter().all(|s| !s.is_failure())
    }

    pub fn failures(&self) -> impl Iterator<Item = &StepReport> {
        self.steps.iter().filter(|s| s.is_failure())
    }

    pub fn step(&self, step: Step) -> Option<&StepReport> {
        self.steps.iter().find(|s| s.step == step)
    }
}

/// Runs conversion steps against a [`PipelineConfig`]
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    fn writer(&self, output: &Path) -> CsvTableWriter {
        CsvTableWriter::new(output).with_preview(self.config.preview_rows)
    }

    pub fn convert_stations(&self) -> Result<StationConversionStats> {
        let paths = &self.config.stations;
        stations::convert_stations_to_csv(&paths.stations_txt, &self.writer(&paths.stations_csv))
    }

    pub fn convert_countries(&self) -> Result<CountryConversionStats> {
        let paths = &self.config.stations;
        countries::convert_countries_to_csv(
            &paths.countries_txt,
            &self.writer(&paths.countries_csv),
        )
    }

    pub fn combine(&self) -> Result<CombineStats> {
        let paths = &self.config.stations;
        combine::combine_stations_with_countries(
            &paths.stations_csv,
            &paths.countries_csv,
            &self.writer(&paths.combined_csv),
        )
    }

    pub fn filter_gsn(&self) -> Result<GsnFilterStats> {
        let paths = &self.config.stations;
        gsn::filter_gsn_stations(&paths.combined_csv, &self.writer(&paths.gsn_csv))
    }

    pub fn concat_gsoy(&self) -> Result<ConcatOutcome> {
        let paths = &self.config.gsoy;
        concat::combine_grouped_csvs(
            &paths.input_dir,
            &self.writer(&paths.output_csv),
            self.config.show_progress,
        )
    }

    /// Run a single step and report its status
    pub fn execute(&self, step: Step) -> StepReport {
        let start = Instant::now();
        debug!("Starting step: {}", step);

        let status = match step {
            Step::Stations => self.convert_stations().map(|s| {
                let mut summary = format!(
                    "wrote {} stations to {}",
                    s.rows_written,
                    s.output_path.display()
                );
                if s.records_skipped > 0 {
                    summary.push_str(&format!(" ({} malformed lines skipped)", s.records_skipped));
                }
                summary
            }),
            Step::Countries => self.convert_countries().map(|s| {
                format!(
                    "wrote {} countries to {}",
                    s.rows_written,
                    s.output_path.display()
                )
            }),
            Step::Combine => self.combine().map(|s| {
                format!(
                    "wrote {} stations to {} ({} without a country match)",
                    s.rows_written,
                    s.output_path.display(),
                    s.unmatched_stations
                )
            }),
            Step::GsnFilter => self.filter_gsn().map(|s| {
                format!(
                    "found {} GSN stations among {}, saved to {}",
                    s.rows_written,
                    s.rows_read,
                    s.output_path.display()
                )
            }),
            Step::Gsoy => {
                return self.finish(step, start, self.concat_gsoy().map(gsoy_status));
            }
        };

        let status = status.map(|summary| StepStatus::Succeeded { summary });
        self.finish(step, start, status)
    }

    fn finish(&self, step: Step, start: Instant, status: Result<StepStatus>) -> StepReport {
        let status = status.unwrap_or_else(StepStatus::Failed);
        let report = StepReport {
            step,
            status,
            elapsed: start.elapsed(),
        };
        print_status(&report);
        report
    }

    /// Run steps in order; a failed step does not stop the ones after it
    pub fn run(&self, steps: &[Step]) -> PipelineReport {
        let start = Instant::now();
        info!("Running {} steps", steps.len());

        let steps = steps.iter().map(|&step| self.execute(step)).collect();
        let report = PipelineReport {
            steps,
            elapsed: start.elapsed(),
        };

        for failed in report.failures() {
            error!("{} did not complete", failed.step);
        }
        report
    }
}

fn gsoy_status(outcome: ConcatOutcome) -> StepStatus {
    match outcome {
        ConcatOutcome::Written(s) => StepStatus::Succeeded {
            summary: format!(
                "combined {} files ({} rows, {} columns) into {}",
                s.files_read,
                s.total_rows,
                s.total_columns,
                s.output_path.display()
            ),
        },
        ConcatOutcome::NoInput { root } => StepStatus::NoInput {
            summary: format!("no CSV files found to combine under {}", root.display()),
        },
    }
}

/// Human-readable status line for a finished step
pub fn print_status(report: &StepReport) {
    match &report.status {
        StepStatus::Succeeded { summary } => println!(
            "{} {}: {}",
            "✓".bright_green().bold(),
            report.step.label().bright_cyan(),
            summary
        ),
        StepStatus::NoInput { summary } => println!(
            "{} {}: {}",
            "-".bright_yellow().bold(),
            report.step.label().bright_cyan(),
            summary
        ),
        StepStatus::Failed(e) => eprintln!(
            "{} {}: {} {}",
            "✗".bright_red().bold(),
            report.step.label().bright_cyan(),
            format!("{}:", e.kind().label()).bright_red(),
            e
        ),
    }
}
