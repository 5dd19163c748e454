//! Command-line argument definitions for the GHCN-D processor
//!
//! Every subcommand maps onto one conversion step (or the full chain). Paths
//! default to the layout under `--data-dir` and can be overridden per step.

use crate::config::PipelineConfig;
use crate::constants::{DEFAULT_PREVIEW_ROWS, default_paths};
use crate::processor::Step;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the GHCN-D metadata processor
///
/// Converts NOAA GHCN-D station and country metadata from their fixed-width
/// text distributions into CSV, joins them, extracts the GSN subset and
/// combines per-station GSOY downloads into a single table.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ghcnd-processor",
    version,
    about = "Convert GHCN-D station metadata and GSOY downloads into CSV tables",
    long_about = "Converts the fixed-width GHCN-D station registry and country list into CSV, \
                  joins stations with their country names, extracts Global Surface Network \
                  stations and concatenates per-station Global Summary of the Year files into \
                  one unified table."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Root directory for the default raw/, interim/ and processed/ layout
    #[arg(
        long = "data-dir",
        value_name = "DIR",
        global = true,
        default_value = default_paths::DATA_DIR,
        help = "Root directory for default input and output paths"
    )]
    pub data_dir: PathBuf,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors and step status lines
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Rows of each written table to print (0 disables previews)
    #[arg(
        long = "preview",
        value_name = "ROWS",
        global = true,
        default_value_t = DEFAULT_PREVIEW_ROWS,
        help = "Number of rows to preview after writing each table"
    )]
    pub preview: usize,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Convert the fixed-width station registry to CSV
    Stations(ConvertArgs),
    /// Convert the country list to CSV
    Countries(ConvertArgs),
    /// Join the station CSV with country names
    Combine(CombineArgs),
    /// Extract GSN stations from the combined table
    Gsn(ConvertArgs),
    /// Concatenate per-station GSOY CSV files into one table
    Gsoy(ConvertArgs),
    /// Run the station metadata chain: stations, countries, combine, gsn
    Pipeline(PipelineArgs),
}

/// Single input, single output
#[derive(Debug, Clone, Default, Parser)]
pub struct ConvertArgs {
    #[arg(short = 'i', long = "input", value_name = "PATH", help = "Input path")]
    pub input: Option<PathBuf>,

    #[arg(short = 'o', long = "output", value_name = "PATH", help = "Output CSV path")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Parser)]
pub struct CombineArgs {
    #[arg(long = "stations", value_name = "PATH", help = "Station CSV to join")]
    pub stations: Option<PathBuf>,

    #[arg(long = "countries", value_name = "PATH", help = "Country CSV to join")]
    pub countries: Option<PathBuf>,

    #[arg(short = 'o', long = "output", value_name = "PATH", help = "Output CSV path")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Parser)]
pub struct PipelineArgs {
    /// Also run GSOY concatenation after the station chain
    #[arg(long = "include-gsoy", help = "Also concatenate GSOY files")]
    pub include_gsoy: bool,
}

impl Args {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress spinners (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }

    /// Steps the chosen subcommand runs, in order
    pub fn steps(&self) -> Vec<Step> {
        match &self.command {
            None => Vec::new(),
            Some(Commands::Stations(_)) => vec![Step::Stations],
            Some(Commands::Countries(_)) => vec![Step::Countries],
            Some(Commands::Combine(_)) => vec![Step::Combine],
            Some(Commands::Gsn(_)) => vec![Step::GsnFilter],
            Some(Commands::Gsoy(_)) => vec![Step::Gsoy],
            Some(Commands::Pipeline(p)) => {
                let mut steps = Step::STATION_CHAIN.to_vec();
                if p.include_gsoy {
                    steps.push(Step::Gsoy);
                }
                steps
            }
        }
    }

    /// Build the run configuration from the data dir and any path overrides
    pub fn to_config(&self) -> PipelineConfig {
        let mut config = PipelineConfig::for_data_dir(&self.data_dir);
        if self.show_progress() {
            config = config.with_preview_rows(self.preview);
        } else {
            config = config.with_preview_rows(0).without_progress();
        }

        match &self.command {
            Some(Commands::Stations(a)) => {
                if let Some(p) = &a.input {
                    config = config.with_stations_txt(p.clone());
                }
                if let Some(p) = &a.output {
                    config = config.with_stations_csv(p.clone());
                }
            }
            Some(Commands::Countries(a)) => {
                if let Some(p) = &a.input {
                    config = config.with_countries_txt(p.clone());
                }
                if let Some(p) = &a.output {
                    config = config.with_countries_csv(p.clone());
                }
            }
            Some(Commands::Combine(a)) => {
                if let Some(p) = &a.stations {
                    config = config.with_stations_csv(p.clone());
                }
                if let Some(p) = &a.countries {
                    config = config.with_countries_csv(p.clone());
                }
                if let Some(p) = &a.output {
                    config = config.with_combined_csv(p.clone());
                }
            }
            Some(Commands::Gsn(a)) => {
                if let Some(p) = &a.input {
                    config = config.with_combined_csv(p.clone());
                }
                if let Some(p) = &a.output {
                    config = config.with_gsn_csv(p.clone());
                }
            }
            Some(Commands::Gsoy(a)) => {
                if let Some(p) = &a.input {
                    config = config.with_gsoy_input_dir(p.clone());
                }
                if let Some(p) = &a.output {
                    config = config.with_gsoy_output_csv(p.clone());
                }
            }
            Some(Commands::Pipeline(_)) | None => {}
        }

        config
    }
}
