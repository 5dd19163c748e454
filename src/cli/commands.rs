//! Command implementations for the GHCN-D processor CLI
//!
//! Sets up logging, turns the parsed arguments into a [`PipelineConfig`],
//! runs the requested steps and prints the closing summary.

use crate::cli::args::Args;
use crate::config::PipelineConfig;
use crate::processor::{Pipeline, PipelineReport, Step};

use anyhow::{Context, Result};
use colored::*;
use indicatif::HumanDuration;
use tracing::{debug, info};

/// Main command runner
///
/// Configuration problems are returned as errors. Step failures are not:
/// they are recorded in the returned report so the caller can pick the
/// exit code.
pub fn run(args: Args) -> Result<PipelineReport> {
    setup_logging(&args)?;

    info!("Starting GHCN-D processor");
    debug!("Command line arguments: {:?}", args);

    let steps = args.steps();
    if steps.is_empty() {
        anyhow::bail!("No command given; run with --help to list the commands");
    }

    let config = args.to_config();
    config
        .validate()
        .with_context(|| format!("Invalid paths under {}", config.data_dir.display()))?;
    debug!("Resolved configuration: {:?}", config);

    let report = Pipeline::new(config).run(&steps);

    if steps.len() > 1 && !args.quiet {
        print_summary(&report);
    }

    Ok(report)
}

/// Run the full station metadata chain with a ready-made configuration
pub fn run_pipeline(config: PipelineConfig, include_gsoy: bool) -> Result<PipelineReport> {
    config.validate().context("Invalid pipeline configuration")?;

    let mut steps = Step::STATION_CHAIN.to_vec();
    if include_gsoy {
        steps.push(Step::Gsoy);
    }
    Ok(Pipeline::new(config).run(&steps))
}

/// Set up structured logging
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ghcnd_processor={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .context("Failed to initialise logging")?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .context("Failed to initialise logging")?;
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

fn print_summary(report: &PipelineReport) {
    let failed = report.failures().count();
    let succeeded = report.steps.len() - failed;
    let duration = HumanDuration(report.elapsed);

    println!();
    if failed == 0 {
        println!("{}", "GHCN-D processing complete".bright_green().bold());
    } else {
        println!("{}", "GHCN-D processing finished with errors".bright_red().bold());
    }
    println!("   • Steps succeeded: {}", succeeded);
    if failed > 0 {
        println!("   • Steps failed: {}", failed.to_string().bright_red());
        for step in report.failures() {
            if let Some(kind) = step.failure_kind() {
                println!("     - {} ({})", step.step, kind.label());
            }
        }
    }
    println!("   • Processing time: {}", duration);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::StepStatus;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_run_pipeline_rejects_clashing_paths() {
        let config = PipelineConfig::default()
            .with_gsn_csv("data/interim/stations_with_country_names.csv".into());
        assert!(run_pipeline(config, false).is_err());
    }

    #[test]
    fn test_run_pipeline_reports_every_step() {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = temp_dir.path().join("data");
        fs::create_dir_all(data_dir.join("raw")).unwrap();
        fs::write(
            data_dir.join("raw").join("ghcnd-countries.txt"),
            "US United States\n",
        )
        .unwrap();

        let config = PipelineConfig::for_data_dir(&data_dir)
            .with_preview_rows(0)
            .without_progress();
        let report = run_pipeline(config, false).unwrap();

        assert_eq!(report.steps.len(), 4);
        assert!(!report.succeeded());
        assert!(report.step(Step::Stations).unwrap().is_failure());
        assert!(matches!(
            report.step(Step::Countries).unwrap().status,
            StepStatus::Succeeded { .. }
        ));
    }
}
