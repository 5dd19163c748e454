use clap::Parser;
use ghcnd_processor::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(report) if report.succeeded() => process::exit(0),
        Ok(_) => {
            // Failures have already been reported per step
            process::exit(1);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("GHCN-D Processor - Climate Station Metadata Converter");
    println!("=====================================================");
    println!();
    println!("Convert NOAA GHCN-D station and country metadata into CSV tables,");
    println!("extract GSN stations and combine per-station GSOY downloads.");
    println!();
    println!("USAGE:");
    println!("    ghcnd-processor [OPTIONS] <COMMAND>");
    println!();
    println!("COMMANDS:");
    println!("    stations    Convert the fixed-width station registry to CSV");
    println!("    countries   Convert the country list to CSV");
    println!("    combine     Join stations with their country names");
    println!("    gsn         Extract GSN stations from the combined table");
    println!("    gsoy        Concatenate per-station GSOY CSV files");
    println!("    pipeline    Run stations, countries, combine and gsn in order");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("        --data-dir <DIR>   Root for default paths [default: data]");
    println!("        --preview <ROWS>   Rows to preview after each write [default: 5]");
    println!("    -v, --verbose          Increase logging verbosity");
    println!("    -q, --quiet            Suppress output except errors");
    println!("    -h, --help             Show help information");
    println!("    -V, --version          Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Run the whole station metadata chain:");
    println!("    ghcnd-processor pipeline");
    println!();
    println!("    # Also combine GSOY downloads, using another data directory:");
    println!("    ghcnd-processor --data-dir /srv/ghcnd pipeline --include-gsoy");
    println!();
    println!("    # Convert a station file to a custom location:");
    println!("    ghcnd-processor stations -i ghcnd-stations.txt -o stations.csv");
    println!();
    println!("For detailed help on any command, use:");
    println!("    ghcnd-processor <COMMAND> --help");
}
