//! Fare engine CLI
//!
//! Reads a tap file, turns adjacent taps into priced trips and writes the
//! trip file. Also inspects the price table and single tap pairs.

#![allow(clippy::print_stdout)]

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use infrastructure::{AppConfig, LoggingConfig, init_logging};

/// Fare engine CLI
#[derive(Parser)]
#[command(name = "fare-engine")]
#[command(author, version, about = "Transit tap fare engine", long_about = None)]
struct Cli {
    /// Verbosity level (overrides the configured log filter)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (default: fare-engine.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price every tap in the input file and write the trip file
    ///
    /// Example: fare-engine process --input taps.csv --output trips.csv
    Process {
        /// Tap CSV to read
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Trip CSV to write (replaced if it exists)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Fail the whole run on the first pair that cannot be priced
        #[arg(long)]
        abort_on_error: bool,

        /// Pair taps per card instead of strictly by position
        #[arg(long)]
        per_card: bool,
    },

    /// List the price table
    Fares,

    /// Show the highest fare for a trip starting at a stop
    MaxFare {
        /// Stop identifier
        stop: String,
    },

    /// Classify one tap and its successor from the input file
    ///
    /// Example: fare-engine classify --current 3 --next 4
    Classify {
        /// Id of the starting tap
        #[arg(long)]
        current: u64,

        /// Id of the successor tap (omit for a last tap)
        #[arg(long)]
        next: Option<u64>,

        /// Tap CSV to look the taps up in
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Print the effective configuration as TOML
    Config,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

fn logging_config(config: &AppConfig, verbose: u8) -> LoggingConfig {
    let mut logging = config.logging.clone();
    if let Some(filter) = log_filter_from_verbosity(verbose) {
        logging.filter = filter.to_string();
    }
    logging
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    init_logging(&logging_config(&config, cli.verbose))?;

    let rendered = match cli.command {
        Commands::Process {
            input,
            output,
            abort_on_error,
            per_card,
        } => {
            commands::apply_overrides(&mut config, input, output, abort_on_error, per_card);
            commands::process(&config).await?
        },
        Commands::Fares => commands::fares(&config.price_table()?),
        Commands::MaxFare { stop } => commands::max_fare(&config.price_table()?, &stop)?,
        Commands::Classify {
            current,
            next,
            input,
        } => {
            if let Some(input) = input {
                config.files.input = input;
            }
            commands::classify(&config, current, next).await?
        },
        Commands::Config => toml::to_string_pretty(&config)?,
    };

    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_filter() {
        assert_eq!(log_filter_from_verbosity(0), None);
        assert_eq!(log_filter_from_verbosity(1), Some("info"));
        assert_eq!(log_filter_from_verbosity(2), Some("debug"));
        assert_eq!(log_filter_from_verbosity(3), Some("trace"));
        assert_eq!(log_filter_from_verbosity(255), Some("trace"));
    }

    #[test]
    fn configured_filter_is_kept_without_verbosity() {
        let mut config = AppConfig::default();
        config.logging.filter = "application=debug".to_string();

        assert_eq!(logging_config(&config, 0).filter, "application=debug");
        assert_eq!(logging_config(&config, 2).filter, "debug");
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
