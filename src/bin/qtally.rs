//! CLI entry point for the `qtally` command-line tool.

use std::io;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use query_tally::cli::commands;
use query_tally::{TallyConfig, TallyError};

#[derive(Parser)]
#[command(
    name = "qtally",
    about = "query-tally CLI: count and rank query-log entries by date prefix"
)]
struct Cli {
    /// Output format: "text" (default) or "json"
    #[arg(long, default_value = "text")]
    format: String,

    /// Enable debug logging
    #[arg(long)]
    verbose: bool,

    /// Path to a JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Read the dataset through a memory map
    #[arg(long)]
    mmap: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count the values logged under a date prefix
    Count {
        /// Path to the TSV dataset
        dataset: PathBuf,
        /// Date prefix: YYYY[-MM[-DD[ hh[:mm]]]]
        prefix: String,
    },
    /// Rank the most frequent values under a date prefix
    Popular {
        /// Path to the TSV dataset
        dataset: PathBuf,
        /// Date prefix: YYYY[-MM[-DD[ hh[:mm]]]]
        prefix: String,
        /// Number of entries to return (defaults to the configured size)
        #[arg(long)]
        size: Option<usize>,
    },
    /// Show the values logged at one minute
    Lookup {
        /// Path to the TSV dataset
        dataset: PathBuf,
        /// Timestamp: YYYY-MM-DD hh:mm[:ss]
        timestamp: String,
    },
    /// Summarize a dataset
    Stats {
        /// Path to the TSV dataset
        dataset: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    let json = cli.format == "json";

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let mut config = match &cli.config {
        Some(path) => match TallyConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(3);
            }
        },
        None => TallyConfig::default(),
    };
    if cli.mmap {
        config.load.use_mmap = true;
    }

    let mut out = io::stdout().lock();
    let result = match cli.command {
        Commands::Count { dataset, prefix } => {
            commands::cmd_count(&mut out, &dataset, &prefix, &config, json)
        }
        Commands::Popular {
            dataset,
            prefix,
            size,
        } => commands::cmd_popular(&mut out, &dataset, &prefix, size, &config, json),
        Commands::Lookup { dataset, timestamp } => {
            commands::cmd_lookup(&mut out, &dataset, &timestamp, &config, json)
        }
        Commands::Stats { dataset } => commands::cmd_stats(&mut out, &dataset, &config, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        let code = match &e {
            TallyError::Io(_) => 1,
            TallyError::MalformedRecord { .. } => 2,
            TallyError::InvalidFormat(_)
            | TallyError::InvalidDate(_)
            | TallyError::InvalidSize(_)
            | TallyError::Config(_) => 3,
            TallyError::InvariantViolation { .. } => 5,
        };
        process::exit(code);
    }
}
