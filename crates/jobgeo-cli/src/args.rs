use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for jobgeo
#[derive(Debug, Parser)]
#[command(
    name = "jobgeo",
    version,
    about = "Harvest job postings and normalize their locations against a city gazetteer"
)]
pub struct CliArgs {
    /// TOML configuration file (defaults apply for anything not set)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Reference city table (default: the bundled German city table)
    #[arg(long = "cities", global = true)]
    pub cities: Option<PathBuf>,

    /// Override the match threshold (a score must be strictly greater)
    #[arg(long = "threshold", global = true)]
    pub threshold: Option<u8>,

    /// Log debug output (RUST_LOG takes precedence)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve the location column of a job file into one row per city
    Clean {
        /// Raw job postings (delimited, optionally .gz)
        #[arg(short = 'i', long = "input")]
        input: PathBuf,

        /// Destination of the enriched rows
        #[arg(short = 'o', long = "output", default_value = "cleaned_jobs.csv")]
        output: PathBuf,
    },

    /// Fetch postings from the job search API, then optionally clean them
    #[cfg(feature = "harvest")]
    Harvest {
        /// Total number of postings to request
        #[arg(long = "total")]
        total: Option<usize>,

        /// Postings per page
        #[arg(long = "limit")]
        limit: Option<usize>,

        /// Raw output file
        #[arg(short = 'o', long = "output", default_value = "jobs_raw.csv")]
        output: PathBuf,

        /// Also write cleaned rows to this file
        #[arg(long = "clean-output")]
        clean_output: Option<PathBuf>,
    },

    /// Show how a single location string resolves
    Resolve {
        /// Raw location, e.g. "Berlin / München"
        location: String,
    },

    /// Show a summary of the gazetteer
    Stats,
}
