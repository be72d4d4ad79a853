//! jobgeo: command-line interface for jobgeo-core
//!
//! Cleans the location column of job posting files: every raw location is
//! split into fragments, each fragment is fuzzy-matched against a city
//! gazetteer, and every confident match becomes its own output row with
//! coordinates and region.
//!
//! Usage examples
//! --------------
//!
//! - Show gazetteer statistics
//!   $ jobgeo stats
//!
//! - See how one location string resolves
//!   $ jobgeo resolve "Berlin / München"
//!
//! - Clean a file of postings
//!   $ jobgeo clean --input jobs_raw.csv --output cleaned_jobs.csv
//!
//! - Fetch postings first (built with `--features harvest`)
//!   $ jobgeo harvest --total 200 --limit 20 --clean-output cleaned_jobs.csv
//!
//! Data source
//! -----------
//!
//! By default the bundled German city table of `jobgeo-core` is used. Use
//! `--cities <path>` for another reference table (`;`-delimited, Latin-1,
//! optionally `.gz`); its format and column names come from the
//! `[reference]` section of the `--config` file.
mod args;

use crate::args::{CliArgs, Commands};
use anyhow::Context;
use clap::Parser;
use jobgeo_core::config::DatasetConfig;
use jobgeo_core::dataset::{read_records_from_path, write_enriched_to_path};
use jobgeo_core::{resolve_all, Config, Gazetteer, Resolver};
use jobgeo_cli::{config, logging};
use std::borrow::Cow;
use std::path::Path;
use tracing::info;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    logging::init(args.verbose)?;

    let config = config::resolve_config(args.config.as_deref(), args.threshold)?;
    let resolver = Resolver::from_config(&config.resolver);

    match args.command {
        Commands::Stats => {
            let gazetteer = load_gazetteer(args.cities.as_deref(), &config)?;
            let stats = gazetteer.stats();
            println!("Gazetteer statistics:");
            println!("  Cities: {}", stats.entries);
            println!("  Regions: {}", stats.regions);
            println!("  Skipped rows: {}", stats.skipped_rows);
            println!("  Duplicate names: {}", stats.duplicate_names);
            println!("  Match threshold: > {}", resolver.match_threshold());
        }

        Commands::Resolve { location } => {
            let gazetteer = load_gazetteer(args.cities.as_deref(), &config)?;
            let results = resolver.resolve(&location, &gazetteer);
            if results.is_empty() {
                println!("No location fragments in: {location:?}");
            }
            for r in results {
                match r.matched {
                    Some(entry) => println!(
                        "{:?} -> {} ({}) [{}, {}] confidence {}",
                        r.fragment,
                        entry.name,
                        entry.region,
                        entry.latitude,
                        entry.longitude,
                        r.confidence
                    ),
                    None => println!(
                        "{:?} -> no match (best confidence {})",
                        r.fragment, r.confidence
                    ),
                }
            }
        }

        Commands::Clean { input, output } => {
            let gazetteer = load_gazetteer(args.cities.as_deref(), &config)?;
            clean_file(&input, &output, &gazetteer, &resolver, &config.dataset)?;
        }

        #[cfg(feature = "harvest")]
        Commands::Harvest {
            total,
            limit,
            output,
            clean_output,
        } => {
            use jobgeo_core::harvest::{write_postings, Harvester};
            use jobgeo_core::loader::common_io::create_sink;

            let total = total.unwrap_or(config.harvest.total);
            let limit = limit.unwrap_or(config.harvest.limit);
            let harvester = Harvester::new(config.harvest.clone())?;
            let postings = harvester.harvest(total, limit);
            if postings.is_empty() {
                tracing::warn!("no postings harvested");
            }

            let mut sink = create_sink(&output)
                .with_context(|| format!("Failed to create {}", output.display()))?;
            let count = postings.len();
            write_postings(&mut sink, postings, &config.dataset)?;
            sink.finish()
                .with_context(|| format!("Failed to write {}", output.display()))?;
            info!(postings = count, path = %output.display(), "raw postings written");

            if let Some(clean_output) = clean_output {
                let gazetteer = load_gazetteer(args.cities.as_deref(), &config)?;
                clean_file(&output, &clean_output, &gazetteer, &resolver, &config.dataset)?;
            }
        }
    }

    Ok(())
}

/// The `--cities` table when given, else the bundled one.
fn load_gazetteer(cities: Option<&Path>, config: &Config) -> anyhow::Result<Cow<'static, Gazetteer>> {
    let gazetteer = match cities {
        Some(path) => Cow::Owned(
            Gazetteer::load_from_path(path, &config.reference)
                .with_context(|| format!("Failed to load reference table {}", path.display()))?,
        ),
        None => Cow::Borrowed(Gazetteer::load().context("Failed to load bundled city table")?),
    };
    Ok(gazetteer)
}

fn clean_file(
    input: &Path,
    output: &Path,
    gazetteer: &Gazetteer,
    resolver: &Resolver,
    dataset: &DatasetConfig,
) -> anyhow::Result<()> {
    let data = read_records_from_path(input, dataset)
        .with_context(|| format!("Failed to read job file {}", input.display()))?;
    info!(records = data.records.len(), path = %input.display(), "job records read");

    let enriched = resolve_all(&data.records, gazetteer, resolver);

    write_enriched_to_path(output, &data.columns, &enriched, dataset)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!(
        input_records = data.records.len(),
        output_rows = enriched.len(),
        path = %output.display(),
        "cleaned data saved"
    );
    Ok(())
}
