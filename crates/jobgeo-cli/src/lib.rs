//! jobgeo-cli
//! ==========
//!
//! Command-line interface for the `jobgeo-core` location normalizer.
//!
//! The binary (`jobgeo`) is the primary deliverable. This library target
//! holds the pieces that are worth testing on their own: configuration
//! loading and logging setup.
//!
//! Basic usage:
//!
//! ```text
//! jobgeo --help
//! jobgeo stats
//! jobgeo resolve "Berlin / München"
//! jobgeo clean --input jobs.csv --output cleaned_jobs.csv
//! jobgeo --config jobgeo.toml --cities Deutschland_Cities.csv clean -i jobs.csv
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod logging;
