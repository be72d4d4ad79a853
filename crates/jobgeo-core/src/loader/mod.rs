// crates/jobgeo-core/src/loader/mod.rs

//! # Data Loader
//!
//! Handles the Physical Layer (I/O, Decompression, Encoding) and delegates
//! to the reference table parser and [`Gazetteer::build`].

use crate::config::{ReferenceConfig, TextEncoding};
use crate::error::LoadError;
use crate::gazetteer::Gazetteer;
use once_cell::sync::OnceCell;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use tracing::info;

pub mod common_io;
mod reference;

pub use reference::read_reference_rows;

// Single in-process cache so the bundled table is parsed only once.
static DEFAULT_GAZETTEER: OnceCell<Gazetteer> = OnceCell::new();

impl Gazetteer {
    pub fn default_data_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
    }

    pub fn default_dataset_filename() -> &'static str {
        "de_cities.csv"
    }

    /// Format of the bundled table: same columns as the usual export, but
    /// stored as UTF-8.
    pub fn default_reference_config() -> ReferenceConfig {
        ReferenceConfig {
            encoding: TextEncoding::Utf8,
            ..ReferenceConfig::default()
        }
    }

    /// Load the bundled German city table, once per process.
    pub fn load() -> Result<&'static Gazetteer, LoadError> {
        DEFAULT_GAZETTEER.get_or_try_init(|| {
            let path = Self::default_data_dir().join(Self::default_dataset_filename());
            Self::load_from_path(path, &Self::default_reference_config())
        })
    }

    /// **Standard Loader:** reads a delimited reference table from disk.
    ///
    /// `.gz` files are decompressed transparently (feature `compact`).
    pub fn load_from_path(
        path: impl AsRef<Path>,
        config: &ReferenceConfig,
    ) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let reader = common_io::open_stream(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => LoadError::NotFound(path.display().to_string()),
            _ => LoadError::Io(e),
        })?;

        let gazetteer = Self::from_reader(reader, config)?;
        let stats = gazetteer.stats();
        info!(
            path = %path.display(),
            entries = stats.entries,
            regions = stats.regions,
            skipped = stats.skipped_rows,
            duplicates = stats.duplicate_names,
            "gazetteer loaded"
        );
        Ok(gazetteer)
    }

    pub fn from_reader<R: Read>(reader: R, config: &ReferenceConfig) -> Result<Self, LoadError> {
        let rows = read_reference_rows(reader, config)?;
        Self::build(rows)
    }
}
