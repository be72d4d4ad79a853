// crates/jobgeo-core/src/error.rs
use thiserror::Error;

/// Failure to build the gazetteer.
///
/// This is the only fatal error of the normalization pipeline: without a
/// reference table no location can be resolved, so callers abort the run.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Reference table not found: {0}")]
    NotFound(String),

    #[error("Reference table contains no usable rows")]
    Empty,

    #[error("Reference table has no `{0}` column")]
    MissingColumn(String),

    #[error("Invalid reference table settings: {0}")]
    InvalidConfig(String),

    #[error("Reference table is malformed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to read reference table: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum JobGeoError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Dataset not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[cfg(feature = "harvest")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[cfg(feature = "harvest")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, JobGeoError>;
