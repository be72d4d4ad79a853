// crates/jobgeo-core/src/config.rs

//! # Configuration
//!
//! Every knob of the pipeline lives here instead of in module-level
//! constants. All structs deserialize with per-field defaults, so an empty
//! TOML document (or a missing section) yields [`Config::default`].

use crate::error::{JobGeoError, Result};
use crate::score::{Ratio, Scorer, TokenSetRatio, WeightedRatio};
use serde::Deserialize;

/// Default acceptance threshold. Scores must be strictly greater to match.
pub const DEFAULT_MATCH_THRESHOLD: u8 = 70;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub resolver: ResolverConfig,
    pub reference: ReferenceConfig,
    pub dataset: DatasetConfig,
    pub harvest: HarvestConfig,
}

/// Which similarity algorithm the resolver uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorerKind {
    #[default]
    Weighted,
    Ratio,
    TokenSet,
}

impl ScorerKind {
    pub fn build(self) -> Box<dyn Scorer> {
        match self {
            ScorerKind::Weighted => Box::new(WeightedRatio),
            ScorerKind::Ratio => Box::new(Ratio),
            ScorerKind::TokenSet => Box::new(TokenSetRatio),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// A fragment matches only if its best score is strictly above this.
    pub match_threshold: u8,
    pub scorer: ScorerKind,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            match_threshold: DEFAULT_MATCH_THRESHOLD,
            scorer: ScorerKind::default(),
        }
    }
}

/// Character encoding of a delimited file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    Utf8,
    /// ISO-8859-1, the encoding of the usual German city exports.
    #[default]
    Latin1,
}

/// Column mapping and format of the reference (city) table.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReferenceConfig {
    pub delimiter: char,
    pub encoding: TextEncoding,
    pub name_column: String,
    pub latitude_column: String,
    pub longitude_column: String,
    pub region_column: String,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            delimiter: ';',
            encoding: TextEncoding::Latin1,
            name_column: "city".into(),
            latitude_column: "lat".into(),
            longitude_column: "lng".into(),
            region_column: "State/admin".into(),
        }
    }
}

impl ReferenceConfig {
    pub fn delimiter_byte(&self) -> Result<u8> {
        delimiter_byte(self.delimiter)
    }
}

/// Format of the job posting dataset, read and written by [`crate::dataset`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub delimiter: char,
    pub encoding: TextEncoding,
    /// Column holding the raw, possibly compound location string.
    pub location_column: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            delimiter: ';',
            encoding: TextEncoding::Latin1,
            location_column: "Location".into(),
        }
    }
}

impl DatasetConfig {
    pub fn delimiter_byte(&self) -> Result<u8> {
        delimiter_byte(self.delimiter)
    }
}

/// Settings of the job search API client (used with the `harvest` feature).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HarvestConfig {
    pub endpoint: String,
    pub user_agent: String,
    /// Postings requested per page.
    pub limit: usize,
    /// Total number of postings to request.
    pub total: usize,
    /// Extra attempts per page after the first one fails.
    pub max_retries: u32,
    pub backoff_ms: u64,
    pub timeout_secs: u64,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://www.xing.com/graphql/api".into(),
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/133.0.0.0 Safari/537.36".into(),
            limit: 20,
            total: 100,
            max_retries: 3,
            backoff_ms: 1_000,
            timeout_secs: 30,
        }
    }
}

fn delimiter_byte(c: char) -> Result<u8> {
    if c.is_ascii() {
        Ok(c as u8)
    } else {
        Err(JobGeoError::Config(format!(
            "delimiter must be a single ASCII character, got {c:?}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_reference_export() {
        let cfg = Config::default();
        assert_eq!(cfg.resolver.match_threshold, 70);
        assert_eq!(cfg.resolver.scorer, ScorerKind::Weighted);
        assert_eq!(cfg.reference.region_column, "State/admin");
        assert_eq!(cfg.dataset.location_column, "Location");
        assert_eq!(cfg.dataset.delimiter_byte().unwrap(), b';');
    }

    #[test]
    fn non_ascii_delimiter_is_rejected() {
        let cfg = DatasetConfig {
            delimiter: '§',
            ..DatasetConfig::default()
        };
        assert!(matches!(cfg.delimiter_byte(), Err(JobGeoError::Config(_))));
    }
}
