// crates/jobgeo-core/src/lib.rs

//! # jobgeo-core
//!
//! Normalizes free-text job posting locations into canonical, geo-tagged
//! cities.
//!
//! A [`Gazetteer`] is built once from a reference table. A [`Resolver`]
//! splits a raw location such as `"Berlin / München"` into fragments and
//! matches each one against the gazetteer with a fuzzy [`Scorer`].
//! [`resolve_record`] then fans a job record out into one
//! [`EnrichedRecord`] per confidently matched city.
//!
//! ```rust
//! use jobgeo_core::{resolve_record, Gazetteer, RawRecord, ReferenceRow, Resolver};
//!
//! let gazetteer = Gazetteer::build(vec![
//!     ReferenceRow::new("Berlin", 52.52, 13.405, "Berlin"),
//!     ReferenceRow::new("München", 48.1372, 11.5755, "Bayern"),
//! ])?;
//! let record = RawRecord::new()
//!     .with_field("Job Title", "Data Engineer")
//!     .with_location("Berlin / Muenchen.");
//!
//! let rows = resolve_record(&record, &gazetteer, &Resolver::default());
//! assert_eq!(rows.len(), 2);
//! assert_eq!(rows[1].city, "münchen");
//! # Ok::<(), jobgeo_core::LoadError>(())
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod dataset;
pub mod error;
pub mod gazetteer;
pub mod harvest; // Only with the 'harvest' feature
pub mod loader;
pub mod record;
pub mod resolver;
pub mod score;
pub mod text;

// Re-exports
pub use crate::config::{Config, ResolverConfig, ScorerKind};
pub use crate::error::{JobGeoError, LoadError, Result};
pub use crate::gazetteer::{Gazetteer, GazetteerEntry, GazetteerStats, ReferenceRow};
pub use crate::record::{resolve_all, resolve_record, EnrichedRecord, Field, RawRecord};
pub use crate::resolver::{split_fragments, MatchResult, Resolver};
pub use crate::score::{Ratio, Scorer, TokenSetRatio, WeightedRatio};
