// crates/jobgeo-core/src/record.rs

//! Job records and the one-to-many expansion from raw to enriched rows.

use crate::gazetteer::{Gazetteer, GazetteerEntry};
use crate::resolver::Resolver;
use rayon::prelude::*;
use serde::Serialize;

/// A named column value carried through the pipeline untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name: String,
    pub value: String,
}

impl Field {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A job posting as read from the source: pass-through fields in column
/// order plus the raw location string, if the source had one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub fields: Vec<Field>,
    pub location: Option<String>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(Field::new(name, value));
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }
}

/// A raw record joined with exactly one gazetteer entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedRecord {
    pub fields: Vec<Field>,
    /// Canonical (lowercased) city name.
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    pub region: String,
}

impl EnrichedRecord {
    /// Join `record` with `entry`, dropping the raw location.
    pub fn merge(record: &RawRecord, entry: &GazetteerEntry) -> Self {
        Self {
            fields: record.fields.clone(),
            city: entry.name.clone(),
            latitude: entry.latitude,
            longitude: entry.longitude,
            region: entry.region.clone(),
        }
    }
}

/// Expand one raw record into one enriched record per confidently matched
/// location fragment.
///
/// Unmatched fragments are dropped. A record without a location, or whose
/// fragments all fail to match, yields an empty vector.
pub fn resolve_record(
    record: &RawRecord,
    gazetteer: &Gazetteer,
    resolver: &Resolver,
) -> Vec<EnrichedRecord> {
    let Some(location) = record.location.as_deref() else {
        return Vec::new();
    };
    resolver
        .resolve(location, gazetteer)
        .into_iter()
        .filter_map(|result| result.matched)
        .map(|entry| EnrichedRecord::merge(record, entry))
        .collect()
}

/// [`resolve_record`] over a whole batch, in parallel.
///
/// The per-record expansions are concatenated in input order, so the result
/// equals the sequential one.
pub fn resolve_all(
    records: &[RawRecord],
    gazetteer: &Gazetteer,
    resolver: &Resolver,
) -> Vec<EnrichedRecord> {
    records
        .par_iter()
        .map(|record| resolve_record(record, gazetteer, resolver))
        .collect::<Vec<_>>()
        .into_iter()
        .flatten()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gazetteer::ReferenceRow;

    #[test]
    fn merge_copies_geo_fields() {
        let g = Gazetteer::build(vec![ReferenceRow::new("Bonn", 50.7333, 7.1, "Nordrhein-Westfalen")])
            .unwrap();
        let raw = RawRecord::new()
            .with_field("Job Title", "Data Engineer")
            .with_location("Bonn");
        let out = EnrichedRecord::merge(&raw, g.get("bonn").unwrap());
        assert_eq!(out.city, "bonn");
        assert_eq!(out.latitude, 50.7333);
        assert_eq!(out.region, "Nordrhein-Westfalen");
        assert_eq!(out.fields, raw.fields);
    }

    #[test]
    fn record_without_location_yields_nothing() {
        let g = Gazetteer::build(vec![ReferenceRow::new("Bonn", 50.7333, 7.1, "NRW")]).unwrap();
        let raw = RawRecord::new().with_field("Job Title", "Analyst");
        assert!(resolve_record(&raw, &g, &Resolver::default()).is_empty());
    }
}
