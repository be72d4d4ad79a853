// crates/jobgeo-core/src/gazetteer.rs
use crate::error::LoadError;
use crate::text::{normalize_name, parse_opt_f64};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, warn};

/// One row of the reference table, already renamed onto the four fields the
/// gazetteer cares about. Values are kept as raw strings; parsing happens in
/// [`Gazetteer::build`].
#[derive(Debug, Clone, Default)]
pub struct ReferenceRow {
    pub name: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub region: Option<String>,
}

impl ReferenceRow {
    pub fn new(name: &str, latitude: f64, longitude: f64, region: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            latitude: Some(latitude.to_string()),
            longitude: Some(longitude.to_string()),
            region: Some(region.to_string()),
        }
    }
}

/// A canonical city.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GazetteerEntry {
    /// Lowercased, trimmed name. Unique within a gazetteer.
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Administrative region (German "Bundesland").
    pub region: String,
}

/// Aggregate counts for a built gazetteer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GazetteerStats {
    pub entries: usize,
    pub regions: usize,
    /// Rows dropped for a missing name or unparsable coordinates.
    pub skipped_rows: usize,
    /// Rows whose name was already taken by an earlier row.
    pub duplicate_names: usize,
}

/// In-memory reference table of canonical cities.
///
/// Built once, then only read. Entries keep the order of their first
/// appearance in the source rows; that order is the match universe and
/// decides ties.
#[derive(Debug, Clone)]
pub struct Gazetteer {
    entries: Vec<GazetteerEntry>,
    index: HashMap<String, usize>,
    skipped_rows: usize,
    duplicate_names: usize,
}

impl Gazetteer {
    /// Build the gazetteer from reference rows.
    ///
    /// Names are trimmed and lowercased. Rows without a name or with
    /// unparsable coordinates are skipped with a warning; a later row whose
    /// name is already present is ignored. Fails with [`LoadError::Empty`]
    /// when no row survives.
    pub fn build<I>(rows: I) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = ReferenceRow>,
    {
        let mut entries = Vec::new();
        let mut index = HashMap::new();
        let mut skipped_rows = 0;
        let mut duplicate_names = 0;

        for (line, row) in rows.into_iter().enumerate() {
            let name = row.name.as_deref().map(normalize_name).unwrap_or_default();
            if name.is_empty() {
                warn!(row = line + 1, "skipping reference row without a city name");
                skipped_rows += 1;
                continue;
            }

            let latitude = parse_opt_f64(row.latitude.as_deref());
            let longitude = parse_opt_f64(row.longitude.as_deref());
            let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
                warn!(row = line + 1, city = %name, "skipping reference row with invalid coordinates");
                skipped_rows += 1;
                continue;
            };

            if index.contains_key(&name) {
                debug!(city = %name, "duplicate city name, keeping first occurrence");
                duplicate_names += 1;
                continue;
            }

            index.insert(name.clone(), entries.len());
            entries.push(GazetteerEntry {
                name,
                latitude,
                longitude,
                region: row.region.map(|r| r.trim().to_string()).unwrap_or_default(),
            });
        }

        if entries.is_empty() {
            return Err(LoadError::Empty);
        }

        Ok(Self {
            entries,
            index,
            skipped_rows,
            duplicate_names,
        })
    }

    /// All canonical names, in insertion order.
    pub fn lookup_candidates(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Entry by canonical name. The lookup key is normalized first.
    pub fn get(&self, name: &str) -> Option<&GazetteerEntry> {
        self.index
            .get(&normalize_name(name))
            .map(|&i| &self.entries[i])
    }

    pub fn entries(&self) -> &[GazetteerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> GazetteerStats {
        let regions: BTreeSet<&str> = self
            .entries
            .iter()
            .map(|e| e.region.as_str())
            .filter(|r| !r.is_empty())
            .collect();
        GazetteerStats {
            entries: self.entries.len(),
            regions: regions.len(),
            skipped_rows: self.skipped_rows,
            duplicate_names: self.duplicate_names,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: Option<&str>, lat: &str, lng: &str, region: &str) -> ReferenceRow {
        ReferenceRow {
            name: name.map(str::to_string),
            latitude: Some(lat.to_string()),
            longitude: Some(lng.to_string()),
            region: Some(region.to_string()),
        }
    }

    #[test]
    fn names_are_normalized() {
        let g = Gazetteer::build(vec![row(Some("  München "), "48.1372", "11.5755", "Bayern")])
            .unwrap();
        assert_eq!(g.lookup_candidates().collect::<Vec<_>>(), vec!["münchen"]);
        assert_eq!(g.get("MÜNCHEN").unwrap().region, "Bayern");
    }

    #[test]
    fn skips_rows_without_name_or_coordinates() {
        let g = Gazetteer::build(vec![
            row(None, "1", "2", "X"),
            row(Some("  "), "1", "2", "X"),
            row(Some("Kiel"), "n/a", "10.13", "Schleswig-Holstein"),
            row(Some("Bonn"), "50.7333", "7.1", "Nordrhein-Westfalen"),
        ])
        .unwrap();
        assert_eq!(g.len(), 1);
        assert_eq!(g.stats().skipped_rows, 3);
    }

    #[test]
    fn first_duplicate_wins() {
        let g = Gazetteer::build(vec![
            row(Some("Neustadt"), "49.35", "8.14", "Rheinland-Pfalz"),
            row(Some("neustadt"), "50.32", "11.12", "Bayern"),
        ])
        .unwrap();
        assert_eq!(g.len(), 1);
        assert_eq!(g.get("neustadt").unwrap().region, "Rheinland-Pfalz");
        assert_eq!(g.stats().duplicate_names, 1);
    }

    #[test]
    fn empty_input_is_a_load_error() {
        assert!(matches!(
            Gazetteer::build(Vec::<ReferenceRow>::new()),
            Err(LoadError::Empty)
        ));
        assert!(matches!(
            Gazetteer::build(vec![row(None, "1", "2", "")]),
            Err(LoadError::Empty)
        ));
    }

    #[test]
    fn stats_count_distinct_regions() {
        let g = Gazetteer::build(vec![
            ReferenceRow::new("Köln", 50.9375, 6.9603, "Nordrhein-Westfalen"),
            ReferenceRow::new("Bonn", 50.7333, 7.1, "Nordrhein-Westfalen"),
            ReferenceRow::new("Mainz", 50.0, 8.2711, "Rheinland-Pfalz"),
        ])
        .unwrap();
        let stats = g.stats();
        assert_eq!(stats.entries, 3);
        assert_eq!(stats.regions, 2);
    }
}
