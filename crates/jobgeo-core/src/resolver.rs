// crates/jobgeo-core/src/resolver.rs

//! # Location Resolver
//!
//! Turns one raw location string into one [`MatchResult`] per city mention.
//! Resolution is a pure function of the input string and the gazetteer: it
//! never fails and never mutates shared state, so a single [`Resolver`] can
//! be shared across threads.

use crate::config::{ResolverConfig, DEFAULT_MATCH_THRESHOLD};
use crate::gazetteer::{Gazetteer, GazetteerEntry};
use crate::score::{Scorer, WeightedRatio};
use tracing::trace;

/// Split a raw location field into normalized city fragments.
///
/// `/` and `,` both separate mentions. Each piece is trimmed, stripped of
/// periods and lowercased; empty pieces are dropped.
///
/// ```rust
/// use jobgeo_core::resolver::split_fragments;
///
/// assert_eq!(split_fragments("Berlin/München"), vec!["berlin", "münchen"]);
/// assert_eq!(split_fragments("Hamburg, , Köln"), vec!["hamburg", "köln"]);
/// ```
pub fn split_fragments(raw: &str) -> Vec<String> {
    raw.replace('/', ",")
        .split(',')
        .map(|piece| piece.trim().replace('.', "").trim().to_lowercase())
        .filter(|piece| !piece.is_empty())
        .collect()
}

/// Outcome of matching one fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult<'g> {
    pub fragment: String,
    /// `None` when the best score did not exceed the threshold.
    pub matched: Option<&'g GazetteerEntry>,
    /// Best score seen, matched or not.
    pub confidence: u8,
}

impl MatchResult<'_> {
    pub fn is_match(&self) -> bool {
        self.matched.is_some()
    }
}

pub struct Resolver {
    scorer: Box<dyn Scorer>,
    match_threshold: u8,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(WeightedRatio, DEFAULT_MATCH_THRESHOLD)
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("match_threshold", &self.match_threshold)
            .finish_non_exhaustive()
    }
}

impl Resolver {
    pub fn new(scorer: impl Scorer + 'static, match_threshold: u8) -> Self {
        Self {
            scorer: Box::new(scorer),
            match_threshold,
        }
    }

    pub fn from_config(config: &ResolverConfig) -> Self {
        Self {
            scorer: config.scorer.build(),
            match_threshold: config.match_threshold,
        }
    }

    pub fn match_threshold(&self) -> u8 {
        self.match_threshold
    }

    /// Highest scoring candidate for `fragment`, ignoring the threshold.
    ///
    /// Candidates are scanned in gazetteer order and only a strictly higher
    /// score replaces the current best, so among equal scores the entry
    /// inserted first wins. Returns `None` only for an empty gazetteer.
    pub fn best_candidate<'g>(
        &self,
        fragment: &str,
        gazetteer: &'g Gazetteer,
    ) -> Option<(&'g GazetteerEntry, u8)> {
        let mut best: Option<(&GazetteerEntry, u8)> = None;
        for entry in gazetteer.entries() {
            let score = self.scorer.score(&entry.name, fragment);
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((entry, score));
                if score == 100 {
                    break;
                }
            }
        }
        best
    }

    /// Match a single, already normalized fragment.
    pub fn match_fragment<'g>(&self, fragment: &str, gazetteer: &'g Gazetteer) -> MatchResult<'g> {
        let (matched, confidence) = match self.best_candidate(fragment, gazetteer) {
            Some((entry, score)) if score > self.match_threshold => (Some(entry), score),
            Some((entry, score)) => {
                trace!(fragment, closest = %entry.name, score, "no confident match");
                (None, score)
            }
            None => (None, 0),
        };
        MatchResult {
            fragment: fragment.to_string(),
            matched,
            confidence,
        }
    }

    /// Split `raw` and match every fragment.
    ///
    /// One result per non-empty fragment, in the order they appear,
    /// unmatched ones included.
    pub fn resolve<'g>(&self, raw: &str, gazetteer: &'g Gazetteer) -> Vec<MatchResult<'g>> {
        split_fragments(raw)
            .iter()
            .map(|fragment| self.match_fragment(fragment, gazetteer))
            .collect()
    }
}
