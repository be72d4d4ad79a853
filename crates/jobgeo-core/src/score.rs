// crates/jobgeo-core/src/score.rs

//! Similarity scoring between a gazetteer candidate and a location fragment.
//!
//! Scores are integers in `0..=100` (100 = identical after processing). All
//! scorers run both inputs through [`process`] first, so case, accents and
//! punctuation never influence the result.

use crate::text::process;
use std::collections::BTreeSet;
use strsim::normalized_levenshtein;

/// Approximate string matcher used by the resolver.
///
/// Closures `Fn(&str, &str) -> u8` implement it too, which is handy for
/// pinning a score in tests.
pub trait Scorer: Send + Sync {
    fn score(&self, candidate: &str, query: &str) -> u8;
}

impl<F> Scorer for F
where
    F: Fn(&str, &str) -> u8 + Send + Sync,
{
    fn score(&self, candidate: &str, query: &str) -> u8 {
        self(candidate, query)
    }
}

/// Plain normalized Levenshtein similarity.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ratio;

impl Scorer for Ratio {
    fn score(&self, candidate: &str, query: &str) -> u8 {
        to_score(ratio(&process(candidate), &process(query)))
    }
}

/// Token-set similarity: insensitive to word order and repeated words.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenSetRatio;

impl Scorer for TokenSetRatio {
    fn score(&self, candidate: &str, query: &str) -> u8 {
        to_score(token_set(&process(candidate), &process(query), ratio))
    }
}

/// Blend of full, partial, token-sort and token-set similarity.
///
/// When the lengths are comparable (longer < 1.5× shorter) the token methods
/// are weighted by 0.95. Otherwise the partial variants take over, scaled by
/// 0.9, or 0.6 when the longer string is more than 8× the shorter one.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedRatio;

const UNBASE_SCALE: f64 = 0.95;

impl Scorer for WeightedRatio {
    fn score(&self, candidate: &str, query: &str) -> u8 {
        let a = process(candidate);
        let b = process(query);
        if a.is_empty() || b.is_empty() {
            return 0;
        }

        // Components stay unrounded; only the final blend is rounded.
        let base = ratio(&a, &b);
        let (la, lb) = (a.chars().count() as f64, b.chars().count() as f64);
        let len_ratio = la.max(lb) / la.min(lb);

        let best = if len_ratio < 1.5 {
            let tsor = token_sort(&a, &b, ratio) * UNBASE_SCALE;
            let tset = token_set(&a, &b, ratio) * UNBASE_SCALE;
            base.max(tsor).max(tset)
        } else {
            let partial_scale = if len_ratio > 8.0 { 0.6 } else { 0.9 };
            let partial = partial_ratio(&a, &b) * partial_scale;
            let ptsor = token_sort(&a, &b, partial_ratio) * UNBASE_SCALE * partial_scale;
            let ptset = token_set(&a, &b, partial_ratio) * UNBASE_SCALE * partial_scale;
            base.max(partial).max(ptsor).max(ptset)
        };

        to_score(best)
    }
}

fn to_score(similarity: f64) -> u8 {
    percent(similarity) as u8
}

/// Similarity in `0.0..=1.0` scaled to a whole percentage.
fn percent(similarity: f64) -> f64 {
    (similarity * 100.0).round().clamp(0.0, 100.0)
}

fn ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    normalized_levenshtein(a, b)
}

/// Best [`ratio`] of the shorter string against every equally long window
/// of the longer one.
fn partial_ratio(a: &str, b: &str) -> f64 {
    let (short, long) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };
    let short_len = short.chars().count();
    let long_chars: Vec<char> = long.chars().collect();
    if short_len == 0 {
        return 0.0;
    }
    if short_len == long_chars.len() {
        return ratio(short, long);
    }

    let mut best = 0.0_f64;
    for window in long_chars.windows(short_len) {
        let candidate: String = window.iter().collect();
        best = best.max(ratio(short, &candidate));
        if best >= 1.0 {
            break;
        }
    }
    best
}

fn sorted_tokens<'a>(tokens: impl Iterator<Item = &'a str>) -> String {
    let mut v: Vec<&str> = tokens.collect();
    v.sort_unstable();
    v.join(" ")
}

fn token_sort(a: &str, b: &str, cmp: fn(&str, &str) -> f64) -> f64 {
    cmp(
        &sorted_tokens(a.split_whitespace()),
        &sorted_tokens(b.split_whitespace()),
    )
}

fn token_set(a: &str, b: &str, cmp: fn(&str, &str) -> f64) -> f64 {
    let ta: BTreeSet<&str> = a.split_whitespace().collect();
    let tb: BTreeSet<&str> = b.split_whitespace().collect();
    if ta.is_empty() || tb.is_empty() {
        return 0.0;
    }

    let sect = sorted_tokens(ta.intersection(&tb).copied());
    let diff_ab = sorted_tokens(ta.difference(&tb).copied());
    let diff_ba = sorted_tokens(tb.difference(&ta).copied());

    let combined_ab = format!("{sect} {diff_ab}").trim().to_string();
    let combined_ba = format!("{sect} {diff_ba}").trim().to_string();

    cmp(&sect, &combined_ab)
        .max(cmp(&sect, &combined_ba))
        .max(cmp(&combined_ab, &combined_ba))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_after_processing() {
        assert_eq!(Ratio.score("münchen", "Muenchen."), 88);
        assert_eq!(Ratio.score("köln", "KOLN"), 100);
        assert_eq!(WeightedRatio.score("berlin", " Berlin "), 100);
    }

    #[test]
    fn single_typo_scores_high() {
        assert!(WeightedRatio.score("berlin", "berln") > 70);
        assert!(Ratio.score("hamburg", "hamburgg") > 70);
    }

    #[test]
    fn unrelated_scores_low() {
        assert!(WeightedRatio.score("berlin", "xyzzycity") <= 70);
        assert!(WeightedRatio.score("hamburg", "unknownplace123") <= 70);
    }

    #[test]
    fn empty_input_scores_zero() {
        assert_eq!(WeightedRatio.score("berlin", ""), 0);
        assert_eq!(Ratio.score("", "..."), 0);
        assert_eq!(TokenSetRatio.score("berlin", " "), 0);
    }

    #[test]
    fn token_set_ignores_order() {
        assert_eq!(TokenSetRatio.score("frankfurt am main", "main am frankfurt"), 100);
        assert_eq!(TokenSetRatio.score("frankfurt am main", "frankfurt"), 100);
    }

    #[test]
    fn weighted_prefers_partial_for_short_queries() {
        // "frankfurt" is a window of the longer name; partial scale 0.9 applies.
        assert_eq!(WeightedRatio.score("frankfurt am main", "frankfurt"), 90);
    }

    #[test]
    fn weighted_scales_very_short_queries_down() {
        // More than 8x shorter: the partial match only counts 0.6.
        assert_eq!(WeightedRatio.score("frankfurt am main", "am"), 60);
    }

    #[test]
    fn weighted_uses_token_sort_for_reordered_names() {
        assert_eq!(token_sort("main frankfurt am", "frankfurt am main", ratio), 1.0);
        assert_eq!(WeightedRatio.score("frankfurt am main", "main frankfurt am"), 95);
    }

    #[test]
    fn weighted_rounds_only_the_final_blend() {
        // Sorted tokens differ in 9 of 35 characters: 74.29 * 0.95 = 70.57.
        let candidate = format!("{} {}", "a".repeat(17), "b".repeat(17));
        let query = format!("{} {}{}", "b".repeat(17), "a".repeat(8), "z".repeat(9));
        assert_eq!(WeightedRatio.score(&candidate, &query), 71);
    }

    #[test]
    fn closures_are_scorers() {
        let fixed = |_: &str, _: &str| 42u8;
        assert_eq!(fixed.score("a", "b"), 42);
    }
}
