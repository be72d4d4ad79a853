// crates/jobgeo-core/src/text.rs

//! String folding helpers shared by the gazetteer, the splitter and the scorers.

/// Convert a string into a folded key suitable for comparison.
///
/// This performs:
/// 1\) Transliterate Unicode → ASCII (e.g. `Köln` -> `Koln`)
/// 2\) Normalize to lowercase
///
/// ```rust
/// use jobgeo_core::text::fold_key;
///
/// assert_eq!(fold_key("Köln"), "koln");
/// assert_eq!(fold_key("Straße"), "strasse");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// Canonical gazetteer key: surrounding whitespace trimmed, lowercased.
///
/// Unlike [`fold_key`] this keeps diacritics, so `"München"` stays
/// `"münchen"` and is written back to the output unchanged.
pub fn normalize_name(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Prepare a string for similarity scoring.
///
/// Folds to lowercase ASCII, turns every non-alphanumeric run into a single
/// space and trims the result. `"Frankfurt (Oder)"` becomes
/// `"frankfurt oder"`.
pub fn process(s: &str) -> String {
    fold_key(s)
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parses an optional raw field into an `f64`.
///
/// Trims whitespace and accepts a decimal comma (`"52,52"`), which German
/// reference exports commonly use. Returns `None` if the input is absent or
/// not a number.
pub fn parse_opt_f64(s: Option<&str>) -> Option<f64> {
    let v = s?.trim();
    v.parse::<f64>()
        .ok()
        .or_else(|| v.replace(',', ".").parse::<f64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_transliterates_and_lowercases() {
        assert_eq!(fold_key("MÜNCHEN"), "munchen");
        assert_eq!(fold_key("Łódź"), "lodz");
    }

    #[test]
    fn normalize_keeps_umlauts() {
        assert_eq!(normalize_name("  München "), "münchen");
    }

    #[test]
    fn process_collapses_punctuation() {
        assert_eq!(process("  Frankfurt (Oder) "), "frankfurt oder");
        assert_eq!(process("Halle/Saale"), "halle saale");
        assert_eq!(process("..."), "");
    }

    #[test]
    fn parse_coordinates() {
        assert_eq!(parse_opt_f64(Some(" 52.52 ")), Some(52.52));
        assert_eq!(parse_opt_f64(Some("13,405")), Some(13.405));
        assert_eq!(parse_opt_f64(Some("N/A")), None);
        assert_eq!(parse_opt_f64(None), None);
    }
}
