//! Transcript normalization.

use once_cell::sync::Lazy;
use regex::Regex;

/// Anything that is not a word character or whitespace
static PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").expect("valid regex"));

/// Whole-token disfluencies: uh, um, ah, hm (with any trailing repeats)
static FILLER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:uh+|um+|ah+|hm+)$").expect("valid regex"));

/// Normalize raw recognized speech for matching.
///
/// Lowercases, strips punctuation, drops filler tokens and collapses
/// whitespace. Fillers are removed as whole tokens after punctuation is gone,
/// so a second pass never finds anything new to remove.
///
/// Examples:
/// - "IRIS, HELP ME!!" -> "iris help me"
/// - "Umm... iris, uh, where am I?" -> "iris where am i"
pub fn normalize(raw: &str) -> String {
    let lower = raw.to_lowercase();
    let stripped = PUNCTUATION.replace_all(&lower, "");

    stripped
        .split_whitespace()
        .filter(|token| !FILLER.is_match(token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns true if `normalized` contains the wake word as whole token(s).
///
/// Both sides are compared in normalized form, so "Iris" and "iris" match
/// but "irish" does not.
pub fn has_wake_word(normalized: &str, wake_word: &str) -> bool {
    let wake = normalize(wake_word);
    if wake.is_empty() {
        return false;
    }
    format!(" {} ", normalized).contains(&format!(" {} ", wake))
}
