//! Locale-aware string comparison
//!
//! Country names carry diacritics (`Åland Islands`, `Curaçao`, `São Tomé and
//! Príncipe`) that a plain byte comparison would push past `Z`. Names are
//! compared in three passes, mirroring the strength levels of a collator:
//!
//! 1. base letters only, case-folded (accents and case ignored)
//! 2. accented letters, case-folded
//! 3. case-sensitive text

use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Key used for the primary comparison level.
pub fn primary_key(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn secondary_key(text: &str) -> String {
    text.nfd().flat_map(char::to_lowercase).collect()
}

/// Compare two strings the way a human-facing sorted list expects.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| secondary_key(a).cmp(&secondary_key(b)))
        .then_with(|| a.cmp(b))
}
