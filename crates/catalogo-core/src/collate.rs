//! Locale-aware string ordering for facet lists, domain sections and stats.
//!
//! Approximates a multi-level collation without pulling in ICU data:
//!
//! 1. Primary: base letters only. The string is NFD-decomposed, combining
//!    marks are dropped and the rest is lower-cased, so "Árbol" sorts with
//!    "arbol" and before "base".
//! 2. Secondary: accents. Among equal bases, the unaccented form comes first.
//! 3. Tertiary: case. Among equal letters, lower-case comes first.
//! 4. Code points, so the order is total and deterministic.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Compare two strings in locale-aware ascending order.
pub fn compare(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| secondary_key(a).cmp(&secondary_key(b)))
        .then_with(|| tertiary_key(a).cmp(&tertiary_key(b)))
        .then_with(|| a.cmp(b))
}

/// Sort a slice of strings in place using [`compare`].
pub fn sort<S: AsRef<str>>(values: &mut [S]) {
    values.sort_by(|a, b| compare(a.as_ref(), b.as_ref()));
}

fn primary_key(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn secondary_key(s: &str) -> String {
    s.nfd().flat_map(char::to_lowercase).collect()
}

fn tertiary_key(s: &str) -> Vec<bool> {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(char::is_uppercase)
        .collect()
}
