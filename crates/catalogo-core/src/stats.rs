//! Per-type counts over the full record list, and their display labels.

use std::collections::HashMap;

use crate::asset::AssetRecord;
use crate::collate;

/// Lower-cased asset type → number of records of that type.
pub type TypeCounts = HashMap<String, usize>;

/// Count records per asset type, folding case. Records without a type are skipped.
pub fn aggregate_by_type<'a, I>(records: I) -> TypeCounts
where
    I: IntoIterator<Item = &'a AssetRecord>,
{
    let mut counts = TypeCounts::new();
    for asset in records {
        if let Some(kind) = asset.asset_type.as_deref().filter(|t| !t.is_empty()) {
            *counts.entry(kind.to_lowercase()).or_insert(0) += 1;
        }
    }
    counts
}

/// Counts in locale-aware key order.
pub fn sorted_stats(counts: &TypeCounts) -> Vec<(&str, usize)> {
    let mut entries: Vec<(&str, usize)> = counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    entries.sort_by(|(a, _), (b, _)| collate::compare(a, b));
    entries
}

/// Plural heading for a stats bucket: capitalized, with a trailing `s`
/// unless the word already ends in one.
pub fn type_label(kind: &str) -> String {
    if kind == "base de datos" {
        return "Bases de Datos".to_string();
    }
    let mut chars = kind.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => String::new(),
    };
    if capitalized.ends_with('s') {
        capitalized
    } else {
        format!("{capitalized}s")
    }
}
