//! Derived facets: the distinct values present for a filterable field.

use std::collections::HashSet;

use crate::asset::AssetRecord;
use crate::collate;

/// Fields that drive a filter choice list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet {
    AssetType,
    Status,
}

impl Facet {
    pub fn select(self, asset: &AssetRecord) -> Option<&str> {
        match self {
            Facet::AssetType => asset.asset_type.as_deref(),
            Facet::Status => asset.status.as_deref(),
        }
    }
}

/// Distinct non-empty values of `facet`, sorted in locale-aware ascending order.
pub fn distinct_values<'a, I>(records: I, facet: Facet) -> Vec<String>
where
    I: IntoIterator<Item = &'a AssetRecord>,
{
    distinct_by(records, |asset| facet.select(asset))
}

/// Same as [`distinct_values`] for an arbitrary field selector.
pub fn distinct_by<'a, I, F>(records: I, select: F) -> Vec<String>
where
    I: IntoIterator<Item = &'a AssetRecord>,
    F: Fn(&'a AssetRecord) -> Option<&'a str>,
{
    let unique: HashSet<&str> = records
        .into_iter()
        .filter_map(select)
        .filter(|value| !value.is_empty())
        .collect();
    let mut values: Vec<String> = unique.into_iter().map(String::from).collect();
    collate::sort(&mut values);
    values
}
