//! Domain grouper: partitions records into named sections.

use std::collections::HashMap;

use crate::asset::AssetRecord;
use crate::collate;

/// Bucket for records whose domain is missing or empty.
pub const NO_DOMAIN: &str = "Sin Dominio";

/// Records keyed by domain, each bucket in input order.
pub type DomainGroups<'a> = HashMap<String, Vec<&'a AssetRecord>>;

/// The bucket key a record lands in.
pub fn domain_key(asset: &AssetRecord) -> &str {
    if asset.domain.is_empty() {
        NO_DOMAIN
    } else {
        &asset.domain
    }
}

/// Partition records by domain. Every record lands in exactly one bucket.
pub fn group_by_domain<'a, I>(records: I) -> DomainGroups<'a>
where
    I: IntoIterator<Item = &'a AssetRecord>,
{
    let mut groups: DomainGroups<'a> = HashMap::new();
    for asset in records {
        groups
            .entry(domain_key(asset).to_string())
            .or_default()
            .push(asset);
    }
    groups
}

/// Buckets in locale-aware ascending key order, for rendering.
pub fn sorted_groups(groups: DomainGroups<'_>) -> Vec<(String, Vec<&AssetRecord>)> {
    let mut sections: Vec<_> = groups.into_iter().collect();
    sections.sort_by(|(a, _), (b, _)| collate::compare(a, b));
    sections
}
