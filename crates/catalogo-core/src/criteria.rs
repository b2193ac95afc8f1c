//! Filter engine: narrows the fetched records to those matching the active criteria.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::asset::AssetRecord;

/// Legacy literal for "no filter" accepted by [`FromStr`] impls.
pub const ANY_LITERAL: &str = "todos";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CriteriaError {
    #[error("unknown yes/no filter value {0:?} (expected todos, si or no)")]
    YesNo(String),
}

/// Three-state filter over a yes/no text field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum YesNoFilter {
    #[default]
    Any,
    Yes,
    No,
}

impl YesNoFilter {
    /// Compare the lower-cased field (missing as empty) against `"si"` / `"no"`.
    pub fn matches(self, field: Option<&str>) -> bool {
        let expected = match self {
            YesNoFilter::Any => return true,
            YesNoFilter::Yes => "si",
            YesNoFilter::No => "no",
        };
        field.unwrap_or_default().to_lowercase() == expected
    }
}

impl FromStr for YesNoFilter {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | ANY_LITERAL => Ok(YesNoFilter::Any),
            "si" => Ok(YesNoFilter::Yes),
            "no" => Ok(YesNoFilter::No),
            _ => Err(CriteriaError::YesNo(s.to_string())),
        }
    }
}

impl fmt::Display for YesNoFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            YesNoFilter::Any => ANY_LITERAL,
            YesNoFilter::Yes => "si",
            YesNoFilter::No => "no",
        })
    }
}

/// Parse an exact-match selection; the legacy `"todos"` literal means no filter.
pub fn parse_exact(value: &str) -> Option<String> {
    if value == ANY_LITERAL {
        None
    } else {
        Some(value.to_string())
    }
}

/// The combined set of active filter selections plus the free-text query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub archetype: YesNoFilter,
    pub ci_cd: YesNoFilter,
    /// Exact, case-sensitive match on `asset_type`.
    pub asset_type: Option<String>,
    /// Exact, case-sensitive match on `status`.
    pub status: Option<String>,
    /// Case-insensitive substring over domain or name. Empty matches all.
    pub query: String,
}

impl FilterCriteria {
    /// Whether any clause narrows the result.
    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
            || self.archetype != YesNoFilter::Any
            || self.ci_cd != YesNoFilter::Any
            || self.asset_type.is_some()
            || self.status.is_some()
    }

    /// All five clauses must pass.
    pub fn matches(&self, asset: &AssetRecord) -> bool {
        self.archetype.matches(asset.uses_archetype.as_deref())
            && self.ci_cd.matches(asset.uses_ci_cd.as_deref())
            && exact_match(self.asset_type.as_deref(), asset.asset_type.as_deref())
            && exact_match(self.status.as_deref(), asset.status.as_deref())
            && self.query_matches(asset)
    }

    fn query_matches(&self, asset: &AssetRecord) -> bool {
        if self.query.is_empty() {
            return true;
        }
        let needle = self.query.to_lowercase();
        contains_folded(&asset.domain, &needle) || contains_folded(&asset.name, &needle)
    }
}

fn exact_match(wanted: Option<&str>, field: Option<&str>) -> bool {
    match wanted {
        None => true,
        Some(w) => field.unwrap_or_default() == w,
    }
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    !haystack.is_empty() && haystack.to_lowercase().contains(needle)
}

/// Stable filter: keeps matching records in their original relative order.
///
/// Accepts any iterator of record references, so an already filtered
/// `Vec<&AssetRecord>` can be fed back through (`filtered.iter().copied()`).
pub fn filter<'a, I>(records: I, criteria: &FilterCriteria) -> Vec<&'a AssetRecord>
where
    I: IntoIterator<Item = &'a AssetRecord>,
{
    records
        .into_iter()
        .filter(|asset| criteria.matches(asset))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(id: &str, name: &str, domain: &str) -> AssetRecord {
        AssetRecord {
            id: id.into(),
            name: name.into(),
            domain: domain.into(),
            ..Default::default()
        }
    }

    fn ids(records: &[&AssetRecord]) -> Vec<String> {
        records.iter().map(|a| a.id.clone()).collect()
    }

    fn sample() -> Vec<AssetRecord> {
        vec![
            AssetRecord {
                uses_archetype: Some("Si".into()),
                uses_ci_cd: Some("no".into()),
                asset_type: Some("Servidor".into()),
                status: Some("Operativa".into()),
                ..asset("1", "Core Banking", "Pagos")
            },
            AssetRecord {
                uses_archetype: Some("no".into()),
                uses_ci_cd: Some("SI".into()),
                asset_type: Some("servidor".into()),
                status: Some("En desarrollo".into()),
                ..asset("2", "Portal Clientes", "Canales")
            },
            asset("3", "Batch Nocturno", ""),
            AssetRecord {
                asset_type: Some("Base de datos".into()),
                ..asset("4", "", "Pagos")
            },
        ]
    }

    #[test]
    fn default_criteria_keep_everything_in_order() {
        let records = sample();
        let out = filter(&records, &FilterCriteria::default());
        assert_eq!(ids(&out), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn archetype_compares_lower_cased_field() {
        let records = sample();
        let criteria = FilterCriteria {
            archetype: YesNoFilter::Yes,
            ..Default::default()
        };
        assert_eq!(ids(&filter(&records, &criteria)), vec!["1"]);
    }

    #[test]
    fn missing_yes_no_field_never_matches() {
        let records = sample();
        let criteria = FilterCriteria {
            ci_cd: YesNoFilter::No,
            ..Default::default()
        };
        // Records 3 and 4 have no CI/CD value at all.
        assert_eq!(ids(&filter(&records, &criteria)), vec!["1"]);
    }

    #[test]
    fn asset_type_is_case_sensitive() {
        let records = sample();
        let criteria = FilterCriteria {
            asset_type: Some("servidor".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter(&records, &criteria)), vec!["2"]);
    }

    #[test]
    fn status_exact_match() {
        let records = sample();
        let criteria = FilterCriteria {
            status: Some("Operativa".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter(&records, &criteria)), vec!["1"]);
    }

    #[test]
    fn query_matches_domain_or_name_ignoring_case() {
        let records = sample();
        let by_domain = FilterCriteria {
            query: "PAGOS".into(),
            ..Default::default()
        };
        assert_eq!(ids(&filter(&records, &by_domain)), vec!["1", "4"]);

        let by_name = FilterCriteria {
            query: "nocturno".into(),
            ..Default::default()
        };
        assert_eq!(ids(&filter(&records, &by_name)), vec!["3"]);
    }

    #[test]
    fn clauses_are_conjunctive() {
        let records = sample();
        let criteria = FilterCriteria {
            query: "pagos".into(),
            asset_type: Some("Base de datos".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter(&records, &criteria)), vec!["4"]);
    }

    #[test]
    fn filter_is_idempotent() {
        let records = sample();
        let criteria = FilterCriteria {
            query: "a".into(),
            ci_cd: YesNoFilter::Any,
            archetype: YesNoFilter::No,
            ..Default::default()
        };
        let once = filter(&records, &criteria);
        let twice = filter(once.iter().copied(), &criteria);
        assert_eq!(ids(&once), ids(&twice));
    }

    #[test]
    fn empty_string_exact_filter_matches_missing_field() {
        let records = sample();
        let criteria = FilterCriteria {
            status: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(ids(&filter(&records, &criteria)), vec!["3", "4"]);
    }

    #[test]
    fn yes_no_parsing() {
        assert_eq!("todos".parse::<YesNoFilter>(), Ok(YesNoFilter::Any));
        assert_eq!("SI".parse::<YesNoFilter>(), Ok(YesNoFilter::Yes));
        assert_eq!("no".parse::<YesNoFilter>(), Ok(YesNoFilter::No));
        assert!("maybe".parse::<YesNoFilter>().is_err());
        assert_eq!(YesNoFilter::Yes.to_string(), "si");
    }

    #[test]
    fn exact_parsing_maps_todos_to_none() {
        assert_eq!(parse_exact("todos"), None);
        assert_eq!(parse_exact("Servidor"), Some("Servidor".into()));
    }

    #[test]
    fn is_active_tracks_every_clause() {
        assert!(!FilterCriteria::default().is_active());
        let with_query = FilterCriteria {
            query: "x".into(),
            ..Default::default()
        };
        assert!(with_query.is_active());
        let with_status = FilterCriteria {
            status: Some("Operativa".into()),
            ..Default::default()
        };
        assert!(with_status.is_active());
    }
}
