//! Asset record as delivered by the catalog API.
//!
//! The upstream payload is loosely typed: optional fields may be missing,
//! null, or carry numbers where text is expected. Everything is settled here,
//! at deserialization time, so the pipeline only ever sees plain `String`s,
//! `Option<String>`s and a [`TechnicalDebt`] variant.

use serde::de::{self, Deserializer};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Keys that mark a `Deuda` object as a structured breakdown.
const DEBT_KEYS: [&str; 3] = ["SOA", "DW", "API"];

/// One catalog entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    #[serde(deserialize_with = "id_text")]
    pub id: String,
    #[serde(rename = "nombre_activo", default, deserialize_with = "text_or_empty")]
    pub name: String,
    #[serde(rename = "dominio", default, deserialize_with = "text_or_empty")]
    pub domain: String,
    #[serde(rename = "ip", default, deserialize_with = "text_or_empty")]
    pub ip_address: String,
    #[serde(
        rename = "Estado",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<String>,
    #[serde(
        rename = "Proveedor",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub provider: Option<String>,
    #[serde(rename = "Deuda", default, skip_serializing_if = "TechnicalDebt::is_absent")]
    pub technical_debt: TechnicalDebt,
    /// Only JSON strings survive; a numeric or boolean type is dropped so it
    /// never reaches the per-type stats.
    #[serde(
        rename = "tipo_activo",
        default,
        deserialize_with = "string_only",
        skip_serializing_if = "Option::is_none"
    )]
    pub asset_type: Option<String>,
    /// `"si"` (any case) means cloud hosted; anything else is on-premise.
    #[serde(
        rename = "es_cloud",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub is_cloud_hosted: Option<String>,
    #[serde(
        rename = "descripcion",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(
        rename = "usa_arquetipo",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub uses_archetype: Option<String>,
    #[serde(
        rename = "celula",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub cell: Option<String>,
    #[serde(
        rename = "ci_cd",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub uses_ci_cd: Option<String>,
    #[serde(
        rename = "Arquitectura",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub architecture_doc_url: Option<String>,
    #[serde(
        rename = "Dynatrace",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub monitoring_url: Option<String>,
}

/// Where an asset runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hosting {
    Cloud,
    OnPremise,
}

impl Hosting {
    pub fn label(self) -> &'static str {
        match self {
            Hosting::Cloud => "Alojado en Cloud",
            Hosting::OnPremise => "Alojado On-Premise",
        }
    }
}

impl AssetRecord {
    /// Case-insensitive `"si"` check on the cloud flag. Missing means on-premise.
    pub fn hosting(&self) -> Hosting {
        match self.is_cloud_hosted.as_deref() {
            Some(flag) if flag.to_lowercase() == "si" => Hosting::Cloud,
            _ => Hosting::OnPremise,
        }
    }

    /// Whether the status reads "operativa" (any case).
    pub fn is_operational(&self) -> bool {
        self.status
            .as_deref()
            .is_some_and(|s| s.to_lowercase() == "operativa")
    }
}

// ── Technical debt ──

/// Technical debt as reported upstream: a per-area percentage breakdown,
/// a free-text note, or nothing at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum TechnicalDebt {
    Breakdown(DebtBreakdown),
    Description(String),
    #[default]
    Absent,
}

/// Per-area debt percentages. Components missing upstream are 0.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DebtBreakdown {
    pub soa: f64,
    pub dw: f64,
    pub api: f64,
}

/// Severity band for an aggregate debt percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DebtTier {
    Low,
    Medium,
    High,
}

impl DebtTier {
    /// `> 75` is high, `> 50` is medium, everything else low.
    pub fn classify(total: f64) -> Self {
        if total > 75.0 {
            DebtTier::High
        } else if total > 50.0 {
            DebtTier::Medium
        } else {
            DebtTier::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DebtTier::Low => "baja",
            DebtTier::Medium => "media",
            DebtTier::High => "alta",
        }
    }
}

impl DebtBreakdown {
    /// Aggregate debt percentage across the three areas.
    pub fn total(&self) -> f64 {
        self.soa + self.dw + self.api
    }

    pub fn tier(&self) -> DebtTier {
        DebtTier::classify(self.total())
    }

    /// A zero breakdown carries no information and is not shown.
    pub fn is_empty(&self) -> bool {
        self.total() == 0.0
    }
}

impl TechnicalDebt {
    /// Discriminate a raw JSON value into one of the three variants.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(map) if DEBT_KEYS.iter().any(|k| map.contains_key(*k)) => {
                TechnicalDebt::Breakdown(DebtBreakdown {
                    soa: component(&map, "SOA"),
                    dw: component(&map, "DW"),
                    api: component(&map, "API"),
                })
            }
            Value::String(text) if !text.is_empty() => TechnicalDebt::Description(text),
            _ => TechnicalDebt::Absent,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, TechnicalDebt::Absent)
    }

    /// The numeric breakdown, if there is one worth showing.
    pub fn breakdown(&self) -> Option<&DebtBreakdown> {
        match self {
            TechnicalDebt::Breakdown(b) if !b.is_empty() => Some(b),
            _ => None,
        }
    }
}

fn component(map: &Map<String, Value>, key: &str) -> f64 {
    map.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

impl<'de> Deserialize<'de> for TechnicalDebt {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.map(TechnicalDebt::from_json).unwrap_or_default())
    }
}

impl Serialize for TechnicalDebt {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            TechnicalDebt::Breakdown(b) => {
                let mut s = serializer.serialize_struct("DebtBreakdown", 3)?;
                s.serialize_field("SOA", &b.soa)?;
                s.serialize_field("DW", &b.dw)?;
                s.serialize_field("API", &b.api)?;
                s.end()
            }
            TechnicalDebt::Description(text) => serializer.serialize_str(text),
            TechnicalDebt::Absent => serializer.serialize_none(),
        }
    }
}

// ── Field coercion ──

/// Strings pass through; numbers and booleans become their textual form.
fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(scalar_text))
}

fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

fn string_only<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Ok(Some(s)),
        _ => Ok(None),
    }
}

fn id_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "asset id must be a string or number, got {other}"
        ))),
    }
}
