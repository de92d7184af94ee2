//! Legislator records from the per-legislator expense document.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::lenient::{
    de_nested_amount_table, de_optional_amount, de_optional_amount_table, de_optional_text,
    de_text,
};
use crate::amount::Amount;

/// Opaque legislator identifier, the top-level key of the document.
pub type LegislatorID = String;

/// Category name to amount for a single year.
pub type YearExpenses = BTreeMap<String, Amount>;

/// The whole legislator document, keyed by id.
pub type LegislatorMap = BTreeMap<LegislatorID, Legislator>;

/// One legislator with their reimbursement history.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Legislator {
    /// Display name.
    #[serde(rename = "nome", default, deserialize_with = "de_text")]
    pub name: String,

    /// Party acronym (e.g. "PT", "PL"). May be blank or the "none" sentinel.
    #[serde(rename = "partido", default, deserialize_with = "de_text")]
    pub party: String,

    /// Two-letter state code (UF).
    #[serde(rename = "uf", default, deserialize_with = "de_text")]
    pub state: String,

    /// Relative path to a locally hosted portrait.
    #[serde(
        rename = "imagem",
        default,
        deserialize_with = "de_optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<String>,

    /// Remote portrait URL, used when no local image exists.
    #[serde(
        rename = "foto",
        default,
        deserialize_with = "de_optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub photo_url: Option<String>,

    /// Year -> category -> amount.
    #[serde(rename = "gastos", default, deserialize_with = "de_nested_amount_table")]
    pub expenses_by_year: BTreeMap<String, YearExpenses>,

    /// Optional precomputed totals shipped alongside the raw expenses.
    #[serde(
        rename = "totais",
        default,
        deserialize_with = "de_totals",
        skip_serializing_if = "Option::is_none"
    )]
    pub precomputed_totals: Option<PrecomputedTotals>,
}

impl Legislator {
    /// Portrait reference, preferring the local image over the remote photo.
    pub fn image_ref(&self) -> Option<&str> {
        self.image.as_deref().or(self.photo_url.as_deref())
    }

    /// Categories recorded for a given year, if any.
    pub fn year(&self, year: &str) -> Option<&YearExpenses> {
        self.expenses_by_year.get(year)
    }
}

/// Per-legislator totals computed upstream.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct PrecomputedTotals {
    /// Sum over every year and category.
    #[serde(
        rename = "totalGeral",
        default,
        deserialize_with = "de_optional_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_overall: Option<Amount>,

    /// Year -> total for that year.
    #[serde(
        rename = "total_por_ano",
        default,
        deserialize_with = "de_optional_amount_table",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_by_year: Option<BTreeMap<String, Amount>>,

    /// Category -> year -> amount.
    #[serde(
        rename = "total_por_categoria_ano",
        default,
        deserialize_with = "de_nested_amount_table",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub total_by_category_year: BTreeMap<String, BTreeMap<String, Amount>>,
}

fn de_totals<'de, D>(deserializer: D) -> Result<Option<PrecomputedTotals>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    if !raw.is_object() {
        return Ok(None);
    }
    Ok(serde_json::from_value(raw).ok())
}

/// Parse the legislator document, skipping records that are not objects.
///
/// Returns the parsed map and the number of skipped entries. A document
/// that is not a JSON object at all yields an empty map.
pub fn parse_legislators(document: Value) -> (LegislatorMap, usize) {
    let entries = match document {
        Value::Object(map) => map,
        other => {
            tracing::warn!(
                "Legislator document is not an object (found {}), treating as empty",
                json_kind(&other)
            );
            return (LegislatorMap::new(), 0);
        }
    };

    let mut legislators = LegislatorMap::new();
    let mut skipped = 0usize;
    for (id, raw) in entries {
        if !raw.is_object() {
            tracing::warn!("Skipping legislator '{}': record is {}", id, json_kind(&raw));
            skipped += 1;
            continue;
        }
        match serde_json::from_value::<Legislator>(raw) {
            Ok(legislator) => {
                legislators.insert(id, legislator);
            }
            Err(e) => {
                tracing::warn!("Skipping legislator '{}': {}", id, e);
                skipped += 1;
            }
        }
    }
    (legislators, skipped)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
