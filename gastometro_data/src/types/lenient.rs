//! Tolerant readers for the loosely-typed parts of the feed.
//!
//! The published documents are generated by scripts and occasionally carry
//! `null` or scalar values where an object is expected. These helpers keep the
//! well-formed parts and drop the rest instead of failing the whole document.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::amount::Amount;

/// `{key: amount}`; non-object input is an empty table.
pub(crate) fn amount_table(value: &Value) -> BTreeMap<String, Amount> {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| (k.clone(), Amount::from_json(v)))
            .collect(),
        _ => BTreeMap::new(),
    }
}

/// `{outer: {inner: amount}}`; entries whose value is not an object are skipped.
pub(crate) fn nested_amount_table(value: &Value) -> BTreeMap<String, BTreeMap<String, Amount>> {
    match value {
        Value::Object(map) => map
            .iter()
            .filter(|(_, v)| v.is_object())
            .map(|(k, v)| (k.clone(), amount_table(v)))
            .collect(),
        _ => BTreeMap::new(),
    }
}

pub(crate) fn de_nested_amount_table<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<String, BTreeMap<String, Amount>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(nested_amount_table(&raw))
}

pub(crate) fn de_triple_amount_table<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<String, BTreeMap<String, BTreeMap<String, Amount>>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(match raw {
        Value::Object(map) => map
            .iter()
            .filter(|(_, v)| v.is_object())
            .map(|(k, v)| (k.clone(), nested_amount_table(v)))
            .collect(),
        _ => BTreeMap::new(),
    })
}

/// A present key always yields `Some`, even when the value is malformed (zero).
pub(crate) fn de_optional_amount<'de, D>(deserializer: D) -> Result<Option<Amount>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(Some(Amount::from_json(&raw)))
}

/// `Some` only when the value is an object.
pub(crate) fn de_optional_amount_table<'de, D>(
    deserializer: D,
) -> Result<Option<BTreeMap<String, Amount>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    if raw.is_object() {
        Ok(Some(amount_table(&raw)))
    } else {
        Ok(None)
    }
}

/// Strings, numbers rendered as text; anything else is empty.
pub(crate) fn de_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(match raw {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// Like [`de_text`] but blank values become `None`.
pub(crate) fn de_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = de_text(deserializer)?;
    if text.trim().is_empty() {
        Ok(None)
    } else {
        Ok(Some(text))
    }
}
