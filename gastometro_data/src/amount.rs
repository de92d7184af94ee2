//! Monetary amounts as they appear in the source feed.
//!
//! The feed mixes JSON numbers with pt-BR formatted strings (`"1.234,56"`:
//! thousands dot, decimal comma). Every amount is normalized to an `f64`
//! at deserialization time; anything that cannot be read becomes zero.

use serde::{Deserialize, Deserializer, Serialize};

/// A canonical monetary amount in reais.
#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
#[serde(transparent)]
pub struct Amount(pub f64);

impl Amount {
    pub const ZERO: Amount = Amount(0.0);

    /// The numeric value.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Returns true when the amount is strictly greater than zero.
    pub fn is_positive(self) -> bool {
        self.0 > 0.0
    }

    /// Reads an amount from an arbitrary JSON value.
    ///
    /// Numbers are taken as-is, strings go through [`parse_amount`], and every
    /// other shape (null, bool, array, object) is zero.
    pub fn from_json(value: &serde_json::Value) -> Amount {
        match value {
            serde_json::Value::Number(n) => match n.as_f64() {
                Some(v) if v.is_finite() => Amount(v),
                _ => Amount::ZERO,
            },
            serde_json::Value::String(s) => Amount(parse_amount(s)),
            _ => Amount::ZERO,
        }
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Amount(value)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(Amount::from_json(&raw))
    }
}

/// Parse a pt-BR formatted amount string into a number.
///
/// Thousands dots are dropped and the decimal comma becomes a point, so
/// `"1.234,56"` parses to `1234.56`. Blank, malformed, or non-finite input
/// yields `0.0`.
pub fn parse_amount(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    let canonical = trimmed.replace('.', "").replace(',', ".");
    match canonical.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => {
            tracing::trace!("Malformed amount '{}' treated as zero", raw);
            0.0
        }
    }
}
