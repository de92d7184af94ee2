//! The optional precomputed rankings document.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::lenient::{de_nested_amount_table, de_triple_amount_table};
use crate::amount::Amount;

/// Pseudo-key inside a category section holding the all-years rollup.
pub const TOTAL_KEY: &str = "total";

/// Pseudo-key inside the year-keyed tables holding the all-years rollup.
pub const OVERALL_KEY: &str = "totalGeral";

/// Subject (legislator id or party) to amount.
pub type AmountTable = BTreeMap<String, Amount>;

/// Precomputed leaderboards published next to the legislator document.
///
/// Every section is optional; unknown top-level keys (such as a stray
/// `"None"` bucket) are ignored.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct RankingsDocument {
    /// Category -> (year | "total") -> legislator id -> amount.
    #[serde(
        rename = "categoria_ano",
        default,
        deserialize_with = "de_triple_amount_table"
    )]
    pub category_year: BTreeMap<String, BTreeMap<String, AmountTable>>,

    /// (year | "totalGeral") -> legislator id -> amount.
    #[serde(rename = "Total_ano", default, deserialize_with = "de_nested_amount_table")]
    pub total_by_year: BTreeMap<String, AmountTable>,

    /// (year | "totalGeral") -> party -> amount.
    #[serde(
        rename = "Total_partido",
        default,
        deserialize_with = "de_nested_amount_table"
    )]
    pub total_by_party: BTreeMap<String, AmountTable>,
}

impl RankingsDocument {
    /// Returns true when no section carries any data.
    pub fn is_empty(&self) -> bool {
        self.category_year.is_empty()
            && self.total_by_year.is_empty()
            && self.total_by_party.is_empty()
    }

    /// The year sections of `Total_ano`, excluding the overall rollup.
    pub fn years(&self) -> impl Iterator<Item = &str> {
        self.total_by_year
            .keys()
            .map(String::as_str)
            .filter(|k| *k != OVERALL_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_document() {
        let doc: RankingsDocument = serde_json::from_value(json!({})).unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn stray_sections_ignored() {
        let doc: RankingsDocument = serde_json::from_value(json!({
            "None": {"x": 1},
            "Total_ano": {"2023": {"1": 10}, "totalGeral": {"1": 10}}
        }))
        .unwrap();
        assert_eq!(doc.years().collect::<Vec<_>>(), vec!["2023"]);
    }

    #[test]
    fn malformed_section_is_empty() {
        let doc: RankingsDocument =
            serde_json::from_value(json!({"categoria_ano": "broken", "Total_partido": 3}))
                .unwrap();
        assert!(doc.is_empty());
    }
}
