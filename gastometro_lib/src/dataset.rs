//! The immutable in-memory dataset the engine ranks over.

use gastometro_data::types::{
    parse_legislators, Legislator, LegislatorMap, RankingsDocument, OVERALL_KEY, TOTAL_KEY,
};
use serde_json::Value;

use crate::request::Scope;

/// Legislator records plus the optional precomputed rankings.
///
/// Built once after loading and never mutated; every engine operation takes
/// `&Dataset`.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    legislators: LegislatorMap,
    rankings: Option<RankingsDocument>,
}

impl Dataset {
    /// An empty rankings document is stored as `None` so callers only need
    /// one check to know whether the cache tier exists.
    pub fn new(legislators: LegislatorMap, rankings: Option<RankingsDocument>) -> Self {
        Self {
            legislators,
            rankings: rankings.filter(|doc| !doc.is_empty()),
        }
    }

    /// Build from already-parsed JSON documents. Malformed legislator records
    /// are skipped and a rankings document of the wrong shape is dropped.
    pub fn from_json(legislators: Value, rankings: Option<Value>) -> Self {
        let (legislators, skipped) = parse_legislators(legislators);
        if skipped > 0 {
            tracing::warn!("Skipped {} malformed legislator records", skipped);
        }
        let rankings = rankings.and_then(|raw| match serde_json::from_value(raw) {
            Ok(doc) => Some(doc),
            Err(e) => {
                tracing::warn!("Ignoring rankings document: {}", e);
                None
            }
        });
        Self::new(legislators, rankings)
    }

    pub fn legislators(&self) -> &LegislatorMap {
        &self.legislators
    }

    pub fn legislator(&self, id: &str) -> Option<&Legislator> {
        self.legislators.get(id)
    }

    /// The precomputed rankings, when a non-empty document was loaded.
    pub fn rankings(&self) -> Option<&RankingsDocument> {
        self.rankings.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.legislators.is_empty() && self.rankings.is_none()
    }
}

/// Placeholder keys standing for "no legislator/party/category".
pub fn is_sentinel(key: &str) -> bool {
    let trimmed = key.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none")
}

/// Rollup keys that live next to year keys but are not years.
pub fn is_rollup_key(key: &str) -> bool {
    key == TOTAL_KEY || key == OVERALL_KEY
}

/// A key that names an actual year: neither a rollup nor a sentinel.
pub fn is_year_key(key: &str) -> bool {
    !is_rollup_key(key) && !is_sentinel(key)
}

/// Scopes naming a rollup or sentinel key select nothing.
pub(crate) fn scope_selects_nothing(scope: &Scope) -> bool {
    scope.year().is_some_and(|year| !is_year_key(year))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sentinel_keys() {
        assert!(is_sentinel("none"));
        assert!(is_sentinel("None"));
        assert!(is_sentinel(" NONE "));
        assert!(is_sentinel(""));
        assert!(is_sentinel("   "));
        assert!(!is_sentinel("PT"));
        assert!(!is_sentinel("Nonato"));
    }

    #[test]
    fn rollup_keys() {
        assert!(is_rollup_key("total"));
        assert!(is_rollup_key("totalGeral"));
        assert!(!is_rollup_key("2023"));
    }

    #[test]
    fn year_keys() {
        assert!(is_year_key("2023"));
        assert!(!is_year_key("total"));
        assert!(!is_year_key("totalGeral"));
        assert!(!is_year_key("None"));
        assert!(!is_year_key(""));
        assert!(scope_selects_nothing(&Scope::Year("totalGeral".into())));
        assert!(!scope_selects_nothing(&Scope::Year("2023".into())));
        assert!(!scope_selects_nothing(&Scope::AllYears));
    }

    #[test]
    fn empty_rankings_document_is_dropped() {
        let ds = Dataset::from_json(json!({"1": {"nome": "A"}}), Some(json!({})));
        assert!(ds.rankings().is_none());
        assert_eq!(ds.legislators().len(), 1);
    }

    #[test]
    fn non_object_rankings_document_is_dropped() {
        let ds = Dataset::from_json(json!({}), Some(json!([1, 2])));
        assert!(ds.rankings().is_none());
        assert!(ds.is_empty());
    }

    #[test]
    fn rankings_document_kept() {
        let ds = Dataset::from_json(
            json!({}),
            Some(json!({"Total_ano": {"2023": {"1": 10}}})),
        );
        assert!(ds.rankings().is_some());
        assert!(!ds.is_empty());
    }
}
