//! The ranking pipeline: aggregate, drop sentinels and empty entries,
//! filter, then sort.

use std::cmp::Ordering;

use serde::Serialize;

use crate::aggregate;
use crate::dataset::{is_sentinel, Dataset};
use crate::request::{Dimension, RankingFilters, RankingRequest, SortDirection};

/// One row of a ranking.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct RankingEntry {
    /// Legislator id, or party acronym for party rankings.
    pub subject_id: String,
    /// The amount being ranked, in reais.
    pub display_value: f64,
    /// Years with records (category and yearly average) or member count
    /// (party); absent for plain legislator totals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supporting_count: Option<u32>,
}

impl RankingEntry {
    pub fn new(subject_id: impl Into<String>, display_value: f64) -> Self {
        Self {
            subject_id: subject_id.into(),
            display_value,
            supporting_count: None,
        }
    }

    pub fn with_count(subject_id: impl Into<String>, display_value: f64, count: u32) -> Self {
        Self {
            subject_id: subject_id.into(),
            display_value,
            supporting_count: Some(count),
        }
    }
}

/// Compute a ranking over `dataset`.
///
/// Never fails: missing or malformed data shrinks the result, possibly to
/// empty. Entries with sentinel subjects are always dropped, and entries with
/// a non-positive value are dropped for every dimension except
/// [`Dimension::ByYearlyAverage`]. Ties keep ascending subject-id order.
pub fn compute_ranking(dataset: &Dataset, request: &RankingRequest) -> Vec<RankingEntry> {
    let (entries, keep_non_positive) = match request.dimension {
        Dimension::ByLegislator => (aggregate::by_legislator(dataset, &request.scope), false),
        Dimension::ByCategory(ref category) => (
            aggregate::by_category(dataset, category, &request.scope),
            false,
        ),
        Dimension::ByParty => (
            aggregate::by_party(dataset, &request.scope, &request.filters),
            false,
        ),
        Dimension::ByYearlyAverage => (aggregate::by_yearly_average(dataset), true),
    };
    let party_subjects = request.dimension == Dimension::ByParty;

    let mut entries: Vec<RankingEntry> = entries
        .into_iter()
        .filter(|e| !is_sentinel(&e.subject_id))
        .filter(|e| keep_non_positive || e.display_value > 0.0)
        .filter(|e| {
            if party_subjects {
                party_matches(&e.subject_id, &request.filters)
            } else {
                legislator_matches(dataset, &e.subject_id, &request.filters)
            }
        })
        .collect();

    sort_entries(&mut entries, request.sort_direction);
    tracing::debug!(
        "Ranking {:?} over {:?}: {} entries",
        request.dimension,
        request.scope,
        entries.len()
    );
    entries
}

/// Party rankings match the party filter against the subject itself; member
/// filters were already applied during aggregation.
fn party_matches(party: &str, filters: &RankingFilters) -> bool {
    filters.party.as_deref().map_or(true, |p| p == party)
}

/// Entries whose subject has no legislator record fail every active filter.
fn legislator_matches(dataset: &Dataset, id: &str, filters: &RankingFilters) -> bool {
    if filters.is_empty() {
        return true;
    }
    let Some(legislator) = dataset.legislator(id) else {
        return false;
    };
    if let Some(ref party) = filters.party {
        if &legislator.party != party {
            return false;
        }
    }
    if let Some(ref state) = filters.state {
        if &legislator.state != state {
            return false;
        }
    }
    if let Some(ref needle) = filters.name_contains {
        if !legislator
            .name
            .to_lowercase()
            .contains(&needle.to_lowercase())
        {
            return false;
        }
    }
    true
}

fn sort_entries(entries: &mut [RankingEntry], direction: SortDirection) {
    entries.sort_by(|a, b| {
        let ord = a
            .display_value
            .partial_cmp(&b.display_value)
            .unwrap_or(Ordering::Equal);
        match direction {
            SortDirection::Descending => ord.reverse(),
            SortDirection::Ascending => ord,
        }
    });
}
