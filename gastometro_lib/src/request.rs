//! Ranking requests: the dimension, scope, sort order, and filters of one
//! ranking computation, as an immutable value built with `with_*` methods.

use serde::Serialize;

/// What is being ranked.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "category", rename_all = "snake_case")]
pub enum Dimension {
    /// Total spend per legislator.
    ByLegislator,
    /// Spend per legislator within one expense category.
    ByCategory(String),
    /// Total spend per party.
    ByParty,
    /// Overall spend divided by the number of years with records.
    ByYearlyAverage,
}

/// Which years a ranking covers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Every year in the dataset ("All years" / "Overall").
    AllYears,
    /// A single year, e.g. "2023".
    Year(String),
}

impl Scope {
    pub fn year(&self) -> Option<&str> {
        match self {
            Scope::AllYears => None,
            Scope::Year(y) => Some(y.as_str()),
        }
    }
}

/// Sort order for ranking output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Largest first. This is the default.
    #[default]
    Descending,
    /// Smallest first.
    Ascending,
}

/// Optional predicates applied after aggregation. `None` means inactive.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RankingFilters {
    /// Exact party match.
    pub party: Option<String>,
    /// Exact state (UF) match.
    pub state: Option<String>,
    /// Case-insensitive substring of the legislator name.
    pub name_contains: Option<String>,
}

impl RankingFilters {
    /// Returns true when no predicate is active.
    pub fn is_empty(&self) -> bool {
        self.party.is_none() && self.state.is_none() && self.name_contains.is_none()
    }

    /// Returns true when a predicate other than the party one is active.
    pub fn has_member_filters(&self) -> bool {
        self.state.is_some() || self.name_contains.is_some()
    }
}

/// One ranking computation: dimension, scope, order, and filters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RankingRequest {
    pub dimension: Dimension,
    pub scope: Scope,
    pub sort_direction: SortDirection,
    pub filters: RankingFilters,
}

impl RankingRequest {
    /// A descending, unfiltered, all-years request for `dimension`.
    pub fn new(dimension: Dimension) -> Self {
        Self {
            dimension,
            scope: Scope::AllYears,
            sort_direction: SortDirection::Descending,
            filters: RankingFilters::default(),
        }
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_year(self, year: &str) -> Self {
        self.with_scope(Scope::Year(year.to_string()))
    }

    pub fn with_sort_direction(mut self, sort_direction: SortDirection) -> Self {
        self.sort_direction = sort_direction;
        self
    }

    pub fn with_party(mut self, party: &str) -> Self {
        self.filters.party = Some(party.to_string());
        self
    }

    pub fn with_state(mut self, state: &str) -> Self {
        self.filters.state = Some(state.to_string());
        self
    }

    /// Blank input leaves the name filter inactive.
    pub fn with_name(mut self, name: &str) -> Self {
        let trimmed = name.trim();
        self.filters.name_contains = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let req = RankingRequest::new(Dimension::ByLegislator);
        assert_eq!(req.scope, Scope::AllYears);
        assert_eq!(req.sort_direction, SortDirection::Descending);
        assert!(req.filters.is_empty());
    }

    #[test]
    fn builder_chain() {
        let req = RankingRequest::new(Dimension::ByCategory("TELEFONIA".into()))
            .with_year("2023")
            .with_sort_direction(SortDirection::Ascending)
            .with_party("PT")
            .with_state("SP")
            .with_name("sil");
        assert_eq!(req.scope.year(), Some("2023"));
        assert_eq!(req.filters.party.as_deref(), Some("PT"));
        assert_eq!(req.filters.state.as_deref(), Some("SP"));
        assert_eq!(req.filters.name_contains.as_deref(), Some("sil"));
        assert!(req.filters.has_member_filters());
    }

    #[test]
    fn blank_name_is_inactive() {
        let req = RankingRequest::new(Dimension::ByLegislator).with_name("   ");
        assert!(req.filters.name_contains.is_none());
    }

    #[test]
    fn party_only_is_not_member_filter() {
        let req = RankingRequest::new(Dimension::ByParty).with_party("PL");
        assert!(!req.filters.has_member_filters());
        assert!(!req.filters.is_empty());
    }
}
