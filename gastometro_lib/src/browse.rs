//! Selector options and name lookup over a loaded dataset.
//!
//! Everything here is sorted, deduplicated, and free of placeholder keys.

use std::collections::BTreeSet;

use gastometro_data::types::{Legislator, LegislatorID};

use crate::dataset::{is_sentinel, is_year_key, Dataset};

/// Default cap on name suggestions.
pub const DEFAULT_SUGGESTIONS: usize = 8;

/// Minimum Jaro-Winkler score for a "did you mean" candidate.
pub const CLOSEST_NAME_THRESHOLD: f64 = 0.80;

/// Years with data: the precomputed year sections when present, otherwise
/// every year appearing in the raw records.
pub fn available_years(dataset: &Dataset) -> Vec<String> {
    if let Some(rankings) = dataset.rankings() {
        let years: BTreeSet<String> = rankings
            .years()
            .filter(|y| !is_sentinel(y))
            .map(str::to_string)
            .collect();
        if !years.is_empty() {
            return years.into_iter().collect();
        }
    }
    raw_years(dataset)
}

fn raw_years(dataset: &Dataset) -> Vec<String> {
    dataset
        .legislators()
        .values()
        .flat_map(|leg| leg.expenses_by_year.keys())
        .filter(|y| is_year_key(y))
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Years with data for one category.
pub fn category_years(dataset: &Dataset, category: &str) -> Vec<String> {
    if let Some(section) = dataset
        .rankings()
        .and_then(|r| r.category_year.get(category))
        .filter(|s| !s.is_empty())
    {
        return section
            .keys()
            .filter(|y| is_year_key(y))
            .cloned()
            .collect();
    }
    dataset
        .legislators()
        .values()
        .flat_map(|leg| {
            leg.expenses_by_year
                .iter()
                .filter(|(_, expenses)| expenses.contains_key(category))
                .map(|(year, _)| year)
        })
        .filter(|y| is_year_key(y))
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Expense categories: the precomputed category sections when present,
/// otherwise every category appearing in the raw records.
pub fn available_categories(dataset: &Dataset) -> Vec<String> {
    let cached: Vec<String> = dataset
        .rankings()
        .map(|r| {
            r.category_year
                .keys()
                .filter(|c| !is_sentinel(c))
                .cloned()
                .collect()
        })
        .unwrap_or_default();
    if !cached.is_empty() {
        return cached;
    }
    dataset
        .legislators()
        .values()
        .flat_map(|leg| {
            leg.expenses_by_year
                .iter()
                .filter(|(year, _)| is_year_key(year))
                .flat_map(|(_, expenses)| expenses.keys())
        })
        .filter(|c| !is_sentinel(c))
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct party acronyms among the legislators.
pub fn available_parties(dataset: &Dataset) -> Vec<String> {
    distinct(dataset, |leg| &leg.party)
}

/// Distinct state codes among the legislators.
pub fn available_states(dataset: &Dataset) -> Vec<String> {
    distinct(dataset, |leg| &leg.state)
}

fn distinct<F>(dataset: &Dataset, field: F) -> Vec<String>
where
    F: Fn(&Legislator) -> &String,
{
    dataset
        .legislators()
        .values()
        .map(field)
        .map(|v| v.trim())
        .filter(|v| !is_sentinel(v))
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Legislator names containing `query` (case-insensitive), in name order,
/// capped at `limit`. A blank query yields nothing.
pub fn name_suggestions(dataset: &Dataset, query: &str, limit: usize) -> Vec<String> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    dataset
        .legislators()
        .values()
        .map(|leg| leg.name.as_str())
        .filter(|name| !name.trim().is_empty())
        .filter(|name| name.to_lowercase().contains(&needle))
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .take(limit)
        .collect()
}

/// Case-insensitive exact name match. When several legislators share a
/// name, the lowest id wins.
pub fn find_legislator_by_name<'a>(
    dataset: &'a Dataset,
    name: &str,
) -> Option<(&'a LegislatorID, &'a Legislator)> {
    let wanted = name.trim().to_lowercase();
    if wanted.is_empty() {
        return None;
    }
    dataset
        .legislators()
        .iter()
        .find(|(_, leg)| leg.name.trim().to_lowercase() == wanted)
}

/// Names most similar to `name`, best first, for "did you mean" hints.
pub fn closest_names(dataset: &Dataset, name: &str, limit: usize) -> Vec<String> {
    let wanted = name.trim().to_lowercase();
    if wanted.is_empty() {
        return Vec::new();
    }
    let mut scored: Vec<(f64, &str)> = dataset
        .legislators()
        .values()
        .map(|leg| leg.name.as_str())
        .filter(|n| !n.trim().is_empty())
        .map(|n| (strsim::jaro_winkler(&wanted, &n.to_lowercase()), n))
        .filter(|(score, _)| *score >= CLOSEST_NAME_THRESHOLD)
        .collect();
    scored.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.1.cmp(b.1))
    });
    scored.dedup_by(|a, b| a.1 == b.1);
    scored
        .into_iter()
        .take(limit)
        .map(|(_, n)| n.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Dataset {
        Dataset::from_json(
            json!({
                "1": {"nome": "Maria Silva", "partido": "PT", "uf": "SP",
                      "gastos": {"2021": {"Travel": 10}, "2022": {"Food": 5}}},
                "2": {"nome": "João Souza", "partido": "PL", "uf": "RJ",
                      "gastos": {"2022": {"Travel": 3}}},
                "3": {"nome": "Silvana Reis", "partido": "none", "uf": "",
                      "gastos": {"None": {"None": 1}}},
                "4": {"nome": "", "partido": "PT", "uf": "MG"}
            }),
            None,
        )
    }

    #[test]
    fn raw_years_and_categories() {
        let ds = sample();
        assert_eq!(available_years(&ds), vec!["2021", "2022"]);
        assert_eq!(available_categories(&ds), vec!["Food", "Travel"]);
        assert_eq!(category_years(&ds, "Travel"), vec!["2021", "2022"]);
        assert_eq!(category_years(&ds, "Food"), vec!["2022"]);
    }

    #[test]
    fn cached_years_and_categories() {
        let ds = Dataset::from_json(
            json!({}),
            Some(json!({
                "categoria_ano": {"Travel": {"2020": {}, "total": {}}, "None": {}},
                "Total_ano": {"2019": {}, "2020": {}, "totalGeral": {}}
            })),
        );
        assert_eq!(available_years(&ds), vec!["2019", "2020"]);
        assert_eq!(available_categories(&ds), vec!["Travel"]);
        assert_eq!(category_years(&ds, "Travel"), vec!["2020"]);
    }

    #[test]
    fn parties_and_states_skip_sentinels() {
        let ds = sample();
        assert_eq!(available_parties(&ds), vec!["PL", "PT"]);
        assert_eq!(available_states(&ds), vec!["MG", "RJ", "SP"]);
    }

    #[test]
    fn suggestions_are_capped_and_sorted() {
        let ds = sample();
        assert_eq!(
            name_suggestions(&ds, "SILV", 8),
            vec!["Maria Silva", "Silvana Reis"]
        );
        assert_eq!(name_suggestions(&ds, "silv", 1), vec!["Maria Silva"]);
        assert!(name_suggestions(&ds, "  ", 8).is_empty());
    }

    #[test]
    fn exact_lookup_is_case_insensitive() {
        let ds = sample();
        let (id, leg) = find_legislator_by_name(&ds, "maria silva").unwrap();
        assert_eq!(id, "1");
        assert_eq!(leg.party, "PT");
        assert!(find_legislator_by_name(&ds, "maria").is_none());
        assert!(find_legislator_by_name(&ds, "").is_none());
    }

    #[test]
    fn closest_names_ranks_similar_names() {
        let ds = sample();
        let hints = closest_names(&ds, "Maria Silvaa", 3);
        assert_eq!(hints.first().map(String::as_str), Some("Maria Silva"));
        assert!(closest_names(&ds, "zzzzzz", 3).is_empty());
    }
}
