//! Per-dimension aggregation over a two-tier source.
//!
//! Each function reads the precomputed rankings document first and falls
//! back to summing the raw legislator records when the relevant section is
//! missing. Output is unfiltered and unsorted, in ascending subject-id order;
//! [`crate::ranking::compute_ranking`] applies the shared pipeline.

use std::collections::BTreeMap;

use gastometro_data::types::{Legislator, YearExpenses, OVERALL_KEY};
use gastometro_data::Amount;

use crate::dataset::{is_sentinel, is_year_key, scope_selects_nothing, Dataset};
use crate::ranking::RankingEntry;
use crate::request::{RankingFilters, Scope};

/// Sum of every category in one year.
pub fn year_sum(expenses: &YearExpenses) -> f64 {
    expenses.values().map(|a| a.value()).sum()
}

/// A legislator's all-years total: the precomputed overall total when it is
/// positive, otherwise the sum of every category of every year.
pub fn legislator_overall(legislator: &Legislator) -> f64 {
    if let Some(total) = legislator
        .precomputed_totals
        .as_ref()
        .and_then(|t| t.total_overall)
        .filter(|t| t.is_positive())
    {
        return total.value();
    }
    legislator
        .expenses_by_year
        .iter()
        .filter(|(year, _)| is_year_key(year))
        .map(|(_, expenses)| year_sum(expenses))
        .sum()
}

/// A legislator's spend in one year, derived from the raw records.
pub fn legislator_year(legislator: &Legislator, year: &str) -> f64 {
    legislator.year(year).map(year_sum).unwrap_or(0.0)
}

fn entries_from_table<'a>(table: impl IntoIterator<Item = (&'a String, &'a Amount)>) -> Vec<RankingEntry> {
    table
        .into_iter()
        .map(|(id, amount)| RankingEntry::new(id, amount.value()))
        .collect()
}

/// Total spend per legislator.
pub fn by_legislator(dataset: &Dataset, scope: &Scope) -> Vec<RankingEntry> {
    if scope_selects_nothing(scope) {
        return Vec::new();
    }
    match scope {
        Scope::AllYears => dataset
            .legislators()
            .iter()
            .map(|(id, leg)| RankingEntry::new(id, legislator_overall(leg)))
            .collect(),
        Scope::Year(year) => {
            if let Some(table) = dataset
                .rankings()
                .and_then(|r| r.total_by_year.get(year.as_str()))
            {
                tracing::debug!("Legislator ranking for {} served from Total_ano", year);
                return entries_from_table(table);
            }
            dataset
                .legislators()
                .iter()
                .map(|(id, leg)| RankingEntry::new(id, legislator_year(leg, year)))
                .collect()
        }
    }
}

/// The year -> amount series of one category for one legislator. Reads the
/// legislator's own precomputed category table when it has the category.
fn category_series(legislator: &Legislator, category: &str) -> BTreeMap<String, f64> {
    if let Some(series) = legislator
        .precomputed_totals
        .as_ref()
        .and_then(|t| t.total_by_category_year.get(category))
    {
        return series
            .iter()
            .map(|(year, amount)| (year.clone(), amount.value()))
            .collect();
    }
    legislator
        .expenses_by_year
        .iter()
        .filter_map(|(year, expenses)| {
            expenses
                .get(category)
                .map(|amount| (year.clone(), amount.value()))
        })
        .collect()
}

/// Spend per legislator within one category.
///
/// All-years entries carry the number of years with a positive amount;
/// only positive per-year amounts are summed, on both tiers.
pub fn by_category(dataset: &Dataset, category: &str, scope: &Scope) -> Vec<RankingEntry> {
    if is_sentinel(category) || scope_selects_nothing(scope) {
        return Vec::new();
    }
    let section = dataset
        .rankings()
        .and_then(|r| r.category_year.get(category))
        .filter(|section| !section.is_empty());

    match (scope, section) {
        (Scope::AllYears, Some(section)) => {
            tracing::debug!("Category ranking for '{}' served from categoria_ano", category);
            let mut totals: BTreeMap<&str, (f64, u32)> = BTreeMap::new();
            for (year, table) in section {
                if !is_year_key(year) {
                    continue;
                }
                for (id, amount) in table {
                    if amount.is_positive() {
                        let slot = totals.entry(id.as_str()).or_insert((0.0, 0));
                        slot.0 += amount.value();
                        slot.1 += 1;
                    }
                }
            }
            totals
                .into_iter()
                .map(|(id, (sum, years))| RankingEntry::with_count(id, sum, years))
                .collect()
        }
        (Scope::AllYears, None) => dataset
            .legislators()
            .iter()
            .filter_map(|(id, leg)| {
                let (sum, years) = category_series(leg, category)
                    .into_iter()
                    .filter(|(year, value)| is_year_key(year) && *value > 0.0)
                    .fold((0.0, 0u32), |(sum, years), (_, value)| (sum + value, years + 1));
                (sum > 0.0).then(|| RankingEntry::with_count(id, sum, years))
            })
            .collect(),
        (Scope::Year(year), Some(section)) => section
            .get(year.as_str())
            .map(entries_from_table)
            .unwrap_or_default(),
        (Scope::Year(year), None) => dataset
            .legislators()
            .iter()
            .filter_map(|(id, leg)| {
                category_series(leg, category)
                    .get(year.as_str())
                    .map(|value| RankingEntry::new(id, *value))
            })
            .collect(),
    }
}

fn passes_member_filters(legislator: &Legislator, filters: &RankingFilters) -> bool {
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

/// Total spend per party, with the member count as supporting count.
///
/// All-years counts every member regardless of activity; a single year counts
/// members with positive spend that year. State and name filters restrict the
/// contributing members and force the derive tier, since the precomputed
/// party tables cannot be split by member.
pub fn by_party(dataset: &Dataset, scope: &Scope, filters: &RankingFilters) -> Vec<RankingEntry> {
    if scope_selects_nothing(scope) {
        return Vec::new();
    }
    let members: Vec<&Legislator> = dataset
        .legislators()
        .values()
        .filter(|leg| !is_sentinel(&leg.party))
        .filter(|leg| passes_member_filters(leg, filters))
        .collect();

    let party_tables = dataset
        .rankings()
        .map(|r| &r.total_by_party)
        .filter(|t| !t.is_empty() && !filters.has_member_filters());

    let mut values: BTreeMap<String, f64> = BTreeMap::new();
    let mut counts: BTreeMap<String, u32> = BTreeMap::new();

    match scope {
        Scope::AllYears => {
            match party_tables {
                Some(tables) => {
                    if let Some(overall) = tables.get(OVERALL_KEY) {
                        for (party, amount) in overall {
                            values.insert(party.clone(), amount.value());
                        }
                    } else {
                        for (year, table) in tables {
                            if !is_year_key(year) {
                                continue;
                            }
                            for (party, amount) in table {
                                *values.entry(party.clone()).or_insert(0.0) += amount.value();
                            }
                        }
                    }
                }
                None => {
                    for leg in &members {
                        *values.entry(leg.party.clone()).or_insert(0.0) += legislator_overall(leg);
                    }
                }
            }
            for leg in &members {
                *counts.entry(leg.party.clone()).or_insert(0) += 1;
            }
        }
        Scope::Year(year) => {
            let cached = party_tables.and_then(|tables| tables.get(year.as_str()));
            if let Some(table) = cached {
                for (party, amount) in table {
                    values.insert(party.clone(), amount.value());
                }
            }
            for leg in &members {
                let spent = legislator_year(leg, year);
                if cached.is_none() {
                    *values.entry(leg.party.clone()).or_insert(0.0) += spent;
                }
                if spent > 0.0 {
                    *counts.entry(leg.party.clone()).or_insert(0) += 1;
                }
            }
        }
    }

    values.retain(|party, _| !is_sentinel(party));
    counts.retain(|party, _| !is_sentinel(party));

    values
        .into_iter()
        .map(|(party, value)| {
            let members = counts.get(&party).copied().unwrap_or(0);
            RankingEntry::with_count(&party, value, members)
        })
        .collect()
}

/// Yearly average per named legislator: overall total divided by the number
/// of years with positive records, or zero when there are none.
pub fn by_yearly_average(dataset: &Dataset) -> Vec<RankingEntry> {
    dataset
        .legislators()
        .iter()
        .filter(|(_, leg)| !leg.name.trim().is_empty())
        .map(|(id, leg)| {
            let (total, years) = average_inputs(leg);
            let average = if years > 0 { total / years as f64 } else { 0.0 };
            RankingEntry::with_count(id, average, years)
        })
        .collect()
}

fn positive_year_sums(legislator: &Legislator) -> impl Iterator<Item = f64> + '_ {
    legislator
        .expenses_by_year
        .iter()
        .filter(|(year, _)| is_year_key(year))
        .map(|(_, expenses)| year_sum(expenses))
        .filter(|sum| *sum > 0.0)
}

fn average_inputs(legislator: &Legislator) -> (f64, u32) {
    match legislator.precomputed_totals {
        Some(ref totals) => {
            let total = totals.total_overall.map(Amount::value).unwrap_or(0.0);
            let years = match totals.total_by_year {
                Some(ref by_year) => by_year
                    .iter()
                    .filter(|(year, amount)| is_year_key(year) && amount.is_positive())
                    .count() as u32,
                None => positive_year_sums(legislator).count() as u32,
            };
            (total, years)
        }
        None => positive_year_sums(legislator).fold((0.0, 0u32), |(total, years), sum| {
            (total + sum, years + 1)
        }),
    }
}
