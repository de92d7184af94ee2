//! Per-year drill-downs: one legislator's categories, or the whole chamber's.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use rand::seq::IteratorRandom;
use rand::Rng;
use serde::Serialize;

use gastometro_data::types::YearExpenses;

use crate::dataset::{is_sentinel, is_year_key, Dataset};

/// One category line of a breakdown.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct CategoryAmount {
    pub category: String,
    pub amount: f64,
}

/// Categories of a single year, largest first, with their total.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct YearBreakdown {
    pub year: String,
    pub categories: Vec<CategoryAmount>,
    pub total: f64,
}

/// Ties keep category-name order since inputs come from sorted maps.
fn sorted_categories(sums: BTreeMap<String, f64>) -> Vec<CategoryAmount> {
    let mut categories: Vec<CategoryAmount> = sums
        .into_iter()
        .filter(|(category, _)| !is_sentinel(category))
        .map(|(category, amount)| CategoryAmount { category, amount })
        .collect();
    categories.sort_by(|a, b| b.amount.partial_cmp(&a.amount).unwrap_or(Ordering::Equal));
    categories
}

fn breakdown_of(year: &str, expenses: &YearExpenses) -> YearBreakdown {
    let sums = expenses
        .iter()
        .map(|(category, amount)| (category.clone(), amount.value()))
        .collect();
    let categories = sorted_categories(sums);
    let total = categories.iter().map(|c| c.amount).sum();
    YearBreakdown {
        year: year.to_string(),
        categories,
        total,
    }
}

/// One legislator's categories for `year`. `None` when the legislator is
/// unknown or has no record for that year.
pub fn legislator_year_breakdown(
    dataset: &Dataset,
    id: &str,
    year: &str,
) -> Option<YearBreakdown> {
    if !is_year_key(year) {
        return None;
    }
    let expenses = dataset.legislator(id)?.year(year)?;
    Some(breakdown_of(year, expenses))
}

/// A random legislator with at least one year of records, and one of their
/// years. `None` when no legislator qualifies.
pub fn random_legislator_year<R: Rng + ?Sized>(
    dataset: &Dataset,
    rng: &mut R,
) -> Option<(String, String)> {
    let (id, legislator) = dataset
        .legislators()
        .iter()
        .filter(|(_, leg)| leg.expenses_by_year.keys().any(|y| is_year_key(y)))
        .choose(&mut *rng)?;
    let year = legislator
        .expenses_by_year
        .keys()
        .filter(|y| is_year_key(y))
        .choose(rng)?;
    Some((id.clone(), year.clone()))
}

/// Every legislator's categories for `year`, summed per category. `None`
/// when nobody has records for that year.
pub fn chamber_summary(dataset: &Dataset, year: &str) -> Option<YearBreakdown> {
    if !is_year_key(year) {
        return None;
    }
    let mut sums: BTreeMap<String, f64> = BTreeMap::new();
    for expenses in dataset.legislators().values().filter_map(|leg| leg.year(year)) {
        for (category, amount) in expenses {
            *sums.entry(category.clone()).or_insert(0.0) += amount.value();
        }
    }
    if sums.is_empty() {
        tracing::debug!("No records for {}", year);
        return None;
    }
    let categories = sorted_categories(sums);
    let total = categories.iter().map(|c| c.amount).sum();
    Some(YearBreakdown {
        year: year.to_string(),
        categories,
        total,
    })
}
