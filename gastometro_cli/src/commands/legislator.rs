use anyhow::{bail, Result};
use clap::Args;
use gastometro_lib::breakdown::{legislator_year_breakdown, random_legislator_year, YearBreakdown};
use gastometro_lib::browse::{closest_names, find_legislator_by_name, name_suggestions};
use gastometro_lib::dataset::is_year_key;
use gastometro_lib::types::Legislator;
use gastometro_lib::validation;
use gastometro_lib::Dataset;

use crate::catalog::Catalog;
use crate::output::{format_brl, print_breakdown, CategoryItem, OutputFormat};

#[derive(Args)]
pub struct LegislatorArgs {
    /// Legislator name (exact, case-insensitive). A random legislator is
    /// shown when omitted.
    pub name: Option<String>,

    /// Year of the breakdown (defaults to the latest year on record)
    #[arg(long)]
    pub year: Option<String>,
}

pub fn run(
    args: &LegislatorArgs,
    dataset: &Dataset,
    catalog: &Catalog,
    format: &OutputFormat,
) -> Result<()> {
    let (id, year) = match args.name {
        Some(ref name) => {
            let sanitized = validation::validate_search(name)?;
            let Some((id, legislator)) = find_legislator_by_name(dataset, &sanitized) else {
                bail!("{}", not_found_message(dataset, &sanitized));
            };
            let year = match args.year {
                Some(ref y) => validation::validate_year(y)?,
                None => match latest_year(legislator) {
                    Some(y) => y,
                    None => bail!("{} has no expense records", legislator.name),
                },
            };
            (id.clone(), year)
        }
        None => {
            if args.year.is_some() {
                bail!("--year requires a legislator name");
            }
            match random_legislator_year(dataset, &mut rand::thread_rng()) {
                Some(pick) => pick,
                None => bail!("no legislator has expense records"),
            }
        }
    };

    let Some(legislator) = dataset.legislator(&id) else {
        bail!("unknown legislator id {}", id);
    };
    let Some(breakdown) = legislator_year_breakdown(dataset, &id, &year) else {
        bail!("{} has no records for {}", legislator.name, year);
    };

    eprintln!("{}", describe(legislator, &breakdown));
    if let Some(image) = legislator.image_ref() {
        eprintln!("Photo: {}", image);
    }

    print_breakdown(&category_items(&breakdown, catalog), format)
}

fn latest_year(legislator: &Legislator) -> Option<String> {
    legislator
        .expenses_by_year
        .keys()
        .filter(|y| is_year_key(y))
        .max()
        .cloned()
}

fn not_found_message(dataset: &Dataset, name: &str) -> String {
    let mut hints = closest_names(dataset, name, 3);
    if hints.is_empty() {
        hints = name_suggestions(dataset, name, 3);
    }
    if hints.is_empty() {
        format!("no legislator named '{}'", name)
    } else {
        format!(
            "no legislator named '{}'. Did you mean: {}?",
            name,
            hints.join(", ")
        )
    }
}

fn describe(legislator: &Legislator, breakdown: &YearBreakdown) -> String {
    let affiliation = match (legislator.party.is_empty(), legislator.state.is_empty()) {
        (false, false) => format!(" ({}-{})", legislator.party, legislator.state),
        (false, true) => format!(" ({})", legislator.party),
        (true, false) => format!(" ({})", legislator.state),
        (true, true) => String::new(),
    };
    format!(
        "{}{}, {}: {}",
        legislator.name,
        affiliation,
        breakdown.year,
        format_brl(breakdown.total)
    )
}

/// Shares are percentages of the year total; a zero total gives zero shares.
pub fn category_items(breakdown: &YearBreakdown, catalog: &Catalog) -> Vec<CategoryItem> {
    breakdown
        .categories
        .iter()
        .map(|c| CategoryItem {
            category: c.category.clone(),
            label: catalog.category_label(&c.category),
            amount: c.amount,
            share: if breakdown.total > 0.0 {
                c.amount / breakdown.total * 100.0
            } else {
                0.0
            },
        })
        .collect()
}
