use anyhow::{bail, Result};
use chrono::{Datelike, Utc};
use clap::Args;
use gastometro_lib::breakdown::chamber_summary;
use gastometro_lib::browse::available_years;
use gastometro_lib::validation;
use gastometro_lib::Dataset;

use crate::catalog::Catalog;
use crate::commands::legislator::category_items;
use crate::output::{format_brl, print_breakdown, OutputFormat};

#[derive(Args)]
pub struct ChamberArgs {
    /// Year to summarize (defaults to the current year)
    #[arg(long)]
    pub year: Option<String>,
}

pub fn run(
    args: &ChamberArgs,
    dataset: &Dataset,
    catalog: &Catalog,
    format: &OutputFormat,
) -> Result<()> {
    let year = match args.year {
        Some(ref y) => validation::validate_year(y)?,
        None => Utc::now().year().to_string(),
    };

    let Some(summary) = chamber_summary(dataset, &year) else {
        let years = available_years(dataset);
        if years.is_empty() {
            bail!("no expense records for {}", year);
        }
        bail!(
            "no expense records for {}. Available years: {}",
            year,
            years.join(", ")
        );
    };

    eprintln!(
        "Chamber spending in {}: {} across {} categories",
        summary.year,
        format_brl(summary.total),
        summary.categories.len()
    );

    print_breakdown(&category_items(&summary, catalog), format)
}
