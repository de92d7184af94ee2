use anyhow::{bail, Result};
use clap::Args;
use gastometro_lib::browse::available_categories;
use gastometro_lib::config::Config;
use gastometro_lib::validation;
use gastometro_lib::{
    compute_ranking, Dataset, Dimension, RankingEntry, RankingRequest, Scope, SortDirection,
};

use crate::catalog::Catalog;
use crate::output::{print_ranking, OutputFormat, RankedItem};

#[derive(Args)]
pub struct RankArgs {
    /// What to rank: legislator, category, party, average
    #[arg(long, default_value = "legislator")]
    pub by: String,

    /// Expense category, required with --by category (case-insensitive)
    #[arg(long)]
    pub category: Option<String>,

    /// Year (e.g. 2023) or "all" for every year
    #[arg(long, default_value = "all")]
    pub year: String,

    /// Filter by party acronym (e.g. PT, PL)
    #[arg(long)]
    pub party: Option<String>,

    /// Filter by state code (e.g. SP, RJ)
    #[arg(long)]
    pub state: Option<String>,

    /// Filter by legislator name substring
    #[arg(long)]
    pub name: Option<String>,

    /// Sort order: desc (maior) or asc (menor)
    #[arg(long, default_value = "desc")]
    pub sort: String,

    /// Rows to show (defaults to the configured top)
    #[arg(long)]
    pub top: Option<usize>,
}

pub fn run(
    args: &RankArgs,
    dataset: &Dataset,
    config: &Config,
    catalog: &Catalog,
    format: &OutputFormat,
) -> Result<()> {
    let dimension = parse_dimension(args, dataset)?;
    let scope = validation::parse_scope(&args.year)?;
    let sort_direction = validation::parse_sort_direction(&args.sort)?;
    let top = validation::validate_top(args.top.unwrap_or(config.display.top))?;

    let mut request = RankingRequest::new(dimension)
        .with_scope(scope)
        .with_sort_direction(sort_direction);

    if let Some(ref party) = args.party {
        let validated = validation::validate_party(party)?;
        request = request.with_party(&validated);
    }

    if let Some(ref state) = args.state {
        let validated = validation::validate_state(state)?;
        request = request.with_state(&validated);
    }

    if let Some(ref name) = args.name {
        let sanitized = validation::validate_search(name)?;
        request = request.with_name(&sanitized);
    }

    let entries = compute_ranking(dataset, &request);
    let total = entries.len();
    let shown = &entries[..total.min(top)];
    let items = build_ranked_items(dataset, catalog, &request.dimension, shown);

    eprintln!("{}", heading(&request, catalog));
    eprintln!("Showing {} of {} entries", items.len(), total);

    print_ranking(&items, format)
}

fn parse_dimension(args: &RankArgs, dataset: &Dataset) -> Result<Dimension> {
    let dimension = match args.by.trim().to_lowercase().as_str() {
        "legislator" | "deputado" | "parlamentar" => Dimension::ByLegislator,
        "party" | "partido" => Dimension::ByParty,
        "average" | "media" | "média" | "yearly-average" => Dimension::ByYearlyAverage,
        "category" | "categoria" => {
            let Some(ref raw) = args.category else {
                bail!("--by category requires --category (see `gastometro options categories`)");
            };
            let sanitized = validation::validate_search(raw)?;
            Dimension::ByCategory(resolve_category(dataset, &sanitized))
        }
        other => bail!(
            "unknown ranking '{}'. Valid values: legislator, category, party, average",
            other
        ),
    };
    Ok(dimension)
}

/// Match a category case-insensitively against the known categories, keeping
/// the input as typed when nothing matches.
fn resolve_category(dataset: &Dataset, input: &str) -> String {
    let wanted = input.to_lowercase();
    available_categories(dataset)
        .into_iter()
        .find(|c| c.to_lowercase() == wanted)
        .unwrap_or_else(|| input.to_string())
}

fn build_ranked_items(
    dataset: &Dataset,
    catalog: &Catalog,
    dimension: &Dimension,
    entries: &[RankingEntry],
) -> Vec<RankedItem> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let detail = entry
                .supporting_count
                .map(|n| count_label(dimension, n))
                .unwrap_or_default();
            let (name, party, state) = match dimension {
                Dimension::ByParty => (catalog.party_name(&entry.subject_id), None, None),
                _ => match dataset.legislator(&entry.subject_id) {
                    Some(leg) => (
                        leg.name.clone(),
                        Some(leg.party.clone()).filter(|p| !p.is_empty()),
                        Some(leg.state.clone()).filter(|s| !s.is_empty()),
                    ),
                    None => (entry.subject_id.clone(), None, None),
                },
            };
            RankedItem {
                rank: i + 1,
                subject_id: entry.subject_id.clone(),
                name,
                party,
                state,
                amount: entry.display_value,
                supporting_count: entry.supporting_count,
                detail,
            }
        })
        .collect()
}

fn count_label(dimension: &Dimension, n: u32) -> String {
    let (one, many) = match dimension {
        Dimension::ByParty => ("member", "members"),
        _ => ("year", "years"),
    };
    format!("{} {}", n, if n == 1 { one } else { many })
}

fn heading(request: &RankingRequest, catalog: &Catalog) -> String {
    let order = match request.sort_direction {
        SortDirection::Descending => "Highest",
        SortDirection::Ascending => "Lowest",
    };
    let scope = match request.scope {
        Scope::AllYears => "across all years".to_string(),
        Scope::Year(ref year) => format!("in {}", year),
    };
    match request.dimension {
        Dimension::ByLegislator => format!("{} spending {}", order, scope),
        Dimension::ByCategory(ref category) => format!(
            "{} spending on {} {}",
            order,
            catalog.category_label(category),
            scope
        ),
        Dimension::ByParty => format!("{} party spending {}", order, scope),
        Dimension::ByYearlyAverage => format!("{} yearly averages", order),
    }
}
