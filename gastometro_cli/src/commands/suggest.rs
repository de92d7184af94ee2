use anyhow::Result;
use clap::Args;
use gastometro_lib::browse::{find_legislator_by_name, name_suggestions};
use gastometro_lib::config::Config;
use gastometro_lib::validation;
use gastometro_lib::Dataset;

use crate::output::{print_suggestions, OutputFormat, SuggestionRow};

#[derive(Args)]
pub struct SuggestArgs {
    /// Part of a legislator name
    pub query: String,

    /// Maximum suggestions (defaults to the configured cap)
    #[arg(long)]
    pub limit: Option<usize>,
}

pub fn run(
    args: &SuggestArgs,
    dataset: &Dataset,
    config: &Config,
    format: &OutputFormat,
) -> Result<()> {
    let query = validation::validate_search(&args.query)?;
    let limit = validation::validate_top(args.limit.unwrap_or(config.display.suggestions))?;

    let rows: Vec<SuggestionRow> = name_suggestions(dataset, &query, limit)
        .into_iter()
        .map(|name| {
            let (party, state) = find_legislator_by_name(dataset, &name)
                .map(|(_, leg)| (leg.party.clone(), leg.state.clone()))
                .unwrap_or_default();
            SuggestionRow { name, party, state }
        })
        .collect();

    eprintln!("{} suggestions for '{}'", rows.len(), query);
    print_suggestions(rows, format)
}
