use anyhow::Result;
use clap::{Args, ValueEnum};
use gastometro_lib::browse::{
    available_categories, available_parties, available_states, available_years, category_years,
};
use gastometro_lib::validation;
use gastometro_lib::Dataset;

use crate::catalog::Catalog;
use crate::output::{print_options, OptionRow, OutputFormat};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OptionKind {
    Years,
    Categories,
    Parties,
    States,
}

#[derive(Args)]
pub struct OptionsArgs {
    /// Which selector to list
    #[arg(value_enum)]
    pub kind: OptionKind,

    /// With `years`: only years that have this category
    #[arg(long)]
    pub category: Option<String>,
}

pub fn run(
    args: &OptionsArgs,
    dataset: &Dataset,
    catalog: &Catalog,
    format: &OutputFormat,
) -> Result<()> {
    let rows = build_option_rows(args, dataset, catalog)?;
    eprintln!("{} values", rows.len());
    print_options(rows, format)
}

fn build_option_rows(
    args: &OptionsArgs,
    dataset: &Dataset,
    catalog: &Catalog,
) -> Result<Vec<OptionRow>> {
    let plain = |values: Vec<String>| -> Vec<OptionRow> {
        values
            .into_iter()
            .map(|value| OptionRow {
                value,
                label: String::new(),
            })
            .collect()
    };

    let rows = match args.kind {
        OptionKind::Years => match args.category {
            Some(ref category) => {
                let sanitized = validation::validate_search(category)?;
                plain(category_years(dataset, &sanitized))
            }
            None => plain(available_years(dataset)),
        },
        OptionKind::Categories => available_categories(dataset)
            .into_iter()
            .map(|value| OptionRow {
                label: catalog.category_label(&value),
                value,
            })
            .collect(),
        OptionKind::Parties => available_parties(dataset)
            .into_iter()
            .map(|value| OptionRow {
                label: catalog.party_name(&value),
                value,
            })
            .collect(),
        OptionKind::States => plain(available_states(dataset)),
    };
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dataset() -> Dataset {
        Dataset::from_json(
            json!({
                "1": {"nome": "A", "partido": "PT", "uf": "SP",
                      "gastos": {"2022": {"TELEFONIA": 1}, "2023": {"SERVIÇOS POSTAIS": 2}}}
            }),
            None,
        )
    }

    #[test]
    fn parties_are_labelled() {
        let args = OptionsArgs {
            kind: OptionKind::Parties,
            category: None,
        };
        let rows = build_option_rows(&args, &dataset(), &Catalog::embedded().unwrap()).unwrap();
        assert_eq!(
            rows,
            vec![OptionRow {
                value: "PT".into(),
                label: "Partido dos Trabalhadores".into()
            }]
        );
    }

    #[test]
    fn years_for_category() {
        let args = OptionsArgs {
            kind: OptionKind::Years,
            category: Some("TELEFONIA".into()),
        };
        let rows = build_option_rows(&args, &dataset(), &Catalog::embedded().unwrap()).unwrap();
        let values: Vec<&str> = rows.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(values, vec!["2022"]);
    }
}
