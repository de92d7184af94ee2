//! Party and category display names, seeded from `seed_data/catalog.toml`.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Deserialize, Debug, Default)]
pub struct Catalog {
    #[serde(default)]
    parties: BTreeMap<String, String>,
    #[serde(default)]
    categories: BTreeMap<String, String>,
}

impl Catalog {
    /// Parse the catalog embedded at compile time.
    pub fn embedded() -> Result<Self> {
        let toml_content = include_str!("../../seed_data/catalog.toml");
        toml::from_str(toml_content).context("embedded catalog is malformed")
    }

    /// Full party name, or the acronym itself when unknown.
    pub fn party_name(&self, acronym: &str) -> String {
        self.parties
            .get(acronym)
            .cloned()
            .unwrap_or_else(|| acronym.to_string())
    }

    /// Short category label, or the title-cased category when unknown.
    pub fn category_label(&self, category: &str) -> String {
        self.categories
            .get(category)
            .cloned()
            .unwrap_or_else(|| title_case(category))
    }
}

pub fn title_case(input: &str) -> String {
    input
        .split_whitespace()
        .map(|word| {
            let lower = word.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
