use anyhow::Result;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::xml_output;

#[derive(Clone, Debug, PartialEq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
    Xml,
}

impl OutputFormat {
    /// Unknown names fall back to the table layout.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            "md" | "markdown" => OutputFormat::Markdown,
            "xml" => OutputFormat::Xml,
            _ => OutputFormat::Table,
        }
    }
}

/// One ranked subject as emitted in JSON and XML.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct RankedItem {
    pub rank: usize,
    pub subject_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub party: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supporting_count: Option<u32>,
    /// Human-readable count ("2 years", "15 members") for table layouts.
    #[serde(skip)]
    pub detail: String,
}

/// One category line of a drill-down as emitted in JSON and XML.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct CategoryItem {
    pub category: String,
    pub label: String,
    pub amount: f64,
    /// Percentage of the year total.
    pub share: f64,
}

#[derive(Tabled, Serialize)]
struct RankingRow {
    #[tabled(rename = "#")]
    #[serde(rename = "Rank")]
    rank: usize,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Party")]
    #[serde(rename = "Party")]
    party: String,
    #[tabled(rename = "UF")]
    #[serde(rename = "UF")]
    state: String,
    #[tabled(rename = "Amount")]
    #[serde(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Detail")]
    #[serde(rename = "Detail")]
    detail: String,
}

#[derive(Tabled, Serialize)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    #[serde(rename = "Category")]
    label: String,
    #[tabled(rename = "Amount")]
    #[serde(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Share")]
    #[serde(rename = "Share")]
    share: String,
}

#[derive(Tabled, Serialize, Clone, Debug, PartialEq)]
pub struct OptionRow {
    #[tabled(rename = "Value")]
    #[serde(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Label")]
    #[serde(rename = "Label")]
    pub label: String,
}

#[derive(Tabled, Serialize, Clone, Debug, PartialEq)]
pub struct SuggestionRow {
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Party")]
    #[serde(rename = "Party")]
    pub party: String,
    #[tabled(rename = "UF")]
    #[serde(rename = "UF")]
    pub state: String,
}

// -- Row builders --

fn build_ranking_rows(items: &[RankedItem]) -> Vec<RankingRow> {
    items
        .iter()
        .map(|i| RankingRow {
            rank: i.rank,
            name: i.name.clone(),
            party: i.party.clone().unwrap_or_default(),
            state: i.state.clone().unwrap_or_default(),
            amount: format_brl(i.amount),
            detail: i.detail.clone(),
        })
        .collect()
}

fn build_category_rows(items: &[CategoryItem]) -> Vec<CategoryRow> {
    items
        .iter()
        .map(|i| CategoryRow {
            label: i.label.clone(),
            amount: format_brl(i.amount),
            share: format!("{:.1}%", i.share),
        })
        .collect()
}

// -- Generic layouts --

fn print_table<R: Tabled>(rows: Vec<R>) {
    println!("{}", Table::new(rows));
}

fn print_markdown<R: Tabled>(rows: Vec<R>) {
    let mut table = Table::new(rows);
    table.with(Style::markdown());
    println!("{}", table);
}

fn print_csv<R: Serialize>(rows: Vec<R>) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

// -- Per-view output --

pub fn print_ranking(items: &[RankedItem], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => print_table(build_ranking_rows(items)),
        OutputFormat::Markdown => print_markdown(build_ranking_rows(items)),
        OutputFormat::Csv => print_csv(build_ranking_rows(items))?,
        OutputFormat::Json => print_json(&items),
        OutputFormat::Xml => println!("{}", xml_output::rankings_to_xml(items)?),
    }
    Ok(())
}

pub fn print_breakdown(items: &[CategoryItem], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => print_table(build_category_rows(items)),
        OutputFormat::Markdown => print_markdown(build_category_rows(items)),
        OutputFormat::Csv => print_csv(build_category_rows(items))?,
        OutputFormat::Json => print_json(&items),
        OutputFormat::Xml => println!("{}", xml_output::breakdown_to_xml(items)?),
    }
    Ok(())
}

pub fn print_options(rows: Vec<OptionRow>, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => print_table(rows),
        OutputFormat::Markdown => print_markdown(rows),
        OutputFormat::Csv => print_csv(rows)?,
        OutputFormat::Json => print_json(&rows),
        OutputFormat::Xml => println!("{}", xml_output::options_to_xml(&rows)?),
    }
    Ok(())
}

pub fn print_suggestions(rows: Vec<SuggestionRow>, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => print_table(rows),
        OutputFormat::Markdown => print_markdown(rows),
        OutputFormat::Csv => print_csv(rows)?,
        OutputFormat::Json => print_json(&rows),
        OutputFormat::Xml => println!("{}", xml_output::suggestions_to_xml(&rows)?),
    }
    Ok(())
}

/// Brazilian currency: `R$ 1.234,56`.
pub fn format_brl(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let units = (cents / 100).to_string();
    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, ch) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}R$ {},{:02}", sign, grouped, cents % 100)
}
