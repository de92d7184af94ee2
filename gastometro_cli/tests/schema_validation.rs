use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::Command;

use gastometro_lib::{compute_ranking, Dataset, Dimension, RankingRequest};

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("CLI crate should be inside workspace")
        .to_path_buf()
}

fn fixture_path(name: &str) -> PathBuf {
    workspace_root()
        .join("gastometro_data/tests/fixtures")
        .join(name)
}

fn load_fixture(name: &str) -> Value {
    let path = fixture_path(name);
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("read fixture {}: {}", path.display(), e));
    serde_json::from_str(&text).expect("fixture is valid JSON")
}

fn load_schema(name: &str) -> Value {
    let path = workspace_root().join("schema").join(name);
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("read schema {}: {}", path.display(), e));
    serde_json::from_str(&text).expect("schema is valid JSON")
}

/// Runs the binary against the fixtures and parses its JSON stdout.
fn run_json(args: &[&str]) -> Value {
    let output = Command::new(env!("CARGO_BIN_EXE_gastometro"))
        .arg("--output")
        .arg("json")
        .arg("--legislators")
        .arg(fixture_path("legislators.json"))
        .arg("--rankings")
        .arg(fixture_path("rankings.json"))
        .args(args)
        .env_remove("GASTOMETRO_CONFIG")
        .env_remove("GASTOMETRO_LEGISLATORS")
        .env_remove("GASTOMETRO_RANKINGS")
        .output()
        .expect("binary runs");
    assert!(
        output.status.success(),
        "gastometro {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is valid JSON")
}

fn assert_conforms(schema_name: &str, data: &Value) {
    let schema = load_schema(schema_name);
    let validator = jsonschema::draft202012::new(&schema).expect("schema compiles");
    if let Err(e) = validator.validate(data) {
        panic!("output failed {} validation: {e}", schema_name);
    }
}

// ---------------------------------------------------------------------------
// Library output
// ---------------------------------------------------------------------------

#[test]
fn test_ranking_entries_conform_to_schema() {
    let dataset = Dataset::from_json(
        load_fixture("legislators.json"),
        Some(load_fixture("rankings.json")),
    );
    for dimension in [
        Dimension::ByLegislator,
        Dimension::ByParty,
        Dimension::ByYearlyAverage,
        Dimension::ByCategory("TELEFONIA".into()),
    ] {
        let entries = compute_ranking(&dataset, &RankingRequest::new(dimension));
        let data = serde_json::to_value(&entries).expect("entries serialize");
        assert_conforms("ranking_entry.schema.json", &data);
    }
}

// ---------------------------------------------------------------------------
// CLI output
// ---------------------------------------------------------------------------

#[test]
fn test_party_ranking_output_conforms_to_schema() {
    let data = run_json(&["rank", "--by", "party"]);
    assert_conforms("ranking_row.schema.json", &data);

    let rows = data.as_array().expect("array");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["subject_id"], "PL");
    assert_eq!(rows[0]["name"], "Partido Liberal");
    assert_eq!(rows[1]["subject_id"], "PT");
}

#[test]
fn test_legislator_ranking_output_conforms_to_schema() {
    let data = run_json(&["rank", "--by", "legislator", "--year", "2023", "--sort", "asc"]);
    assert_conforms("ranking_row.schema.json", &data);

    let rows = data.as_array().expect("array");
    assert_eq!(rows[0]["name"], "Diego Souza");
    assert_eq!(rows[0]["rank"], 1);
    assert!(rows.iter().all(|r| r["subject_id"] != "None"));
}

#[test]
fn test_category_ranking_output_conforms_to_schema() {
    let data = run_json(&["rank", "--by", "category", "--category", "telefonia"]);
    assert_conforms("ranking_row.schema.json", &data);
    assert_eq!(data.as_array().expect("array").len(), 3);
}

#[test]
fn test_breakdown_output_conforms_to_schema() {
    let data = run_json(&["legislator", "Ana Silva", "--year", "2022"]);
    assert_conforms("breakdown_row.schema.json", &data);

    let rows = data.as_array().expect("array");
    assert_eq!(rows[0]["category"], "PASSAGEM AÉREA - RPA");

    let chamber = run_json(&["chamber", "--year", "2023"]);
    assert_conforms("breakdown_row.schema.json", &chamber);
}

// ---------------------------------------------------------------------------
// Negative validation: schemas reject malformed rows
// ---------------------------------------------------------------------------

#[test]
fn test_ranking_row_schema_rejects_zero_rank() {
    let schema = load_schema("ranking_row.schema.json");
    let validator = jsonschema::draft202012::new(&schema).expect("schema compiles");
    let bad = serde_json::json!([{"rank": 0, "subject_id": "PT", "name": "PT", "amount": 1.0}]);
    assert!(validator.validate(&bad).is_err());
}

#[test]
fn test_ranking_entry_schema_rejects_missing_value() {
    let schema = load_schema("ranking_entry.schema.json");
    let validator = jsonschema::draft202012::new(&schema).expect("schema compiles");
    let bad = serde_json::json!([{"subject_id": "204554"}]);
    assert!(validator.validate(&bad).is_err());
}
