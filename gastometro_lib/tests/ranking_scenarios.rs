use gastometro_lib::{
    compute_ranking, parse_amount, Dataset, Dimension, RankingEntry, RankingRequest, Scope,
};
use serde_json::json;

fn travel_dataset() -> Dataset {
    Dataset::from_json(
        json!({
            "A": {"nome": "A", "gastos": {"2020": {"Travel": 100.0}, "2021": {"Travel": 50.0}}}
        }),
        None,
    )
}

#[test]
fn category_all_years_sums_and_counts_years() {
    let ds = travel_dataset();
    let req = RankingRequest::new(Dimension::ByCategory("Travel".into())).with_scope(Scope::AllYears);
    assert_eq!(
        compute_ranking(&ds, &req),
        vec![RankingEntry::with_count("A", 150.0, 2)]
    );
}

#[test]
fn category_single_year_and_missing_year() {
    let ds = travel_dataset();
    let req = RankingRequest::new(Dimension::ByCategory("Travel".into())).with_year("2020");
    assert_eq!(compute_ranking(&ds, &req), vec![RankingEntry::new("A", 100.0)]);

    let req = RankingRequest::new(Dimension::ByCategory("Travel".into())).with_year("2022");
    assert!(compute_ranking(&ds, &req).is_empty());
}

#[test]
fn party_overall_sums_member_totals() {
    let ds = Dataset::from_json(
        json!({
            "A": {"nome": "A", "partido": "X", "totais": {"totalGeral": 300}},
            "B": {"nome": "B", "partido": "X", "totais": {"totalGeral": 100}}
        }),
        None,
    );
    let req = RankingRequest::new(Dimension::ByParty);
    assert_eq!(
        compute_ranking(&ds, &req),
        vec![RankingEntry::with_count("X", 400.0, 2)]
    );
}

#[test]
fn localized_amounts() {
    assert_eq!(parse_amount("1.234,56"), 1234.56);
    assert_eq!(parse_amount("abc"), 0.0);
}

#[test]
fn yearly_average_keeps_zero_year_legislators() {
    let ds = Dataset::from_json(
        json!({
            "A": {"nome": "A", "totais": {
                "totalGeral": 300,
                "total_por_ano": {"2019": 100, "2020": 100, "2021": 100}
            }},
            "C": {"nome": "C", "gastos": {}}
        }),
        None,
    );
    let out = compute_ranking(&ds, &RankingRequest::new(Dimension::ByYearlyAverage));
    assert_eq!(
        out,
        vec![
            RankingEntry::with_count("A", 100.0, 3),
            RankingEntry::with_count("C", 0.0, 0),
        ]
    );
}

#[test]
fn name_filter_matches_case_insensitive_substring() {
    let ds = Dataset::from_json(
        json!({
            "1": {"nome": "Silva", "totais": {"totalGeral": 10}},
            "2": {"nome": "Costa", "totais": {"totalGeral": 20}}
        }),
        None,
    );
    let req = RankingRequest::new(Dimension::ByLegislator).with_name("sil");
    let out = compute_ranking(&ds, &req);
    assert_eq!(out, vec![RankingEntry::new("1", 10.0)]);
}

#[test]
fn ranking_is_idempotent() {
    let ds = travel_dataset();
    let req = RankingRequest::new(Dimension::ByCategory("Travel".into()));
    assert_eq!(compute_ranking(&ds, &req), compute_ranking(&ds, &req));
}

fn sentinel_year_dataset() -> Dataset {
    Dataset::from_json(
        json!({
            "1": {"nome": "A", "partido": "X",
                  "gastos": {"2020": {"T": 100}, "None": {"T": 100}}}
        }),
        None,
    )
}

#[test]
fn sentinel_year_is_not_a_year() {
    let ds = sentinel_year_dataset();

    let req = RankingRequest::new(Dimension::ByCategory("T".into()));
    assert_eq!(
        compute_ranking(&ds, &req),
        vec![RankingEntry::with_count("1", 100.0, 1)]
    );

    let req = RankingRequest::new(Dimension::ByYearlyAverage);
    assert_eq!(
        compute_ranking(&ds, &req),
        vec![RankingEntry::with_count("1", 100.0, 1)]
    );

    let req = RankingRequest::new(Dimension::ByLegislator);
    assert_eq!(compute_ranking(&ds, &req), vec![RankingEntry::new("1", 100.0)]);
}

#[test]
fn rollup_and_sentinel_year_scopes_are_empty() {
    let ds = Dataset::from_json(
        json!({
            "1": {"nome": "A", "partido": "X", "gastos": {"2020": {"T": 10}, "None": {"T": 5}}}
        }),
        Some(json!({
            "categoria_ano": {"T": {"2020": {"1": 10}, "total": {"1": 10}}},
            "Total_ano": {"2020": {"1": 10}, "totalGeral": {"1": 10}},
            "Total_partido": {"2020": {"X": 10}, "totalGeral": {"X": 10}}
        })),
    );

    let req = RankingRequest::new(Dimension::ByLegislator).with_year("totalGeral");
    assert!(compute_ranking(&ds, &req).is_empty());

    let req = RankingRequest::new(Dimension::ByCategory("T".into())).with_year("total");
    assert!(compute_ranking(&ds, &req).is_empty());

    let req = RankingRequest::new(Dimension::ByParty).with_year("totalGeral");
    assert!(compute_ranking(&ds, &req).is_empty());

    let req = RankingRequest::new(Dimension::ByLegislator).with_year("None");
    assert!(compute_ranking(&ds, &req).is_empty());

    let req = RankingRequest::new(Dimension::ByLegislator).with_year("2020");
    assert_eq!(compute_ranking(&ds, &req), vec![RankingEntry::new("1", 10.0)]);
}
