use chrono::{Datelike, Utc};

use crate::dataset::is_sentinel;
use crate::error::GastometroError;
use crate::request::{Scope, SortDirection};

pub const MAX_SEARCH_LENGTH: usize = 100;
pub const MAX_PARTY_LENGTH: usize = 20;
pub const MAX_TOP: usize = 1000;

/// Brazilian federative units (26 states plus the Federal District).
pub const VALID_STATES: &[&str] = &[
    "AC", "AL", "AP", "AM", "BA", "CE", "DF", "ES", "GO", "MA", "MT", "MS", "MG", "PA", "PB",
    "PR", "PE", "PI", "RJ", "RN", "RS", "RO", "RR", "SC", "SP", "SE", "TO",
];

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim whitespace,
/// and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, GastometroError> {
    if input.len() > max_len {
        return Err(GastometroError::InvalidInput(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string();
    if sanitized.is_empty() {
        return Err(GastometroError::InvalidInput(
            "input is empty after sanitization".to_string(),
        ));
    }
    Ok(sanitized)
}

/// Validate a search/name string: enforce length, strip control chars, trim.
pub fn validate_search(input: &str) -> Result<String, GastometroError> {
    sanitize_text(input, MAX_SEARCH_LENGTH)
}

/// Validate a UF code: uppercase, check against the 27 federative units.
pub fn validate_state(input: &str) -> Result<String, GastometroError> {
    let upper = input.trim().to_uppercase();
    if VALID_STATES.contains(&upper.as_str()) {
        Ok(upper)
    } else {
        Err(GastometroError::InvalidInput(format!(
            "unknown state code '{}'. Valid codes: {}",
            input,
            VALID_STATES.join(", ")
        )))
    }
}

/// Validate a party acronym. Party lists change between elections, so any
/// acronym is accepted; it is uppercased and placeholder values are rejected.
pub fn validate_party(input: &str) -> Result<String, GastometroError> {
    let sanitized = sanitize_text(input, MAX_PARTY_LENGTH)?;
    if is_sentinel(&sanitized) {
        return Err(GastometroError::InvalidInput(format!(
            "'{}' is not a party",
            input
        )));
    }
    Ok(sanitized.to_uppercase())
}

/// Validate a year: four ASCII digits, not after the current year.
pub fn validate_year(input: &str) -> Result<String, GastometroError> {
    let trimmed = input.trim();
    if trimmed.len() != 4 || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(GastometroError::InvalidInput(format!(
            "invalid year '{}'. Expected four digits (e.g., 2023)",
            input
        )));
    }
    let year: i32 = trimmed
        .parse()
        .map_err(|_| GastometroError::InvalidInput(format!("invalid year '{}'", input)))?;
    let current = Utc::now().year();
    if year > current {
        return Err(GastometroError::InvalidInput(format!(
            "year {} is in the future (current year is {})",
            year, current
        )));
    }
    Ok(trimmed.to_string())
}

/// Validate a row limit (must be 1..=1000).
pub fn validate_top(top: usize) -> Result<usize, GastometroError> {
    if !(1..=MAX_TOP).contains(&top) {
        return Err(GastometroError::InvalidInput(format!(
            "top must be between 1 and {}",
            MAX_TOP
        )));
    }
    Ok(top)
}

/// Parse a sort direction: case-insensitive, accepts the Portuguese labels.
pub fn parse_sort_direction(input: &str) -> Result<SortDirection, GastometroError> {
    match input.trim().to_lowercase().as_str() {
        "desc" | "descending" | "maior" | "highest" => Ok(SortDirection::Descending),
        "asc" | "ascending" | "menor" | "lowest" => Ok(SortDirection::Ascending),
        _ => Err(GastometroError::InvalidInput(format!(
            "unknown sort direction '{}'. Valid values: desc (maior), asc (menor)",
            input
        ))),
    }
}

/// Parse a scope: an "all years" keyword or a year.
pub fn parse_scope(input: &str) -> Result<Scope, GastometroError> {
    match input.trim().to_lowercase().as_str() {
        "all" | "todos" | "overall" | "totalgeral" => Ok(Scope::AllYears),
        _ => validate_year(input).map(Scope::Year),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- State validation --

    #[test]
    fn state_valid_uppercase() {
        assert_eq!(validate_state("SP").unwrap(), "SP");
    }

    #[test]
    fn state_valid_lowercase() {
        assert_eq!(validate_state("rj").unwrap(), "RJ");
    }

    #[test]
    fn state_valid_federal_district() {
        assert_eq!(validate_state("df").unwrap(), "DF");
    }

    #[test]
    fn state_invalid() {
        assert!(validate_state("XX").is_err());
        assert!(validate_state("CA").is_err());
    }

    #[test]
    fn state_empty() {
        assert!(validate_state("").is_err());
    }

    #[test]
    fn state_too_long() {
        assert!(validate_state("SAO PAULO").is_err());
    }

    #[test]
    fn all_states_listed() {
        assert_eq!(VALID_STATES.len(), 27);
    }

    // -- Party validation --

    #[test]
    fn party_uppercased() {
        assert_eq!(validate_party("pt").unwrap(), "PT");
        assert_eq!(validate_party(" psol ").unwrap(), "PSOL");
    }

    #[test]
    fn party_sentinel_rejected() {
        assert!(validate_party("none").is_err());
        assert!(validate_party("None").is_err());
    }

    #[test]
    fn party_empty() {
        assert!(validate_party("").is_err());
        assert!(validate_party("   ").is_err());
    }

    #[test]
    fn party_too_long() {
        let long = "P".repeat(MAX_PARTY_LENGTH + 1);
        assert!(validate_party(&long).is_err());
    }

    // -- Search/name sanitization --

    #[test]
    fn search_normal_text() {
        assert_eq!(validate_search("Silva").unwrap(), "Silva");
    }

    #[test]
    fn search_control_chars_stripped() {
        assert_eq!(validate_search("Sil\x00va\x01").unwrap(), "Silva");
    }

    #[test]
    fn search_max_length_exceeded() {
        let long = "x".repeat(MAX_SEARCH_LENGTH + 1);
        assert!(validate_search(&long).is_err());
    }

    #[test]
    fn search_empty_after_trim() {
        assert!(validate_search("   ").is_err());
    }

    #[test]
    fn search_unicode_preserved() {
        assert_eq!(validate_search("Jo\u{00E3}o").unwrap(), "Jo\u{00E3}o");
    }

    // -- Year validation --

    #[test]
    fn year_valid() {
        assert_eq!(validate_year("2023").unwrap(), "2023");
        assert_eq!(validate_year(" 2019 ").unwrap(), "2019");
    }

    #[test]
    fn year_current_accepted() {
        let current = Utc::now().year().to_string();
        assert_eq!(validate_year(&current).unwrap(), current);
    }

    #[test]
    fn year_future_rejected() {
        let next = (Utc::now().year() + 1).to_string();
        assert!(validate_year(&next).is_err());
    }

    #[test]
    fn year_malformed() {
        assert!(validate_year("23").is_err());
        assert!(validate_year("20x3").is_err());
        assert!(validate_year("").is_err());
        assert!(validate_year("२०२३").is_err());
    }

    // -- Top --

    #[test]
    fn top_bounds() {
        assert!(validate_top(0).is_err());
        assert_eq!(validate_top(1).unwrap(), 1);
        assert_eq!(validate_top(MAX_TOP).unwrap(), MAX_TOP);
        assert!(validate_top(MAX_TOP + 1).is_err());
    }

    // -- Sort direction --

    #[test]
    fn sort_direction_aliases() {
        assert_eq!(parse_sort_direction("desc").unwrap(), SortDirection::Descending);
        assert_eq!(parse_sort_direction("Maior").unwrap(), SortDirection::Descending);
        assert_eq!(parse_sort_direction("ASC").unwrap(), SortDirection::Ascending);
        assert_eq!(parse_sort_direction("menor").unwrap(), SortDirection::Ascending);
    }

    #[test]
    fn sort_direction_invalid() {
        assert!(parse_sort_direction("sideways").is_err());
    }

    // -- Scope --

    #[test]
    fn scope_keywords() {
        assert_eq!(parse_scope("all").unwrap(), Scope::AllYears);
        assert_eq!(parse_scope("Todos").unwrap(), Scope::AllYears);
        assert_eq!(parse_scope("totalGeral").unwrap(), Scope::AllYears);
        assert_eq!(parse_scope("overall").unwrap(), Scope::AllYears);
    }

    #[test]
    fn scope_year() {
        assert_eq!(parse_scope("2022").unwrap(), Scope::Year("2022".into()));
    }

    #[test]
    fn scope_invalid() {
        assert!(parse_scope("last year").is_err());
    }
}
