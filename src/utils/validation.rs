//! Input validation utilities

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::constants::{DATE_FORMAT, MAX_USERNAME_LENGTH};

static SLOT_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}:\d{2}$").expect("valid slot label pattern"));

static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date pattern"));

static USERNAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.\-]+$").expect("valid username pattern"));

/// `HH:MM` with two-digit components
pub fn is_slot_label(label: &str) -> bool {
    SLOT_LABEL.is_match(label)
}

/// Parse a `YYYY-MM-DD` calendar date
pub fn parse_date(raw: &str) -> Result<NaiveDate, &'static str> {
    let raw = raw.trim();
    if !ISO_DATE.is_match(raw) {
        return Err("Date must be formatted as YYYY-MM-DD");
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| "Date does not exist")
}

/// Validate username format
pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if username.is_empty() {
        return Err("Username cannot be empty");
    }
    if username.len() as u64 > MAX_USERNAME_LENGTH {
        return Err("Username is too long");
    }
    if !USERNAME.is_match(username) {
        return Err("Username can only contain letters, numbers, dots, underscores, and hyphens");
    }
    Ok(())
}

/// Strip control characters other than line breaks and tabs
pub fn strip_control_chars(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_control() || matches!(c, '\n' | '\r' | '\t'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_label() {
        assert!(is_slot_label("09:30"));
        assert!(!is_slot_label("9:30"));
        assert!(!is_slot_label("09:30:00"));
        assert!(!is_slot_label("0930"));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-07-01").unwrap(),
            NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()
        );
        assert!(parse_date("2025-02-30").is_err());
        assert!(parse_date("01/07/2025").is_err());
        assert!(parse_date("2025-7-1").is_err());
    }

    #[test]
    fn test_validate_username() {
        assert!(validate_username("ombrellone5").is_ok());
        assert!(validate_username("delfino_1").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("user name").is_err());
        assert!(validate_username("a/b").is_err());
    }

    #[test]
    fn test_strip_control_chars() {
        assert_eq!(
            strip_control_chars("  Chiuso\u{7} oggi\n\n\t- lunedi\u{0}\n"),
            "  Chiuso oggi\n\n\t- lunedi\n"
        );
    }
}
