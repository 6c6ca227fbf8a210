//! Validation of raw form input.
//!
//! The presentation layer collects free-text fields and calls these helpers
//! before anything reaches the tax engine. All failures are recoverable:
//! the caller shows the message and re-prompts.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors for caller-supplied values that fail pre-validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name must be at least 3 characters and contain letters only")]
    InvalidName,

    #[error("invalid birthdate '{0}': expected dd.mm.yyyy")]
    InvalidBirthdate(String),

    #[error("invalid {field} '{value}': expected a number")]
    InvalidAmount { field: &'static str, value: String },

    #[error("{field} must not be negative")]
    NegativeAmount { field: &'static str },
}

/// Validates the person's name: at least three characters, letters only.
///
/// Returns the trimmed name.
pub fn validate_name(input: &str) -> Result<String, ValidationError> {
    let name = input.trim();
    if name.chars().count() >= 3 && name.chars().all(char::is_alphabetic) {
        Ok(name.to_string())
    } else {
        Err(ValidationError::InvalidName)
    }
}

/// Parses a birthdate in `dd.mm.yyyy` form.
pub fn parse_birthdate(input: &str) -> Result<NaiveDate, ValidationError> {
    let raw = input.trim();
    NaiveDate::parse_from_str(raw, "%d.%m.%Y")
        .map_err(|_| ValidationError::InvalidBirthdate(raw.to_string()))
}

/// Completed years of age on `today`.
///
/// Calendar-year difference, minus one when today's month/day still precedes
/// the birthday.
pub fn age_on(
    birthdate: NaiveDate,
    today: NaiveDate,
) -> i32 {
    let not_yet_celebrated = (today.month(), today.day()) < (birthdate.month(), birthdate.day());
    today.year() - birthdate.year() - i32::from(not_yet_celebrated)
}

/// Parses a non-negative amount (salary, commute distance).
///
/// A decimal comma is tolerated and treated as a decimal point.
pub fn parse_amount(
    input: &str,
    field: &'static str,
) -> Result<Decimal, ValidationError> {
    let normalized = input.trim().replace(',', ".");
    let value: Decimal = normalized.parse().map_err(|e| {
        tracing::warn!(field, input = %input, "invalid amount: {}", e);
        ValidationError::InvalidAmount {
            field,
            value: input.trim().to_string(),
        }
    })?;
    if value < Decimal::ZERO {
        return Err(ValidationError::NegativeAmount { field });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // validate_name tests
    // =========================================================================

    #[test]
    fn validate_name_accepts_plain_letters() {
        assert_eq!(validate_name("Muster"), Ok("Muster".to_string()));
    }

    #[test]
    fn validate_name_trims_whitespace() {
        assert_eq!(validate_name("  Muster  "), Ok("Muster".to_string()));
    }

    #[test]
    fn validate_name_accepts_umlauts() {
        assert_eq!(validate_name("Bühler"), Ok("Bühler".to_string()));
    }

    #[test]
    fn validate_name_rejects_short_names() {
        assert_eq!(validate_name("Al"), Err(ValidationError::InvalidName));
    }

    #[test]
    fn validate_name_rejects_digits_and_spaces() {
        assert_eq!(validate_name("Muster2"), Err(ValidationError::InvalidName));
        assert_eq!(
            validate_name("Hans Muster"),
            Err(ValidationError::InvalidName)
        );
        assert_eq!(validate_name(""), Err(ValidationError::InvalidName));
    }

    // =========================================================================
    // parse_birthdate / age_on tests
    // =========================================================================

    #[test]
    fn parse_birthdate_accepts_dotted_format() {
        assert_eq!(
            parse_birthdate("24.05.1988"),
            Ok(NaiveDate::from_ymd_opt(1988, 5, 24).unwrap())
        );
    }

    #[test]
    fn parse_birthdate_rejects_other_formats() {
        assert!(parse_birthdate("1988-05-24").is_err());
        assert!(parse_birthdate("32.01.1988").is_err());
        assert!(parse_birthdate("").is_err());
    }

    #[test]
    fn age_counts_completed_years_only() {
        let birth = NaiveDate::from_ymd_opt(1988, 5, 24).unwrap();

        let before_birthday = NaiveDate::from_ymd_opt(2026, 5, 23).unwrap();
        assert_eq!(age_on(birth, before_birthday), 37);

        let on_birthday = NaiveDate::from_ymd_opt(2026, 5, 24).unwrap();
        assert_eq!(age_on(birth, on_birthday), 38);

        let after_birthday = NaiveDate::from_ymd_opt(2026, 5, 25).unwrap();
        assert_eq!(age_on(birth, after_birthday), 38);
    }

    // =========================================================================
    // parse_amount tests
    // =========================================================================

    #[test]
    fn parse_amount_accepts_plain_decimals() {
        assert_eq!(parse_amount("80000", "salary"), Ok(dec!(80000)));
        assert_eq!(parse_amount("  12.5 ", "distance"), Ok(dec!(12.5)));
    }

    #[test]
    fn parse_amount_tolerates_decimal_comma() {
        assert_eq!(parse_amount("80000,50", "salary"), Ok(dec!(80000.50)));
    }

    #[test]
    fn parse_amount_rejects_garbage() {
        assert_eq!(
            parse_amount("abc", "salary"),
            Err(ValidationError::InvalidAmount {
                field: "salary",
                value: "abc".to_string()
            })
        );
        assert!(parse_amount("", "salary").is_err());
    }

    #[test]
    fn parse_amount_rejects_negative_values() {
        assert_eq!(
            parse_amount("-1", "distance"),
            Err(ValidationError::NegativeAmount { field: "distance" })
        );
    }
}
