// Pre-flight checks on caller supplied year/country

use chrono::{Datelike, Local};
use thiserror::Error;

pub const SUPPORTED_COUNTRIES: [&str; 4] = ["GB", "FR", "DE", "NL"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Country provided is not supported, received: {0}")]
    UnsupportedCountry(String),

    #[error("Year provided not the current, received: {0}")]
    UnsupportedYear(i32),
}

pub fn is_supported_country(country: &str) -> bool {
    SUPPORTED_COUNTRIES.contains(&country)
}

pub fn current_year() -> i32 {
    Local::now().year()
}

/// Checks an optional year/country pair against the supported set.
///
/// Absent values are not checked. The country is checked before the year,
/// and the year must match the current calendar year at call time.
pub fn validate_input(year: Option<i32>, country: Option<&str>) -> Result<bool, ValidationError> {
    validate_input_at(year, country, current_year())
}

pub fn validate_input_at(
    year: Option<i32>,
    country: Option<&str>,
    current_year: i32,
) -> Result<bool, ValidationError> {
    if let Some(country) = country {
        if !is_supported_country(country) {
            return Err(ValidationError::UnsupportedCountry(country.to_string()));
        }
    }

    if let Some(year) = year {
        if year != current_year {
            return Err(ValidationError::UnsupportedYear(year));
        }
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_year_and_country_is_valid() {
        assert_eq!(validate_input(None, None), Ok(true));
    }

    #[test]
    fn test_unsupported_country() {
        let err = validate_input(Some(current_year()), Some("UA")).unwrap_err();
        assert_eq!(err, ValidationError::UnsupportedCountry("UA".to_string()));
        assert_eq!(
            err.to_string(),
            "Country provided is not supported, received: UA"
        );
    }

    #[test]
    fn test_unsupported_year() {
        let err = validate_input(Some(1111), Some("GB")).unwrap_err();
        assert_eq!(err.to_string(), "Year provided not the current, received: 1111");
    }

    #[test]
    fn test_country_is_checked_before_year() {
        let err = validate_input_at(Some(1111), Some("US"), 2024).unwrap_err();
        assert_eq!(err, ValidationError::UnsupportedCountry("US".to_string()));
    }

    #[test]
    fn test_current_year_and_supported_country_is_valid() {
        for country in SUPPORTED_COUNTRIES {
            assert_eq!(validate_input(Some(current_year()), Some(country)), Ok(true));
        }
    }

    #[test]
    fn test_only_provided_fields_are_checked() {
        assert_eq!(validate_input_at(None, Some("FR"), 2024), Ok(true));
        assert_eq!(validate_input_at(Some(2024), None, 2024), Ok(true));
        assert_eq!(
            validate_input_at(Some(2023), None, 2024),
            Err(ValidationError::UnsupportedYear(2023))
        );
    }

    #[test]
    fn test_country_codes_are_case_sensitive() {
        assert!(is_supported_country("GB"));
        assert!(!is_supported_country("gb"));
        assert!(!is_supported_country(""));
    }
}
