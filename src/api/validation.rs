//! Input validation for API requests.
//!
//! Field validators return `Result<(), String>` with a user-facing message.
//! Handlers collect them with `ValidationErrorBuilder` from the `error` module.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use lazy_static::lazy_static;
use regex::Regex;

use super::error::ApiError;

lazy_static! {
    /// `YYYY-MM-DD`
    static ref DATE_REGEX: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();

    /// 24-hour `HH:MM`
    static ref TIME_REGEX: Regex = Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").unwrap();

    /// Loose email check: something@domain.tld
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"^[^\s@]+@[^\s@]+\.[^\s@]+$"
    ).unwrap();
}

/// Shortest accepted project description, in characters
pub const MIN_DESCRIPTION_CHARS: usize = 50;

/// Longest bookable job, in hours
pub const MAX_DURATION_HOURS: u32 = 10;

/// Fail with `Missing required fields: a, b` naming every absent field.
///
/// `fields` pairs a wire field name with whether a non-blank value was sent.
pub fn require_fields(fields: &[(&str, bool)]) -> Result<(), ApiError> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, present)| !present)
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ApiError::missing_fields(&missing))
    }
}

/// Validate a calendar date in `YYYY-MM-DD` form
pub fn validate_date(date: &str) -> Result<(), String> {
    if !DATE_REGEX.is_match(date) || NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
        return Err("Date must be a valid YYYY-MM-DD date".to_string());
    }
    Ok(())
}

/// Validate a time of day in `HH:MM` form
pub fn validate_time(time: &str) -> Result<(), String> {
    if !TIME_REGEX.is_match(time) {
        return Err("Time must be in HH:MM format".to_string());
    }
    Ok(())
}

/// The appointment must not start before `now`
pub fn validate_future(date: &str, time: &str, now: NaiveDateTime) -> Result<(), String> {
    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| "Date must be a valid YYYY-MM-DD date".to_string())?;
    let at = NaiveTime::parse_from_str(time, "%H:%M")
        .map_err(|_| "Time must be in HH:MM format".to_string())?;

    if day.and_time(at) < now {
        return Err("Booking date must be in the future".to_string());
    }
    Ok(())
}

/// Requested duration as whole hours. Missing or `0` falls back to the default.
pub fn resolve_duration(requested: Option<f64>, default_hours: u32) -> Result<u32, String> {
    match requested {
        None => Ok(default_hours),
        Some(h) if h == 0.0 => Ok(default_hours),
        Some(h) if h > 0.0 && h.fract() == 0.0 && h <= f64::from(MAX_DURATION_HOURS) => Ok(h as u32),
        Some(h) if h.fract() != 0.0 => {
            Err("durationHours must be a whole number of hours".to_string())
        }
        Some(_) => Err(format!(
            "durationHours must be between 1 and {}",
            MAX_DURATION_HOURS
        )),
    }
}

pub fn validate_duration(hours: u32) -> Result<(), String> {
    if hours == 0 || hours > MAX_DURATION_HOURS {
        return Err(format!(
            "durationHours must be between 1 and {}",
            MAX_DURATION_HOURS
        ));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), String> {
    if email.len() > 254 || !EMAIL_REGEX.is_match(email) {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

/// Validate a project description (length counted in characters, not bytes)
pub fn validate_description(description: &str) -> Result<(), String> {
    if description.trim().chars().count() < MIN_DESCRIPTION_CHARS {
        return Err(format!(
            "Description must be at least {} characters",
            MIN_DESCRIPTION_CHARS
        ));
    }
    Ok(())
}

/// Money amounts and rates must be finite and strictly positive
pub fn validate_positive(value: f64, field_name: &str) -> Result<(), String> {
    if !value.is_finite() || value <= 0.0 {
        return Err(format!("{} must be greater than zero", field_name));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(date: &str, time: &str) -> NaiveDateTime {
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .unwrap()
            .and_time(NaiveTime::parse_from_str(time, "%H:%M").unwrap())
    }

    #[test]
    fn test_require_fields_lists_every_missing_field() {
        assert!(require_fields(&[("title", true), ("category", true)]).is_ok());

        let err = require_fields(&[
            ("projectId", false),
            ("amount", true),
            ("type", false),
        ])
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "[validation_error] Missing required fields: projectId, type"
        );
    }

    #[test]
    fn test_resolve_duration() {
        assert_eq!(resolve_duration(None, 2), Ok(2));
        assert_eq!(resolve_duration(Some(0.0), 2), Ok(2));
        assert_eq!(resolve_duration(Some(3.0), 2), Ok(3));
        assert_eq!(resolve_duration(Some(10.0), 2), Ok(10));
        assert!(resolve_duration(Some(2.5), 2).unwrap_err().contains("whole number"));
        assert!(resolve_duration(Some(12.0), 2).is_err());
        assert!(resolve_duration(Some(-1.0), 2).is_err());
    }

    #[test]
    fn test_validate_date() {
        assert!(validate_date("2099-05-04").is_ok());
        assert!(validate_date("2024-02-29").is_ok());

        assert!(validate_date("2023-02-29").is_err());
        assert!(validate_date("2099-5-4").is_err());
        assert!(validate_date("04/05/2099").is_err());
        assert!(validate_date("").is_err());
    }

    #[test]
    fn test_validate_time() {
        assert!(validate_time("09:00").is_ok());
        assert!(validate_time("23:59").is_ok());
        assert!(validate_time("10:30").is_ok());

        assert!(validate_time("9:00").is_err());
        assert!(validate_time("24:00").is_err());
        assert!(validate_time("10:60").is_err());
        assert!(validate_time("10h").is_err());
    }

    #[test]
    fn test_validate_future() {
        let now = at("2025-11-14", "12:00");

        assert!(validate_future("2025-11-14", "13:00", now).is_ok());
        assert!(validate_future("2025-11-14", "12:00", now).is_ok());
        assert_eq!(
            validate_future("2025-11-14", "11:00", now).unwrap_err(),
            "Booking date must be in the future"
        );
        assert!(validate_future("2025-11-13", "18:00", now).is_err());
    }

    #[test]
    fn test_validate_duration() {
        assert!(validate_duration(1).is_ok());
        assert!(validate_duration(10).is_ok());
        assert!(validate_duration(0).is_err());
        assert!(validate_duration(11).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("giannis@example.gr").is_ok());
        assert!(validate_email("first.last+tag@mail.example.com").is_ok());

        assert!(validate_email("giannis").is_err());
        assert!(validate_email("giannis@example").is_err());
        assert!(validate_email("gi annis@example.gr").is_err());
    }

    #[test]
    fn test_validate_description_counts_characters() {
        // 50 Greek letters are 100 bytes but only 50 characters
        let greek = "α".repeat(50);
        assert!(validate_description(&greek).is_ok());
        assert!(validate_description(&"α".repeat(49)).is_err());
        assert!(validate_description("Σύντομη").is_err());
    }

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive(0.01, "amount").is_ok());
        assert_eq!(
            validate_positive(0.0, "amount").unwrap_err(),
            "amount must be greater than zero"
        );
        assert!(validate_positive(-5.0, "budgetNeeded").is_err());
        assert!(validate_positive(f64::NAN, "budgetNeeded").is_err());
    }
}
