//! Observation date parsing.
//!
//! The `dateobserved` column is day/month/year (`12/6/2024` is 12 June
//! 2024). ISO `YYYY-MM-DD` is accepted as a fallback for pre-normalized
//! sources. Anything else is treated as absent by the caller.

use chrono::NaiveDate;

/// Parse an observation date, returning None when the value is blank or
/// malformed.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    NaiveDate::parse_from_str(trimmed, "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y-%m-%d"))
        .ok()
}
