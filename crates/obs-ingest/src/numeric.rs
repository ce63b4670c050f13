//! Permissive numeric parsing for value and reference-range fields.

/// Parse a string value to a finite decimal.
///
/// Handles common formats:
/// - Standard numbers: "123", "-45.67"
/// - Thousands separators: "1,234,567"
/// - Whitespace: "  123  "
/// - Scientific notation: "1.23e5"
///
/// Returns None if the value cannot be parsed as a finite number. NaN and
/// infinities are rejected; a lab result must be a concrete quantity.
pub fn parse_decimal(value: &str) -> Option<f64> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return None;
    }

    // Remove thousands separators and whitespace
    let cleaned = trimmed
        .replace(',', "")
        .replace(' ', "")
        .replace('\u{a0}', ""); // Non-breaking space

    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}
