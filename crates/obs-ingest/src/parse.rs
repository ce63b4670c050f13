//! The row parser: raw fields to a validated `ObservationRecord`.

use obs_model::{ObservationRecord, RowWarning, ValidationError};

use crate::date::parse_date;
use crate::numeric::parse_decimal;
use crate::reader::RawRow;

/// A parsed row together with any non-fatal parse warnings.
#[derive(Debug, Clone)]
pub struct ParsedRow {
    pub record: ObservationRecord,
    pub warnings: Vec<RowWarning>,
}

fn required(
    value: Option<&String>,
    field: &'static str,
) -> Result<String, ValidationError> {
    match value.map(|v| v.trim()) {
        Some(trimmed) if !trimmed.is_empty() => Ok(trimmed.to_string()),
        _ => Err(ValidationError::MissingField { field }),
    }
}

fn optional(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(std::string::ToString::to_string)
}

/// Parse one raw row into an `ObservationRecord`.
///
/// Required fields (`code`, `system`, `text_description`, and `ucum` when a
/// value is present) reject the row with a `ValidationError`. Malformed
/// numeric and date fields degrade to absent with a warning; the row itself
/// survives.
pub fn parse_row(raw: &RawRow) -> Result<ParsedRow, ValidationError> {
    let mut warnings = Vec::new();
    let mut warn = |message: String| {
        tracing::warn!(row = raw.record_number, "{message}");
        warnings.push(RowWarning {
            row: raw.record_number,
            message,
        });
    };

    let code = required(raw.code.as_ref(), "code")?;
    let system = required(raw.system.as_ref(), "system")?;
    let text_description = required(raw.text_description.as_ref(), "text_description")?;

    let value = match optional(raw.value.as_ref()) {
        Some(text) => match parse_decimal(&text) {
            Some(value) => Some(value),
            None => {
                warn(format!("unparseable value '{text}', treated as absent"));
                None
            }
        },
        None => None,
    };

    let units = optional(raw.units.as_ref());
    let ucum = optional(raw.ucum.as_ref());
    if let Some(value) = value {
        // A quantity without a coded unit is non-conformant.
        if ucum.is_none() {
            return Err(ValidationError::MissingUnitCode {
                value: value.to_string(),
            });
        }
    }

    let low_ref_range = match optional(raw.low_ref_range.as_ref()) {
        Some(text) => match parse_decimal(&text) {
            Some(low) => Some(low),
            None => {
                warn(format!(
                    "unparseable low reference range '{text}', treated as absent"
                ));
                None
            }
        },
        None => None,
    };
    let high_ref_range = match optional(raw.high_ref_range.as_ref()) {
        Some(text) => match parse_decimal(&text) {
            Some(high) => Some(high),
            None => {
                warn(format!(
                    "unparseable high reference range '{text}', treated as absent"
                ));
                None
            }
        },
        None => None,
    };

    let date_observed = match optional(raw.date_observed.as_ref()) {
        Some(text) => match parse_date(&text) {
            Some(date) => Some(date),
            None => {
                warn(format!("unparseable date '{text}', treated as absent"));
                None
            }
        },
        None => None,
    };

    Ok(ParsedRow {
        record: ObservationRecord {
            code,
            system,
            panel_description: optional(raw.panel_description.as_ref()),
            text_description,
            value,
            units,
            ucum,
            low_ref_range,
            high_ref_range,
            ref_range_display: optional(raw.rr_display.as_ref()),
            date_observed,
        },
        warnings,
    })
}
