use thiserror::Error;

/// Row-fatal validation failures raised by the row parser.
///
/// A `ValidationError` skips the offending row; it never aborts the run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("required field '{field}' is missing or empty")]
    MissingField { field: &'static str },

    /// A numeric value is present but no UCUM unit code accompanies it.
    #[error("value '{value}' has no UCUM unit code")]
    MissingUnitCode { value: String },
}
