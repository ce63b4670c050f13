//! The validated intermediate form of one input row.

use chrono::NaiveDate;

/// One lab result, extracted and normalized from a raw input row.
///
/// Field presence rules: `code`, `system`, and `text_description` are always
/// non-empty; `ucum` is present whenever `value` is. All other fields are
/// optional, with whitespace-only input normalized to `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationRecord {
    /// Code within the coding system (e.g. a LOINC code).
    pub code: String,
    /// Coding system URI the code belongs to.
    pub system: String,
    /// Panel the test belongs to, when the source supplies one.
    pub panel_description: Option<String>,
    /// Human-readable test description from the source.
    pub text_description: String,
    /// Numeric result value.
    pub value: Option<f64>,
    /// Display units as written in the source.
    pub units: Option<String>,
    /// UCUM unit code. Guaranteed present when `value` is present.
    pub ucum: Option<String>,
    /// Low bound of the reference range.
    pub low_ref_range: Option<f64>,
    /// High bound of the reference range.
    pub high_ref_range: Option<f64>,
    /// Free-text rendering of the reference range.
    pub ref_range_display: Option<String>,
    /// Date the observation was made.
    pub date_observed: Option<NaiveDate>,
}

impl ObservationRecord {
    /// Whether a reference-range block should be emitted for this record.
    ///
    /// Either bound alone is enough; a display text alone is not.
    pub fn has_reference_range(&self) -> bool {
        self.low_ref_range.is_some() || self.high_ref_range.is_some()
    }
}
