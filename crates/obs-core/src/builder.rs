//! The document builder.
//!
//! A pure function from a validated record, a resolved display, and a
//! sequence index to a finished `Observation`. Nothing here can fail; a
//! record that reaches the builder has already passed validation.

use obs_model::fhir::{
    CATEGORY_LABORATORY, CodeableConcept, Coding, DATA_ABSENT_REASON_URL, Extension,
    OBSERVATION_CATEGORY_SYSTEM, Observation, Performer, Quantity, Reference, ReferenceRange,
    STATUS_FINAL, UCUM_SYSTEM,
};
use obs_model::{ObservationRecord, ids};

/// Who the observation is about and who produced it, from run config.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// FHIR reference to the subject (e.g. `Patient/example`).
    pub subject: Option<String>,
    pub performer: Option<PerformerRef>,
}

/// Performer as configured for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PerformerRef {
    /// A concrete FHIR reference.
    Reference(String),
    /// Known to be unrecorded; emitted as a data-absent-reason extension.
    Unknown,
}

/// Build one observation document.
///
/// The identifier is derived from the (sanitized) code and the per-code
/// `sequence` index, so rows sharing a code within one run stay distinct
/// and reruns reproduce the same ids.
pub fn build_observation(
    record: &ObservationRecord,
    display: Option<&str>,
    sequence: u32,
    options: &BuildOptions,
) -> Observation {
    Observation {
        resource_type: "Observation".to_string(),
        id: ids::observation_id(&record.code, sequence),
        status: STATUS_FINAL.to_string(),
        category: vec![CodeableConcept {
            coding: vec![Coding {
                system: OBSERVATION_CATEGORY_SYSTEM.to_string(),
                code: CATEGORY_LABORATORY.to_string(),
                display: Some("Laboratory".to_string()),
            }],
            text: None,
        }],
        code: CodeableConcept {
            coding: vec![Coding {
                system: record.system.clone(),
                code: record.code.clone(),
                display: display.map(str::to_string),
            }],
            text: Some(record.text_description.clone()),
        },
        subject: options.subject.clone().map(|reference| Reference { reference }),
        performer: options.performer.as_ref().map(performer_entry),
        effective_date_time: record
            .date_observed
            .map(|date| date.format("%Y-%m-%d").to_string()),
        value_quantity: record.value.map(|value| quantity(value, record)),
        reference_range: reference_range(record),
    }
}

fn performer_entry(performer: &PerformerRef) -> Vec<Performer> {
    match performer {
        PerformerRef::Reference(reference) => vec![Performer {
            reference: Some(reference.clone()),
            extension: None,
        }],
        PerformerRef::Unknown => vec![Performer {
            reference: None,
            extension: Some(vec![Extension {
                url: DATA_ABSENT_REASON_URL.to_string(),
                value_code: "unknown".to_string(),
            }]),
        }],
    }
}

/// A quantity carrying the display unit and the UCUM coding when present.
fn quantity(value: f64, record: &ObservationRecord) -> Quantity {
    Quantity {
        value,
        unit: record.units.clone(),
        system: record.ucum.as_ref().map(|_| UCUM_SYSTEM.to_string()),
        code: record.ucum.clone(),
    }
}

/// Reference-range bounds reuse the value's unit metadata; either bound
/// alone still emits the block. Ranges are inclusive, so a lone high bound
/// of 10 reads as "<= 10".
fn reference_range(record: &ObservationRecord) -> Option<Vec<ReferenceRange>> {
    if !record.has_reference_range() {
        return None;
    }
    Some(vec![ReferenceRange {
        low: record.low_ref_range.map(|low| quantity(low, record)),
        high: record.high_ref_range.map(|high| quantity(high, record)),
        text: record.ref_range_display.clone(),
    }])
}
