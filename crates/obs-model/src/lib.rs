pub mod error;
pub mod fhir;
pub mod ids;
pub mod record;
pub mod summary;

pub use error::ValidationError;
pub use fhir::{
    Bundle, BundleEntry, CATEGORY_LABORATORY, CodeableConcept, Coding, DATA_ABSENT_REASON_URL,
    Extension, OBSERVATION_CATEGORY_SYSTEM, Observation, Performer, Quantity, Reference,
    ReferenceRange, STATUS_FINAL, UCUM_SYSTEM,
};
pub use ids::{observation_filename, observation_id, sanitize_code};
pub use record::ObservationRecord;
pub use summary::{RowFailure, RowWarning, RunSummary};
