//! Collection bundle assembly.
//!
//! Optional post-run step: every generated observation goes into one FHIR
//! `Bundle` of type `collection`. Entry URNs and the bundle id are UUIDv5
//! values derived from the deterministic document ids, so an identical run
//! yields an identical bundle.

use obs_model::{Bundle, BundleEntry, Observation};
use uuid::Uuid;

/// Bundle type emitted by this generator.
pub const BUNDLE_TYPE_COLLECTION: &str = "collection";

fn entry_urn(document_id: &str) -> String {
    format!(
        "urn:uuid:{}",
        Uuid::new_v5(&Uuid::NAMESPACE_URL, document_id.as_bytes())
    )
}

/// Assemble a collection bundle from the run's documents.
pub fn build_bundle(documents: &[Observation]) -> Bundle {
    let mut id_material = String::new();
    for document in documents {
        id_material.push_str(&document.id);
        id_material.push('\n');
    }

    Bundle {
        resource_type: "Bundle".to_string(),
        id: Uuid::new_v5(&Uuid::NAMESPACE_URL, id_material.as_bytes()).to_string(),
        bundle_type: BUNDLE_TYPE_COLLECTION.to_string(),
        entry: documents
            .iter()
            .map(|document| BundleEntry {
                full_url: entry_urn(&document.id),
                resource: document.clone(),
            })
            .collect(),
    }
}

/// Timestamped bundle filename, e.g. `observations_bundle_20240612_101500.json`.
pub fn bundle_filename(timestamp: &str) -> String {
    format!("observations_bundle_{timestamp}.json")
}
