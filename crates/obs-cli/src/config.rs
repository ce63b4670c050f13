//! Run configuration.
//!
//! An optional JSON file supplies the references that apply to every
//! generated observation. Example:
//!
//! ```json
//! {
//!   "subject": "Patient/example",
//!   "performer": "unknown",
//!   "terminology_url": "https://r4.ontoserver.csiro.au/fhir"
//! }
//! ```
//!
//! A `performer` of `"unknown"` emits a data-absent-reason extension
//! instead of a reference.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use obs_core::{BuildOptions, PerformerRef};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunConfig {
    /// FHIR reference for the observation subject.
    pub subject: Option<String>,
    /// FHIR reference for the performer, or the literal "unknown".
    pub performer: Option<String>,
    /// Terminology server base URL override.
    pub terminology_url: Option<String>,
}

/// Load a run config from a JSON file.
pub fn load_config(path: &Path) -> anyhow::Result<RunConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("parse config {}", path.display()))
}

impl RunConfig {
    /// Translate config references into builder options.
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            subject: self.subject.clone(),
            performer: self.performer.as_deref().map(|performer| {
                if performer == "unknown" {
                    PerformerRef::Unknown
                } else {
                    PerformerRef::Reference(performer.to_string())
                }
            }),
        }
    }
}
