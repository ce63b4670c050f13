//! Terminology lookup capability.
//!
//! The pipeline depends only on the [`TerminologyResolver`] trait; the HTTP
//! client lives behind it so document building and the driver stay testable
//! without a live terminology server.

use std::collections::HashMap;

pub mod error;
pub mod ontoserver;

pub use error::{Result, TerminologyError};
pub use ontoserver::{DEFAULT_TERMINOLOGY_URL, OntoserverClient};

/// Resolves a human-readable display string for a `(system, code)` pair.
///
/// `Ok(None)` means the terminology source has no display for the code;
/// `Err` means the lookup itself failed. The pipeline treats both as
/// non-fatal.
pub trait TerminologyResolver {
    fn resolve_display(&self, system: &str, code: &str) -> Result<Option<String>>;
}

/// Fixed in-memory resolver for tests and offline (`--no-lookup`) runs.
#[derive(Debug, Default)]
pub struct StaticResolver {
    displays: HashMap<(String, String), String>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        system: impl Into<String>,
        code: impl Into<String>,
        display: impl Into<String>,
    ) {
        self.displays
            .insert((system.into(), code.into()), display.into());
    }
}

impl TerminologyResolver for StaticResolver {
    fn resolve_display(&self, system: &str, code: &str) -> Result<Option<String>> {
        Ok(self
            .displays
            .get(&(system.to_string(), code.to_string()))
            .cloned())
    }
}
