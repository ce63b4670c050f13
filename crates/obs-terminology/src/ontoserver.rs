//! Blocking FHIR `CodeSystem/$lookup` client.
//!
//! Resolves the preferred display string for a `(system, code)` pair from a
//! FHIR terminology server. Responses are memoized per client so repeated
//! codes within one run cost a single request.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::TerminologyResolver;
use crate::error::{Result, TerminologyError};

/// Default terminology server base URL.
pub const DEFAULT_TERMINOLOGY_URL: &str = "https://r4.ontoserver.csiro.au/fhir";

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const FHIR_JSON: &str = "application/fhir+json";

/// Client for a FHIR terminology server's `CodeSystem/$lookup` operation.
pub struct OntoserverClient {
    base_url: String,
    client: Client,
    /// Memoized lookups, including not-found results.
    cache: Mutex<HashMap<(String, String), Option<String>>>,
}

impl OntoserverClient {
    /// Create a client against the given FHIR base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(TerminologyError::Network)?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
            cache: Mutex::new(HashMap::new()),
        })
    }

    fn lookup_url(&self, system: &str, code: &str) -> String {
        format!(
            "{}/CodeSystem/$lookup?system={}&code={}",
            self.base_url,
            urlencoding::encode(system),
            urlencoding::encode(code)
        )
    }

    fn fetch_display(&self, system: &str, code: &str) -> Result<Option<String>> {
        let url = self.lookup_url(system, code);
        debug!(%url, "terminology lookup");

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, FHIR_JSON)
            .send()
            .map_err(TerminologyError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TerminologyError::Http {
                status: status.as_u16(),
                system: system.to_string(),
                code: code.to_string(),
            });
        }

        let parameters: Parameters = response.json().map_err(TerminologyError::Network)?;
        let display = extract_display(&parameters);
        if display.is_none() {
            warn!(system, code, "lookup response carried no display");
        }
        Ok(display)
    }
}

impl TerminologyResolver for OntoserverClient {
    fn resolve_display(&self, system: &str, code: &str) -> Result<Option<String>> {
        let key = (system.to_string(), code.to_string());
        if let Some(cached) = self.cache.lock().unwrap().get(&key) {
            return Ok(cached.clone());
        }

        let display = self.fetch_display(system, code)?;
        self.cache.lock().unwrap().insert(key, display.clone());
        Ok(display)
    }
}

/// Subset of a FHIR `Parameters` resource sufficient for `$lookup` replies.
#[derive(Debug, Deserialize)]
struct Parameters {
    #[serde(default)]
    parameter: Vec<Parameter>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Parameter {
    #[serde(default)]
    name: String,
    value_string: Option<String>,
    value_boolean: Option<bool>,
    #[serde(default)]
    part: Vec<Parameter>,
}

/// Pull the display string out of a `$lookup` response.
///
/// Preference order: the top-level `display` parameter, then the display
/// part of a property flagged `preferred`, then any property display part.
fn extract_display(parameters: &Parameters) -> Option<String> {
    for parameter in &parameters.parameter {
        if parameter.name == "display" {
            if let Some(value) = &parameter.value_string {
                return Some(value.clone());
            }
        }
        if parameter.name == "property" {
            let preferred = parameter
                .part
                .iter()
                .any(|part| part.name == "preferred" && part.value_boolean == Some(true));
            if preferred {
                if let Some(display) = part_display(parameter) {
                    return Some(display);
                }
            }
        }
    }

    parameters
        .parameter
        .iter()
        .filter(|parameter| parameter.name == "property")
        .find_map(part_display)
}

fn part_display(parameter: &Parameter) -> Option<String> {
    parameter
        .part
        .iter()
        .find(|part| part.name == "display")
        .and_then(|part| part.value_string.clone())
}
