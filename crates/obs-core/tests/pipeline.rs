//! Integration tests for the pipeline driver.

use obs_core::{MemoryStore, ObservationStore, PipelineOptions, run_pipeline};
use obs_ingest::RawRow;
use obs_terminology::{StaticResolver, TerminologyError, TerminologyResolver};

fn row(number: usize, code: &str, value: &str, ucum: &str) -> RawRow {
    RawRow {
        record_number: number,
        code: Some(code.to_string()),
        system: Some("http://loinc.org".to_string()),
        panel_description: None,
        text_description: Some("Some test".to_string()),
        value: Some(value.to_string()),
        units: Some("mmol/L".to_string()),
        ucum: Some(ucum.to_string()),
        low_ref_range: Some("1.0".to_string()),
        high_ref_range: Some("2.0".to_string()),
        rr_display: None,
        date_observed: Some("12/6/2024".to_string()),
    }
}

fn loinc_resolver() -> StaticResolver {
    let mut resolver = StaticResolver::new();
    resolver.insert("http://loinc.org", "2085-9", "Cholesterol in HDL");
    resolver
}

struct FailingResolver;

impl TerminologyResolver for FailingResolver {
    fn resolve_display(
        &self,
        system: &str,
        code: &str,
    ) -> obs_terminology::Result<Option<String>> {
        Err(TerminologyError::Http {
            status: 503,
            system: system.to_string(),
            code: code.to_string(),
        })
    }
}

/// Fails every write for a chosen filename, succeeds otherwise.
struct FlakyStore {
    inner: MemoryStore,
    fail_on: String,
}

impl ObservationStore for FlakyStore {
    fn write(&mut self, filename: &str, contents: &[u8]) -> obs_core::store::Result<()> {
        if filename == self.fail_on {
            return Err(obs_core::StoreError::Write {
                filename: filename.to_string(),
                source: std::io::Error::other("disk full"),
            });
        }
        self.inner.write(filename, contents)
    }
}

fn parse_document(store: &MemoryStore, filename: &str) -> serde_json::Value {
    serde_json::from_slice(store.files.get(filename).expect("document written"))
        .expect("valid json")
}

#[test]
fn valid_rows_each_produce_one_document() {
    let rows = vec![row(1, "2085-9", "1.2", "mmol/L"), row(2, "718-7", "140", "g/L")];
    let mut store = MemoryStore::new();
    let outcome = run_pipeline(
        &rows,
        &loinc_resolver(),
        &mut store,
        &PipelineOptions::default(),
    );

    assert_eq!(outcome.summary.succeeded, 2);
    assert_eq!(outcome.summary.failed, 0);
    assert_eq!(store.files.len(), 2);
    assert!(store.files.contains_key("observation_2085-9_001.json"));
    assert!(store.files.contains_key("observation_718-7_001.json"));
}

#[test]
fn hdl_scenario_produces_expected_blocks() {
    let rows = vec![{
        let mut r = row(1, "2085-9", "1.2", "mmol/L");
        r.text_description = Some("HDL Cholesterol".to_string());
        r
    }];
    let mut store = MemoryStore::new();
    run_pipeline(
        &rows,
        &loinc_resolver(),
        &mut store,
        &PipelineOptions::default(),
    );

    let document = parse_document(&store, "observation_2085-9_001.json");
    assert_eq!(document["resourceType"], "Observation");
    assert_eq!(document["status"], "final");
    assert_eq!(document["category"][0]["coding"][0]["code"], "laboratory");
    assert_eq!(document["code"]["coding"][0]["display"], "Cholesterol in HDL");
    assert_eq!(document["code"]["text"], "HDL Cholesterol");
    assert_eq!(document["valueQuantity"]["value"], 1.2);
    assert_eq!(document["valueQuantity"]["unit"], "mmol/L");
    assert_eq!(document["valueQuantity"]["code"], "mmol/L");
    assert_eq!(document["referenceRange"][0]["low"]["value"], 1.0);
    assert_eq!(document["referenceRange"][0]["high"]["value"], 2.0);
    assert_eq!(document["effectiveDateTime"], "2024-06-12");
}

#[test]
fn failed_rows_are_isolated() {
    let mut bad = row(2, "", "1.2", "mmol/L");
    bad.code = Some(String::new());
    let rows = vec![row(1, "2085-9", "1.2", "mmol/L"), bad, row(3, "718-7", "140", "g/L")];

    let mut store = MemoryStore::new();
    let outcome = run_pipeline(
        &rows,
        &loinc_resolver(),
        &mut store,
        &PipelineOptions::default(),
    );

    assert_eq!(outcome.summary.succeeded, 2);
    assert_eq!(outcome.summary.failed, 1);
    assert_eq!(outcome.summary.failures[0].row, 2);
    assert!(
        outcome.summary.failures[0]
            .reason
            .contains("required field 'code'")
    );
    assert_eq!(store.files.len(), 2);
}

#[test]
fn value_without_ucum_fails_the_row() {
    let rows = vec![row(1, "2085-9", "1.2", "  ")];
    let mut store = MemoryStore::new();
    let outcome = run_pipeline(
        &rows,
        &loinc_resolver(),
        &mut store,
        &PipelineOptions::default(),
    );

    assert_eq!(outcome.summary.succeeded, 0);
    assert_eq!(outcome.summary.failed, 1);
    assert!(store.files.is_empty());
}

#[test]
fn bad_date_still_succeeds_without_effective_date() {
    let mut rows = vec![row(1, "2085-9", "1.2", "mmol/L")];
    rows[0].date_observed = Some("not-a-date".to_string());

    let mut store = MemoryStore::new();
    let outcome = run_pipeline(
        &rows,
        &loinc_resolver(),
        &mut store,
        &PipelineOptions::default(),
    );

    assert_eq!(outcome.summary.succeeded, 1);
    assert!(outcome
        .summary
        .warnings
        .iter()
        .any(|w| w.message.contains("not-a-date")));
    let document = parse_document(&store, "observation_2085-9_001.json");
    assert!(document.get("effectiveDateTime").is_none());
}

#[test]
fn resolution_failure_is_a_warning_not_a_failure() {
    let rows = vec![row(1, "2085-9", "1.2", "mmol/L")];
    let mut store = MemoryStore::new();
    let outcome = run_pipeline(
        &rows,
        &FailingResolver,
        &mut store,
        &PipelineOptions::default(),
    );

    assert_eq!(outcome.summary.succeeded, 1);
    assert_eq!(outcome.summary.failed, 0);
    assert!(outcome
        .summary
        .warnings
        .iter()
        .any(|w| w.message.contains("terminology lookup failed")));

    let document = parse_document(&store, "observation_2085-9_001.json");
    assert!(document["code"]["coding"][0].get("display").is_none());
}

#[test]
fn skipped_lookups_warn_nothing() {
    let rows = vec![row(1, "2085-9", "1.2", "mmol/L"), row(2, "718-7", "140", "g/L")];
    let mut store = MemoryStore::new();
    let options = PipelineOptions {
        skip_lookup: true,
        ..PipelineOptions::default()
    };
    // A resolver that would fail every call proves it is never consulted.
    let outcome = run_pipeline(&rows, &FailingResolver, &mut store, &options);

    assert_eq!(outcome.summary.succeeded, 2);
    assert_eq!(outcome.summary.failed, 0);
    assert!(outcome.summary.warnings.is_empty());

    let document = parse_document(&store, "observation_2085-9_001.json");
    assert!(document["code"]["coding"][0].get("display").is_none());
}

#[test]
fn shared_codes_get_distinct_sequences() {
    let rows = vec![row(1, "2085-9", "1.2", "mmol/L"), row(2, "2085-9", "1.4", "mmol/L")];
    let mut store = MemoryStore::new();
    let outcome = run_pipeline(
        &rows,
        &loinc_resolver(),
        &mut store,
        &PipelineOptions::default(),
    );

    assert_eq!(outcome.summary.succeeded, 2);
    let first = parse_document(&store, "observation_2085-9_001.json");
    let second = parse_document(&store, "observation_2085-9_002.json");
    assert_eq!(first["id"], "observation-2085-9-1");
    assert_eq!(second["id"], "observation-2085-9-2");
}

#[test]
fn persistence_failure_only_affects_its_row() {
    let rows = vec![row(1, "2085-9", "1.2", "mmol/L"), row(2, "718-7", "140", "g/L")];
    let mut store = FlakyStore {
        inner: MemoryStore::new(),
        fail_on: "observation_718-7_001.json".to_string(),
    };
    let outcome = run_pipeline(
        &rows,
        &loinc_resolver(),
        &mut store,
        &PipelineOptions::default(),
    );

    assert_eq!(outcome.summary.succeeded, 1);
    assert_eq!(outcome.summary.failed, 1);
    assert_eq!(outcome.summary.failures[0].row, 2);
    assert!(store.inner.files.contains_key("observation_2085-9_001.json"));
}

#[test]
fn reruns_on_identical_input_are_byte_identical() {
    let rows = vec![row(1, "2085-9", "1.2", "mmol/L"), row(2, "2085-9", "1.4", "mmol/L")];

    let mut first = MemoryStore::new();
    run_pipeline(&rows, &loinc_resolver(), &mut first, &PipelineOptions::default());
    let mut second = MemoryStore::new();
    run_pipeline(&rows, &loinc_resolver(), &mut second, &PipelineOptions::default());

    assert_eq!(first.files, second.files);
}

#[test]
fn round_trip_recovers_numeric_fields() {
    let rows = vec![row(1, "2085-9", "1.2", "mmol/L")];
    let mut store = MemoryStore::new();
    run_pipeline(&rows, &loinc_resolver(), &mut store, &PipelineOptions::default());

    let document = parse_document(&store, "observation_2085-9_001.json");
    assert_eq!(document["valueQuantity"]["value"].as_f64(), Some(1.2));
    assert_eq!(
        document["referenceRange"][0]["low"]["value"].as_f64(),
        Some(1.0)
    );
    assert_eq!(
        document["referenceRange"][0]["high"]["value"].as_f64(),
        Some(2.0)
    );
}

#[test]
fn collected_documents_feed_the_bundle() {
    let rows = vec![row(1, "2085-9", "1.2", "mmol/L"), row(2, "718-7", "140", "g/L")];
    let mut store = MemoryStore::new();
    let options = PipelineOptions {
        collect_documents: true,
        ..PipelineOptions::default()
    };
    let outcome = run_pipeline(&rows, &loinc_resolver(), &mut store, &options);

    assert_eq!(outcome.documents.len(), 2);
    let bundle = obs_core::build_bundle(&outcome.documents);
    assert_eq!(bundle.entry.len(), 2);
    assert_eq!(bundle.entry[0].resource.id, "observation-2085-9-1");
}
