//! The pipeline driver.
//!
//! Rows are processed strictly sequentially in input order: parse, resolve,
//! build, persist. Failure isolation is the central policy here; a row that
//! fails validation or persistence is recorded in the tally and the loop
//! moves on. The run always completes with a full summary.

use obs_ingest::reader::RawRow;
use obs_ingest::parse_row;
use obs_model::{Observation, RowWarning, RunSummary, ids};
use obs_terminology::TerminologyResolver;
use tracing::{debug, warn};

use crate::builder::{BuildOptions, build_observation};
use crate::sequence::SequenceAllocator;
use crate::store::ObservationStore;

/// Driver configuration.
#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    pub build: BuildOptions,
    /// Keep the built documents for bundle assembly after the run.
    pub collect_documents: bool,
    /// Skip terminology resolution for the whole run. Displays are omitted
    /// and the resolver is never consulted, so no per-row warnings accrue.
    pub skip_lookup: bool,
}

/// What a run produced: the tally, and the documents when collection was
/// requested.
#[derive(Debug, Default)]
pub struct RunOutcome {
    pub summary: RunSummary,
    pub documents: Vec<Observation>,
}

/// Process every row, writing one document per successful row.
///
/// Per-row errors never escape: validation and persistence failures become
/// failure entries, terminology and field-parse problems become warnings on
/// rows that still succeed.
pub fn run_pipeline(
    rows: &[RawRow],
    resolver: &dyn TerminologyResolver,
    store: &mut dyn ObservationStore,
    options: &PipelineOptions,
) -> RunOutcome {
    let mut outcome = RunOutcome::default();
    let mut sequences = SequenceAllocator::new();

    for raw in rows {
        let row = raw.record_number;

        let parsed = match parse_row(raw) {
            Ok(parsed) => parsed,
            Err(error) => {
                warn!(row, %error, "row rejected");
                outcome.summary.record_failure(row, error.to_string());
                continue;
            }
        };
        for warning in parsed.warnings {
            outcome.summary.record_warning(warning);
        }
        let record = parsed.record;

        let display = if options.skip_lookup {
            None
        } else {
            match resolver.resolve_display(&record.system, &record.code) {
                Ok(Some(display)) => Some(display),
                Ok(None) => {
                    outcome.summary.record_warning(RowWarning {
                        row,
                        message: format!(
                            "no display found for {}|{}",
                            record.system, record.code
                        ),
                    });
                    None
                }
                Err(error) => {
                    warn!(row, %error, "terminology lookup failed");
                    outcome.summary.record_warning(RowWarning {
                        row,
                        message: format!("terminology lookup failed: {error}"),
                    });
                    None
                }
            }
        };

        let sequence = sequences.next(&record.code);
        let observation =
            build_observation(&record, display.as_deref(), sequence, &options.build);

        let bytes = match serde_json::to_vec_pretty(&observation) {
            Ok(bytes) => bytes,
            Err(error) => {
                outcome
                    .summary
                    .record_failure(row, format!("serialization failed: {error}"));
                continue;
            }
        };

        let filename = ids::observation_filename(&record.code, sequence);
        if let Err(error) = store.write(&filename, &bytes) {
            warn!(row, %error, "persistence failed");
            outcome.summary.record_failure(row, error.to_string());
            continue;
        }

        debug!(row, %filename, "created observation document");
        outcome.summary.record_success();
        if options.collect_documents {
            outcome.documents.push(observation);
        }
    }

    outcome
}
