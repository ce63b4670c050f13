//! Run-level outcome accounting.

use serde::{Deserialize, Serialize};

/// One row that could not be processed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowFailure {
    /// 1-based data row number (header excluded).
    pub row: usize,
    pub reason: String,
}

/// A non-fatal issue on a row that still produced a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowWarning {
    /// 1-based data row number (header excluded).
    pub row: usize,
    pub message: String,
}

/// Tally of one pipeline run.
///
/// The run always completes with a full summary; a row failure is recorded
/// here and never stops subsequent rows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub failures: Vec<RowFailure>,
    pub warnings: Vec<RowWarning>,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&mut self) {
        self.succeeded += 1;
    }

    pub fn record_failure(&mut self, row: usize, reason: impl Into<String>) {
        self.failed += 1;
        self.failures.push(RowFailure {
            row,
            reason: reason.into(),
        });
    }

    pub fn record_warning(&mut self, warning: RowWarning) {
        self.warnings.push(warning);
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}
