//! Tab-delimited input reading.
//!
//! The input is one lab result per line with a header row naming the
//! columns. Only `code`, `system`, and `text_description` must exist as
//! columns; the rest are optional and rows may be short. Field values are
//! captured raw here; all normalization happens in the row parser.

use std::path::Path;

use crate::error::{IngestError, Result};

pub const COL_CODE: &str = "code";
pub const COL_SYSTEM: &str = "system";
pub const COL_PANEL_DESCRIPTION: &str = "panel_description";
pub const COL_TEXT_DESCRIPTION: &str = "text_description";
pub const COL_VALUE: &str = "value";
pub const COL_UNITS: &str = "units";
pub const COL_UCUM: &str = "ucum";
pub const COL_LOW_REF_RANGE: &str = "LowRefRange";
pub const COL_HIGH_REF_RANGE: &str = "HighRefRange";
pub const COL_RR_DISPLAY: &str = "RR Display";
pub const COL_DATE_OBSERVED: &str = "dateobserved";

/// Columns that must be present in the header row.
pub const REQUIRED_COLUMNS: [&str; 3] = [COL_CODE, COL_SYSTEM, COL_TEXT_DESCRIPTION];

/// The unmodified field values of one input line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    /// 1-based data row number (header excluded).
    pub record_number: usize,
    pub code: Option<String>,
    pub system: Option<String>,
    pub panel_description: Option<String>,
    pub text_description: Option<String>,
    pub value: Option<String>,
    pub units: Option<String>,
    pub ucum: Option<String>,
    pub low_ref_range: Option<String>,
    pub high_ref_range: Option<String>,
    pub rr_display: Option<String>,
    pub date_observed: Option<String>,
}

/// Column positions resolved from the header row.
#[derive(Debug, Clone)]
struct HeaderMap {
    code: usize,
    system: usize,
    text_description: usize,
    panel_description: Option<usize>,
    value: Option<usize>,
    units: Option<usize>,
    ucum: Option<usize>,
    low_ref_range: Option<usize>,
    high_ref_range: Option<usize>,
    rr_display: Option<usize>,
    date_observed: Option<usize>,
}

impl HeaderMap {
    fn from_headers(headers: &csv::StringRecord, path: &Path) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| IngestError::MissingColumn {
                column: name.to_string(),
                path: path.to_path_buf(),
            })
        };

        Ok(Self {
            code: require(COL_CODE)?,
            system: require(COL_SYSTEM)?,
            text_description: require(COL_TEXT_DESCRIPTION)?,
            panel_description: find(COL_PANEL_DESCRIPTION),
            value: find(COL_VALUE),
            units: find(COL_UNITS),
            ucum: find(COL_UCUM),
            low_ref_range: find(COL_LOW_REF_RANGE),
            high_ref_range: find(COL_HIGH_REF_RANGE),
            rr_display: find(COL_RR_DISPLAY),
            date_observed: find(COL_DATE_OBSERVED),
        })
    }
}

fn field(record: &csv::StringRecord, index: Option<usize>) -> Option<String> {
    index
        .and_then(|i| record.get(i))
        .map(std::string::ToString::to_string)
}

/// Read all data rows from a tab-delimited file.
///
/// Fails only when the file itself cannot be read or the mandatory columns
/// are absent from the header. Malformed field values within rows are
/// passed through untouched for the row parser to judge.
pub fn read_rows(path: &Path) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|source| match source.kind() {
            csv::ErrorKind::Io(io) if io.kind() == std::io::ErrorKind::NotFound => {
                IngestError::FileNotFound {
                    path: path.to_path_buf(),
                }
            }
            _ => IngestError::Csv {
                path: path.to_path_buf(),
                source,
            },
        })?;

    let headers = reader
        .headers()
        .map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?
        .clone();
    if headers.is_empty() || (headers.len() == 1 && headers[0].trim().is_empty()) {
        return Err(IngestError::EmptyFile {
            path: path.to_path_buf(),
        });
    }
    let header_map = HeaderMap::from_headers(&headers, path)?;

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        rows.push(RawRow {
            record_number: index + 1,
            code: field(&record, Some(header_map.code)),
            system: field(&record, Some(header_map.system)),
            panel_description: field(&record, header_map.panel_description),
            text_description: field(&record, Some(header_map.text_description)),
            value: field(&record, header_map.value),
            units: field(&record, header_map.units),
            ucum: field(&record, header_map.ucum),
            low_ref_range: field(&record, header_map.low_ref_range),
            high_ref_range: field(&record, header_map.high_ref_range),
            rr_display: field(&record, header_map.rr_display),
            date_observed: field(&record, header_map.date_observed),
        });
    }

    tracing::debug!(path = %path.display(), rows = rows.len(), "read input rows");
    Ok(rows)
}
