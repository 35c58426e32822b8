//! Tab-separated phrase-pair reader.
//!
//! The source layout is positional: `(id, source, count, target)`. Short
//! rows and malformed numeric fields degrade to absent values; a row the
//! csv reader cannot decode at all is skipped with a warning. Row order is
//! preserved because it drives scoring and id assignment downstream.

use std::path::Path;

use tracing::{debug, instrument, warn};

use super::ReadError;

/// One raw row from the phrase table, before canonicalization.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPhraseRow {
    /// External row id from the source; never used for output numbering.
    pub external_id: Option<i64>,
    /// Source-language phrase, as written.
    pub source: String,
    /// Raw occurrence count, when present and numeric.
    pub count: Option<f64>,
    /// Target-language phrase, as written.
    pub target: String,
}

/// Reads all rows from a TSV file, in order.
///
/// # Errors
///
/// Fails only when the file cannot be opened; individual undecodable rows
/// are skipped.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn read_phrase_rows(path: &Path) -> Result<Vec<RawPhraseRow>, ReadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| ReadError::delimited(path, e))?;

    let mut rows = Vec::new();
    let mut skipped = 0usize;

    for (index, record) in reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(error) => {
                skipped += 1;
                warn!(row = index + 1, error = %error, "skipping undecodable phrase row");
                continue;
            }
        };

        rows.push(RawPhraseRow {
            external_id: field(&record, 0).and_then(|v| v.trim().parse::<i64>().ok()),
            source: field(&record, 1).unwrap_or_default().to_string(),
            count: field(&record, 2).and_then(|v| v.trim().parse::<f64>().ok()),
            target: field(&record, 3).unwrap_or_default().to_string(),
        });
    }

    debug!(rows = rows.len(), skipped, "finished reading phrase rows");
    Ok(rows)
}

/// Returns a non-empty positional field, `None` for short rows or empty
/// cells.
fn field<'r>(record: &'r csv::StringRecord, index: usize) -> Option<&'r str> {
    record.get(index).filter(|v| !v.is_empty())
}
