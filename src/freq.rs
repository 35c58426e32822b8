//! Frequency scoring: log-scaled min-max normalization of raw occurrence
//! counts into a bounded integer popularity score.
//!
//! Two range sources exist and are deliberately kept apart: the dictionary
//! pipeline fits the range over an external reference table
//! ([`FreqTable`]), while the phrase pipeline fits it over the batch's own
//! counts ([`LogRange::from_counts`]).

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, warn};

use crate::normalize::freq_key;

/// Score given to items with no usable count (absent from the reference
/// table, absent in the row, or a negative raw value).
pub const DEFAULT_OOV_SCORE: u8 = 20;

/// Score given to every in-vocabulary item when the fitted log range is
/// degenerate (empty or single-valued population).
pub const DEFAULT_DEGENERATE_SCORE: u8 = 50;

/// Calibration constants for [`score_count`].
///
/// The historical values (20 and 50) are undocumented calibration choices;
/// they are surfaced here as overridable parameters rather than buried as
/// literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreParams {
    /// Returned when no count is available for an item.
    pub oov_default: u8,
    /// Returned for in-vocabulary items when the range cannot discriminate.
    pub degenerate_default: u8,
}

impl Default for ScoreParams {
    fn default() -> Self {
        Self {
            oov_default: DEFAULT_OOV_SCORE,
            degenerate_default: DEFAULT_DEGENERATE_SCORE,
        }
    }
}

/// Precomputed `ln(count + 1)` range over a population of raw counts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogRange {
    min_log: f64,
    max_log: f64,
}

impl LogRange {
    /// Fits the range over an iterator of raw counts.
    ///
    /// Negative counts are excluded from the fit entirely (treated as
    /// absent, not as zero). An empty population yields the degenerate
    /// placeholder range `(0, 1)`; scoring against it still discriminates
    /// nothing because every count it was fitted from is gone.
    #[must_use]
    pub fn from_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut min_log = f64::INFINITY;
        let mut max_log = f64::NEG_INFINITY;
        let mut seen = false;

        for count in counts {
            if count < 0.0 {
                continue;
            }
            let x = (count + 1.0).ln();
            min_log = min_log.min(x);
            max_log = max_log.max(x);
            seen = true;
        }

        if seen {
            Self { min_log, max_log }
        } else {
            Self {
                min_log: 0.0,
                max_log: 1.0,
            }
        }
    }

    /// True when `max_log <= min_log`, i.e. the population had at most one
    /// distinct value and linear rescaling would divide by zero.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.max_log <= self.min_log
    }
}

/// Maps a raw occurrence count onto an integer score in `[1, 100]`.
///
/// `None` and negative counts score `params.oov_default`; a degenerate
/// range scores `params.degenerate_default`; otherwise
/// `round(1 + clamp((ln(count+1) - min) / (max - min), 0, 1) * 99)`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn score_count(count: Option<f64>, range: LogRange, params: ScoreParams) -> u8 {
    let Some(count) = count.filter(|c| *c >= 0.0) else {
        return params.oov_default;
    };
    if range.is_degenerate() {
        return params.degenerate_default;
    }
    let x = (count + 1.0).ln();
    let s = ((x - range.min_log) / (range.max_log - range.min_log)).clamp(0.0, 1.0);
    (1.0 + s * 99.0).round() as u8
}

/// External frequency reference table for the dictionary pipeline.
///
/// Loaded once per run from a comma-separated `(word, count)` file; keys are
/// canonicalized with [`freq_key`] and the log range is fitted over all
/// loaded counts at load time.
#[derive(Debug, Clone)]
pub struct FreqTable {
    counts: HashMap<String, f64>,
    range: LogRange,
}

impl FreqTable {
    /// Loads the table from a CSV file.
    ///
    /// A literal `word` token in the first column of the first row is
    /// treated as a header and skipped. Rows with fewer than two columns,
    /// unparseable counts, or negative counts are skipped; none of them
    /// abort the load.
    ///
    /// # Errors
    ///
    /// Returns an error only when the file itself cannot be opened or read.
    pub fn load(path: &Path) -> Result<Self, csv::Error> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)?;

        let mut counts = HashMap::new();
        let mut skipped = 0usize;

        for (index, record) in reader.records().enumerate() {
            let record = match record {
                Ok(record) => record,
                Err(error) => {
                    skipped += 1;
                    debug!(row = index + 1, error = %error, "skipping unreadable frequency row");
                    continue;
                }
            };
            let Some(word) = record.get(0) else {
                continue;
            };
            if index == 0 && record.len() >= 2 && word.eq_ignore_ascii_case("word") {
                continue;
            }
            let Some(count) = record.get(1).and_then(|v| v.trim().parse::<f64>().ok()) else {
                skipped += 1;
                continue;
            };
            if count < 0.0 {
                skipped += 1;
                continue;
            }
            counts.insert(freq_key(word), count);
        }

        if skipped > 0 {
            warn!(skipped, "skipped malformed frequency rows");
        }

        let range = LogRange::from_counts(counts.values().copied());
        Ok(Self { counts, range })
    }

    /// Number of loaded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True when no entries were loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The log range fitted over the loaded counts.
    #[must_use]
    pub fn range(&self) -> LogRange {
        self.range
    }

    /// Looks up the raw count for a word; the word is canonicalized with
    /// [`freq_key`] before lookup.
    #[must_use]
    pub fn lookup(&self, word: &str) -> Option<f64> {
        self.counts.get(&freq_key(word)).copied()
    }

    /// Scores a word against the table's own range.
    #[must_use]
    pub fn score(&self, word: &str, params: ScoreParams) -> u8 {
        score_count(self.lookup(word), self.range, params)
    }
}
