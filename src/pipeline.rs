//! The two batch pipelines: dictionary markup → JSONL and phrase table →
//! JSONL.
//!
//! Both are the same shape — read, canonicalize, score, emit — and differ
//! only in their source reader, output schema, and scoring-range strategy:
//! the dictionary scores against an external reference table, the phrase
//! batch fits its range over its own counts.

use std::path::Path;

use thiserror::Error;
use tracing::{info, instrument};

use crate::emit::{DraftRecord, EmitError, write_jsonl};
use crate::freq::{FreqTable, LogRange, ScoreParams, score_count};
use crate::normalize::clean_phrase;
use crate::reader::{ReadError, read_entries, read_phrase_rows};
use crate::record::{
    LANGUAGE_PAIR, LexicalRecord, PHRASE_CONFIDENCE, PartOfSpeech, PhraseRecord,
};

/// Errors from a whole pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Reading the source file failed.
    #[error(transparent)]
    Read(#[from] ReadError),

    /// Staging or persisting the output failed.
    #[error(transparent)]
    Emit(#[from] EmitError),
}

/// A (headword, translation) pairing awaiting emission.
struct LexicalDraft {
    word: String,
    translation: String,
    part_of_speech: PartOfSpeech,
    definition: Option<String>,
    frequency: u8,
}

impl DraftRecord for LexicalDraft {
    type Key = (String, String, PartOfSpeech);
    type Record = LexicalRecord;

    fn dedup_key(&self) -> Self::Key {
        (
            self.word.clone(),
            self.translation.clone(),
            self.part_of_speech,
        )
    }

    fn into_record(self, id: u64, timestamp_ms: u64) -> LexicalRecord {
        LexicalRecord {
            id,
            source_word: self.word,
            target_word: self.translation,
            language_pair: LANGUAGE_PAIR,
            part_of_speech: self.part_of_speech,
            definition: self.definition,
            frequency: self.frequency,
            created_at: timestamp_ms,
            updated_at: timestamp_ms,
        }
    }
}

/// A cleaned phrase pair awaiting emission.
struct PhraseDraft {
    source: String,
    target: String,
    frequency: u8,
}

impl DraftRecord for PhraseDraft {
    type Key = (String, String);
    type Record = PhraseRecord;

    fn dedup_key(&self) -> Self::Key {
        (self.source.clone(), self.target.clone())
    }

    fn into_record(self, id: u64, timestamp_ms: u64) -> PhraseRecord {
        PhraseRecord {
            id,
            source_phrase: self.source,
            target_phrase: self.target,
            language_pair: LANGUAGE_PAIR,
            frequency: self.frequency,
            confidence: PHRASE_CONFIDENCE,
            created_at: timestamp_ms,
            updated_at: timestamp_ms,
        }
    }
}

/// Runs the dictionary pipeline: TEI entries in, deduplicated lexical
/// records out.
///
/// When `freq` is `None` every record scores the out-of-vocabulary
/// default; otherwise each headword is looked up against the table and
/// scored over the table's own log range.
///
/// Returns the number of records written.
///
/// # Errors
///
/// Returns [`PipelineError`] when the source cannot be read or the output
/// cannot be staged/persisted.
#[instrument(skip_all, fields(input = %input.display(), output = %output.display()))]
pub fn run_dictionary(
    input: &Path,
    output: &Path,
    freq: Option<&FreqTable>,
    params: ScoreParams,
) -> Result<usize, PipelineError> {
    let entries = read_entries(input)?;
    info!(entries = entries.len(), "dictionary entries extracted");

    let drafts = entries.into_iter().flat_map(|entry| {
        let frequency = freq.map_or(params.oov_default, |table| table.score(&entry.word, params));
        let word = entry.word;
        let part_of_speech = entry.part_of_speech;
        let definition = entry.definition;
        entry
            .translations
            .into_iter()
            .map(move |translation| LexicalDraft {
                word: word.clone(),
                translation,
                part_of_speech,
                definition: definition.clone(),
                frequency,
            })
    });

    let written = write_jsonl(output, drafts)?;
    info!(records = written, "dictionary records written");
    Ok(written)
}

/// Runs the phrase pipeline: TSV rows in, deduplicated phrase records out.
///
/// The scoring range is fitted over this batch's own raw counts; rows with
/// an absent or negative count score the out-of-vocabulary default.
///
/// Returns the number of records written.
///
/// # Errors
///
/// Returns [`PipelineError`] when the source cannot be read or the output
/// cannot be staged/persisted.
#[instrument(skip_all, fields(input = %input.display(), output = %output.display()))]
pub fn run_phrases(
    input: &Path,
    output: &Path,
    params: ScoreParams,
) -> Result<usize, PipelineError> {
    let rows = read_phrase_rows(input)?;
    info!(rows = rows.len(), "phrase rows read");

    let range = LogRange::from_counts(rows.iter().filter_map(|row| row.count));

    let drafts = rows.into_iter().filter_map(|row| {
        let source = clean_phrase(Some(&row.source)).filter(|s| !s.is_empty())?;
        let target = clean_phrase(Some(&row.target)).filter(|t| !t.is_empty())?;
        Some(PhraseDraft {
            source,
            target,
            frequency: score_count(row.count, range, params),
        })
    });

    let written = write_jsonl(output, drafts)?;
    info!(records = written, "phrase records written");
    Ok(written)
}
