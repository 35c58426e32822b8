//! Deduplicating JSONL emitter.
//!
//! One emitter serves both pipelines: drafts implement [`DraftRecord`] to
//! supply their deduplication key and to materialize into the serialized
//! record once an id and run timestamp are assigned. Output is staged into a
//! temp file next to the destination and only persisted over it after every
//! record has been written, so a failed run never leaves a partial file.

use std::collections::HashSet;
use std::hash::Hash;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

/// Errors raised while staging or persisting the output file.
#[derive(Debug, Error)]
pub enum EmitError {
    /// Destination directory could not be created or the staging file
    /// could not be opened/written.
    #[error("failed to stage output for '{path}'")]
    Stage {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A record failed to serialize to JSON.
    #[error("failed to serialize record {id}")]
    Serialize {
        id: u64,
        #[source]
        source: serde_json::Error,
    },

    /// The fully staged file could not replace the destination.
    #[error("failed to replace '{path}' with staged output")]
    Persist {
        path: String,
        #[source]
        source: tempfile::PersistError,
    },
}

impl EmitError {
    fn stage(path: &Path, source: std::io::Error) -> Self {
        Self::Stage {
            path: path.display().to_string(),
            source,
        }
    }
}

/// A record candidate awaiting id assignment and dedup filtering.
pub trait DraftRecord {
    /// Equality of keys defines "same record" for suppression purposes.
    type Key: Eq + Hash;
    /// The serialized output shape.
    type Record: Serialize;

    /// The deduplication key, computed over canonicalized fields.
    fn dedup_key(&self) -> Self::Key;

    /// Materializes the final record with its assigned sequential id and
    /// the run timestamp (epoch milliseconds).
    fn into_record(self, id: u64, timestamp_ms: u64) -> Self::Record;
}

/// Writes drafts as a line-delimited JSON stream, atomically.
///
/// Drafts are consumed in order; a draft whose key was already seen is
/// skipped silently, survivors get dense ids starting at 1. The output
/// replaces `dest` only after all records are staged successfully; on any
/// error the previous destination content is left untouched.
///
/// Returns the number of records written.
///
/// # Errors
///
/// Returns [`EmitError`] when the staging file cannot be created or
/// written, a record fails to serialize, or the final rename fails.
pub fn write_jsonl<D>(
    dest: &Path,
    drafts: impl IntoIterator<Item = D>,
) -> Result<usize, EmitError>
where
    D: DraftRecord,
{
    let parent = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(|e| EmitError::stage(dest, e))?;

    let staged = NamedTempFile::new_in(parent).map_err(|e| EmitError::stage(dest, e))?;
    let mut writer = BufWriter::new(staged);

    let timestamp_ms = now_millis();
    let mut seen: HashSet<D::Key> = HashSet::new();
    let mut written = 0usize;

    for draft in drafts {
        if !seen.insert(draft.dedup_key()) {
            debug!("skipping duplicate record");
            continue;
        }
        let id = written as u64 + 1;
        let record = draft.into_record(id, timestamp_ms);
        let line = serde_json::to_string(&record)
            .map_err(|source| EmitError::Serialize { id, source })?;
        writer
            .write_all(line.as_bytes())
            .and_then(|()| writer.write_all(b"\n"))
            .map_err(|e| EmitError::stage(dest, e))?;
        written += 1;
    }

    let staged = writer
        .into_inner()
        .map_err(|e| EmitError::stage(dest, e.into_error()))?;
    staged.as_file().sync_all().map_err(|e| EmitError::stage(dest, e))?;
    staged.persist(dest).map_err(|source| EmitError::Persist {
        path: dest.display().to_string(),
        source,
    })?;

    Ok(written)
}

/// Milliseconds since the Unix epoch; one sample per emitter run.
fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}
