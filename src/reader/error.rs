//! Error type shared by the source readers.

use thiserror::Error;

/// Errors raised while reading a source file.
///
/// Only whole-file failures surface here; malformed individual entries and
/// rows are recovered inside the readers.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The source file could not be opened or read.
    #[error("failed to read source file '{path}'")]
    Io {
        /// Path of the file that failed.
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The delimited source could not be iterated at all.
    #[error("failed to parse delimited source '{path}'")]
    Delimited {
        /// Path of the file that failed.
        path: String,
        #[source]
        source: csv::Error,
    },
}

impl ReadError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }

    pub(crate) fn delimited(path: &std::path::Path, source: csv::Error) -> Self {
        Self::Delimited {
            path: path.display().to_string(),
            source,
        }
    }
}
