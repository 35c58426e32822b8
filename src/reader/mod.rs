//! Source readers turning raw input files into candidate records.
//!
//! Two readers share this module: [`tei`] parses the structured dictionary
//! markup into lexical entries, [`phrases`] parses the tab-separated
//! phrase-pair table into rows. Both follow the same ingestion policy:
//! a missing file is fatal, a malformed individual entry or row is skipped
//! and never aborts the read.

mod error;
pub mod phrases;
pub mod tei;

pub use error::ReadError;
pub use phrases::{RawPhraseRow, read_phrase_rows};
pub use tei::{RawLexicalEntry, read_entries};
