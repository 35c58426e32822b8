//! Dictionary conversion command flow.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use lexport_core::{FreqTable, ScoreParams, run_dictionary};
use tracing::{info, warn};

/// Default TEI input path when none is given.
const DEFAULT_DICT_INPUT: &str = "data/eng-rus.tei";

/// Frequency table picked up automatically when `--freq` is omitted.
const DEFAULT_FREQ_TABLE: &str = "data/unigram_freq.csv";

/// Runs the `dict` subcommand.
///
/// A missing input file is fatal; a missing or unreadable frequency table
/// is recovered by scoring every record with the out-of-vocabulary
/// default.
pub fn run_dict_command(
    input: Option<PathBuf>,
    output: &Path,
    freq: Option<PathBuf>,
) -> Result<()> {
    let input = input.unwrap_or_else(|| PathBuf::from(DEFAULT_DICT_INPUT));
    if !input.exists() {
        bail!("TEI file not found: {}", input.display());
    }

    let freq_path = freq.or_else(|| {
        let default = PathBuf::from(DEFAULT_FREQ_TABLE);
        default.exists().then_some(default)
    });

    let table = match freq_path {
        Some(path) => match FreqTable::load(&path) {
            Ok(table) => {
                info!(
                    path = %path.display(),
                    entries = table.len(),
                    "loaded frequency table"
                );
                Some(table)
            }
            Err(error) => {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "frequency table unreadable; scoring with out-of-vocabulary defaults"
                );
                None
            }
        },
        None => {
            info!("no frequency table found; scoring with out-of-vocabulary defaults");
            None
        }
    };

    let written = run_dictionary(&input, output, table.as_ref(), ScoreParams::default())?;
    info!(
        records = written,
        output = %output.display(),
        "dictionary conversion complete"
    );
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_dict_command_missing_input_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = run_dict_command(
            Some(dir.path().join("absent.tei")),
            &dir.path().join("out.jsonl"),
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_dict_command_converts_without_table() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = dir.path().join("dict.tei");
        let output = dir.path().join("out.jsonl");
        std::fs::write(
            &input,
            r#"<entry><form><orth>cat</orth></form><gramGrp><pos>n</pos></gramGrp><sense><cit type="trans" xml:lang="ru"><quote>кот</quote></cit></sense></entry>"#,
        )
        .unwrap();

        run_dict_command(Some(input), &output, None).unwrap();

        assert!(output.exists());
    }

    #[test]
    fn test_dict_command_unreadable_table_is_recovered() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = dir.path().join("dict.tei");
        let output = dir.path().join("out.jsonl");
        std::fs::write(
            &input,
            r#"<entry><form><orth>cat</orth></form><gramGrp><pos>n</pos></gramGrp><sense><cit type="trans" xml:lang="ru"><quote>кот</quote></cit></sense></entry>"#,
        )
        .unwrap();

        let result = run_dict_command(
            Some(input),
            &output,
            Some(dir.path().join("absent.csv")),
        );

        assert!(result.is_ok(), "missing table must not fail the run");
        let content = std::fs::read_to_string(&output).unwrap();
        assert!(content.contains("\"frequency\":20"));
    }
}
