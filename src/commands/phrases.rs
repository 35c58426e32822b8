//! Phrase-table conversion command flow.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use lexport_core::{ScoreParams, run_phrases};
use tracing::{debug, info};

/// Directory scanned for `phrases*.tsv` when no input path is given.
const DEFAULT_INPUT_DIR: &str = "data";

/// Runs the `phrases` subcommand.
pub fn run_phrases_command(input: Option<PathBuf>, output: &Path) -> Result<()> {
    let input = match input {
        Some(path) => path,
        None => match discover_default_input(Path::new(DEFAULT_INPUT_DIR)) {
            Some(path) => {
                debug!(path = %path.display(), "discovered phrase table");
                path
            }
            None => bail!(
                "TSV input not found. Provide a path or place a 'phrases*.tsv' in {DEFAULT_INPUT_DIR}/"
            ),
        },
    };
    if !input.exists() {
        bail!("TSV input not found: {}", input.display());
    }

    let written = run_phrases(&input, output, ScoreParams::default())?;
    info!(
        records = written,
        output = %output.display(),
        "phrase conversion complete"
    );
    Ok(())
}

/// Picks the most-recently-modified `phrases*.tsv` in `dir`, if any.
fn discover_default_input(dir: &Path) -> Option<PathBuf> {
    let entries = std::fs::read_dir(dir).ok()?;
    entries
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let name = entry.file_name().to_str()?.to_lowercase();
            if !name.starts_with("phrases") || !name.ends_with(".tsv") {
                return None;
            }
            let modified = entry.metadata().ok()?.modified().ok()?;
            Some((modified, entry.path()))
        })
        .max_by_key(|(modified, _)| *modified)
        .map(|(_, path)| path)
}
