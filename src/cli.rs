//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Convert bilingual dictionary sources into deduplicated JSONL records.
///
/// Lexport reads a TEI dictionary file or a tab-separated phrase table and
/// writes one canonical record per line, with stable sequential ids and
/// log-scaled frequency scores.
#[derive(Parser, Debug)]
#[command(name = "lexport")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert a TEI dictionary file into dictionary.jsonl
    Dict {
        /// TEI input file (defaults to data/eng-rus.tei)
        input: Option<PathBuf>,

        /// Output JSONL path
        #[arg(short, long, default_value = "en-ru/dictionary.jsonl")]
        output: PathBuf,

        /// Frequency reference CSV (defaults to data/unigram_freq.csv when present)
        #[arg(long)]
        freq: Option<PathBuf>,
    },

    /// Convert a tab-separated phrase table into phrases.jsonl
    Phrases {
        /// TSV input file (defaults to the newest phrases*.tsv in data/)
        input: Option<PathBuf>,

        /// Output JSONL path
        #[arg(short, long, default_value = "en-ru/phrases.jsonl")]
        output: PathBuf,
    },
}
