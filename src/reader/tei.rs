//! TEI dictionary markup reader.
//!
//! Walks `<entry>` blocks and extracts the headword, part-of-speech tag,
//! Russian translations, and an optional definition. Entries are filtered
//! here, not downstream: a missing headword, a tag outside the allowed set,
//! or zero surviving translations discard the whole entry.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, instrument};

use super::ReadError;
use crate::normalize::{clean_text, contains_letter};
use crate::record::PartOfSpeech;

/// One `<entry>...</entry>` block.
#[allow(clippy::expect_used)]
static ENTRY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<entry\b[^>]*>(.*?)</entry>").expect("entry regex is valid")
});

/// Headword: first `<orth>` element.
#[allow(clippy::expect_used)]
static ORTH_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<orth\b[^>]*>(.*?)</orth>").expect("orth regex is valid"));

/// Part-of-speech: first `<pos>` element.
#[allow(clippy::expect_used)]
static POS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<pos\b[^>]*>(.*?)</pos>").expect("pos regex is valid"));

/// Translation containers: `<cit>` with its attribute list captured so the
/// type/language filter can be applied attribute-order-insensitively.
#[allow(clippy::expect_used)]
static CIT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<cit\b([^>]*)>(.*?)</cit>").expect("cit regex is valid"));

/// Quoted translation text inside a `<cit>` body.
#[allow(clippy::expect_used)]
static QUOTE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<quote\b[^>]*>(.*?)</quote>").expect("quote regex is valid"));

/// Definition: first `<def>` element.
#[allow(clippy::expect_used)]
static DEF_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<def\b[^>]*>(.*?)</def>").expect("def regex is valid"));

/// A dictionary entry that survived extraction and cleaning.
///
/// All text fields are already canonicalized; `translations` is non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLexicalEntry {
    /// Canonical headword.
    pub word: String,
    /// Resolved part of speech.
    pub part_of_speech: PartOfSpeech,
    /// Canonical definition, when the entry carries one.
    pub definition: Option<String>,
    /// Canonical Russian translations, in source order.
    pub translations: Vec<String>,
}

/// Reads all surviving entries from a TEI file.
///
/// # Errors
///
/// Fails only when the file itself cannot be read; malformed entries are
/// skipped silently.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn read_entries(path: &Path) -> Result<Vec<RawLexicalEntry>, ReadError> {
    let markup = std::fs::read_to_string(path).map_err(|e| ReadError::io(path, e))?;
    let mut entries = Vec::new();
    let mut discarded = 0usize;

    for block in ENTRY_PATTERN.captures_iter(&markup) {
        match extract_entry(&block[1]) {
            Some(entry) => entries.push(entry),
            None => discarded += 1,
        }
    }

    debug!(
        entries = entries.len(),
        discarded, "finished scanning entry blocks"
    );
    Ok(entries)
}

/// Extracts one entry from its inner markup, or `None` when it must be
/// discarded.
fn extract_entry(block: &str) -> Option<RawLexicalEntry> {
    let word = first_text(&ORTH_PATTERN, block).and_then(|raw| clean_text(Some(&raw)))?;
    if word.is_empty() {
        return None;
    }

    let tag = first_text(&POS_PATTERN, block)?;
    let part_of_speech = PartOfSpeech::from_short_tag(tag.trim())?;

    let definition = first_text(&DEF_PATTERN, block)
        .and_then(|raw| clean_text(Some(&raw)))
        .filter(|d| !d.is_empty());

    let mut translations = Vec::new();
    for cit in CIT_PATTERN.captures_iter(block) {
        if !is_russian_translation(&cit[1]) {
            continue;
        }
        for quote in QUOTE_PATTERN.captures_iter(&cit[2]) {
            let Some(text) = clean_text(Some(&unescape_xml(&quote[1]))) else {
                continue;
            };
            // Reject translations that are pure punctuation or digits.
            if text.is_empty() || !contains_letter(&text) {
                continue;
            }
            translations.push(text);
        }
    }

    if translations.is_empty() {
        return None;
    }

    Some(RawLexicalEntry {
        word,
        part_of_speech,
        definition,
        translations,
    })
}

/// True when a `<cit>` attribute list marks a Russian translation,
/// regardless of attribute order.
fn is_russian_translation(attrs: &str) -> bool {
    attrs.contains(r#"type="trans""#) && attrs.contains(r#"xml:lang="ru""#)
}

fn first_text(pattern: &Regex, block: &str) -> Option<String> {
    pattern
        .captures(block)
        .map(|caps| unescape_xml(&caps[1]))
}

/// Decodes the five predefined XML entities in extracted element text.
fn unescape_xml(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
