//! Text canonicalization for dictionary and phrase fields.
//!
//! Three distinct forms are produced here and must not be conflated:
//! - [`clean_text`] - display form for dictionary entries (unwraps wiki
//!   links, strips diacritics, trims quotes and brackets)
//! - [`clean_phrase`] - display form for phrase pairs (narrower: no link
//!   unwrapping, no quote/bracket trim)
//! - [`freq_key`] - lowercased lookup key for the frequency reference table

use std::sync::LazyLock;

use regex::{Captures, Regex};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Regex for piped wiki links: `[[target|display]]`.
/// Must be applied before the bare form so the piped body is not re-matched.
#[allow(clippy::expect_used)]
static WIKI_LINK_PIPE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\[([^\]|]+)\|([^\]]+)\]\]").expect("piped wiki link regex is valid")
});

/// Regex for bare wiki links: `[[target]]`.
#[allow(clippy::expect_used)]
static WIKI_LINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]]+)\]\]").expect("bare wiki link regex is valid"));

/// Zero-width and BOM characters trimmed from both display forms.
const ZERO_WIDTH_TRIM: &[char] = &[' ', '\u{200b}', '\u{2060}', '\u{feff}'];

/// Quote and bracket characters additionally trimmed from the lexical
/// display form and the frequency lookup key.
const QUOTE_BRACKET_TRIM: &[char] = &[
    ' ', '"', '\'', '\u{201c}', '\u{201d}', '\u{2018}', '\u{2019}', '\u{ab}', '\u{bb}', '[', ']',
    '(', ')', '{', '}', '\u{200b}', '\u{2060}', '\u{feff}',
];

/// Canonicalizes a dictionary text field into its display form.
///
/// Steps, in order: unwrap wiki links (piped before bare), strip diacritics,
/// drop zero-width joiner and BOM characters, collapse whitespace runs to a
/// single space, trim surrounding whitespace plus zero-width and
/// quote/bracket characters.
///
/// Returns `None` for `None` input; idempotent on its own output.
///
/// # Examples
///
/// ```
/// use lexport_core::normalize::clean_text;
///
/// assert_eq!(clean_text(Some("a [[cat|kitten]] sat")).as_deref(), Some("a kitten sat"));
/// assert_eq!(clean_text(Some("café")).as_deref(), Some("cafe"));
/// ```
#[must_use]
pub fn clean_text(text: Option<&str>) -> Option<String> {
    let text = text?;
    let unwrapped = unwrap_links(text);
    let cleaned = normalize_base(&unwrapped);
    Some(cleaned.trim_matches(QUOTE_BRACKET_TRIM).to_string())
}

/// Canonicalizes a phrase field into its display form.
///
/// Intentionally narrower than [`clean_text`]: no wiki-link unwrapping and
/// only whitespace plus zero-width/BOM characters are trimmed, so quotes and
/// brackets inside phrases survive.
#[must_use]
pub fn clean_phrase(text: Option<&str>) -> Option<String> {
    let text = text?;
    let cleaned = normalize_base(text);
    Some(cleaned.trim_matches(ZERO_WIDTH_TRIM).to_string())
}

/// Builds the lookup key used against the frequency reference table.
///
/// Distinct from the display forms: lowercased, diacritics stripped,
/// apostrophe variants unified, whitespace collapsed, quote/bracket
/// characters trimmed. Never unwraps wiki links.
#[must_use]
pub fn freq_key(text: &str) -> String {
    let stripped = strip_diacritics(text);
    let lowered = stripped.to_lowercase().replace('\u{2019}', "'");
    collapse_whitespace(&lowered)
        .trim_matches(QUOTE_BRACKET_TRIM)
        .to_string()
}

/// True when the string contains at least one Latin or Cyrillic letter.
///
/// Used to reject translations that are pure punctuation or digits after
/// cleaning.
#[must_use]
pub fn contains_letter(text: &str) -> bool {
    text.chars()
        .any(|c| matches!(c, 'A'..='Z' | 'a'..='z' | 'А'..='я' | 'Ё' | 'ё'))
}

/// Replaces `[[target|display]]` with `display`, then `[[target]]` with
/// `target`.
fn unwrap_links(text: &str) -> String {
    let piped = WIKI_LINK_PIPE_PATTERN.replace_all(text, |caps: &Captures<'_>| caps[2].to_string());
    WIKI_LINK_PATTERN
        .replace_all(&piped, |caps: &Captures<'_>| caps[1].to_string())
        .into_owned()
}

/// Shared middle of both display forms: diacritic stripping, zero-width
/// removal, whitespace collapsing.
fn normalize_base(text: &str) -> String {
    let stripped = strip_diacritics(text);
    let without_invisibles: String = stripped
        .chars()
        .filter(|c| !matches!(c, '\u{200d}' | '\u{feff}'))
        .collect();
    collapse_whitespace(&without_invisibles)
}

/// Decomposes to NFD, drops combining marks, recomposes to NFC.
///
/// Preserves Latin and Cyrillic base letters; accented Latin letters lose
/// their accents.
fn strip_diacritics(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).nfc().collect()
}

/// Collapses any whitespace run (newlines and tabs included) to one ASCII
/// space and drops leading/trailing whitespace.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // ==================== Wiki link unwrapping ====================

    #[test]
    fn test_clean_text_unwraps_piped_link_to_display() {
        assert_eq!(
            clean_text(Some("a [[cat|kitten]] sat")).as_deref(),
            Some("a kitten sat")
        );
    }

    #[test]
    fn test_clean_text_unwraps_bare_link_to_target() {
        assert_eq!(
            clean_text(Some("a [[dog]] ran")).as_deref(),
            Some("a dog ran")
        );
    }

    #[test]
    fn test_clean_text_piped_link_takes_precedence_over_bare() {
        // A piped link must not be half-processed by the bare pattern.
        assert_eq!(
            clean_text(Some("[[бег|бегать]]")).as_deref(),
            Some("бегать")
        );
    }

    #[test]
    fn test_clean_text_unwraps_mixed_links_in_one_string() {
        assert_eq!(
            clean_text(Some("[[a|b]] and [[c]]")).as_deref(),
            Some("b and c")
        );
    }

    // ==================== Diacritics ====================

    #[test]
    fn test_clean_text_strips_latin_diacritics() {
        assert_eq!(clean_text(Some("café")).as_deref(), Some("cafe"));
        assert_eq!(clean_text(Some("naïve résumé")).as_deref(), Some("naive resume"));
    }

    #[test]
    fn test_clean_text_preserves_cyrillic_letters() {
        assert_eq!(clean_text(Some("бежать")).as_deref(), Some("бежать"));
    }

    #[test]
    fn test_clean_text_strips_decomposed_diacritics() {
        // "e" + U+0301 combining acute
        assert_eq!(clean_text(Some("cafe\u{301}")).as_deref(), Some("cafe"));
    }

    // ==================== Whitespace and invisibles ====================

    #[test]
    fn test_clean_text_collapses_whitespace_runs() {
        assert_eq!(
            clean_text(Some("a\t b\n\nc")).as_deref(),
            Some("a b c")
        );
    }

    #[test]
    fn test_clean_text_removes_zero_width_joiner_and_bom() {
        assert_eq!(
            clean_text(Some("a\u{200d}b\u{feff}c")).as_deref(),
            Some("abc")
        );
    }

    #[test]
    fn test_clean_text_trims_quotes_and_brackets() {
        assert_eq!(clean_text(Some("\"word\"")).as_deref(), Some("word"));
        assert_eq!(clean_text(Some("«слово»")).as_deref(), Some("слово"));
        assert_eq!(clean_text(Some("(word)")).as_deref(), Some("word"));
    }

    #[test]
    fn test_clean_text_none_passes_through() {
        assert_eq!(clean_text(None), None);
    }

    #[test]
    fn test_clean_text_is_idempotent() {
        let inputs = ["a [[cat|kitten]] sat", "  café  ", "\"бежать\"", "a\tb"];
        for input in inputs {
            let once = clean_text(Some(input)).unwrap();
            let twice = clean_text(Some(&once)).unwrap();
            assert_eq!(once, twice, "clean_text must be idempotent for {input:?}");
        }
    }

    // ==================== Phrase form ====================

    #[test]
    fn test_clean_phrase_keeps_quotes_and_brackets() {
        // The phrase form intentionally trims only whitespace and
        // zero-width characters.
        assert_eq!(
            clean_phrase(Some("\"how are you?\"")).as_deref(),
            Some("\"how are you?\"")
        );
    }

    #[test]
    fn test_clean_phrase_does_not_unwrap_links() {
        assert_eq!(
            clean_phrase(Some("[[literal]]")).as_deref(),
            Some("[[literal]]")
        );
    }

    #[test]
    fn test_clean_phrase_strips_diacritics_and_collapses_whitespace() {
        assert_eq!(
            clean_phrase(Some("  déjà \t vu ")).as_deref(),
            Some("deja vu")
        );
    }

    #[test]
    fn test_clean_phrase_trims_zero_width_characters() {
        assert_eq!(
            clean_phrase(Some("\u{200b}hello\u{2060}")).as_deref(),
            Some("hello")
        );
    }

    #[test]
    fn test_clean_phrase_is_idempotent() {
        let once = clean_phrase(Some("  \"déjà  vu\" ")).unwrap();
        let twice = clean_phrase(Some(&once)).unwrap();
        assert_eq!(once, twice);
    }

    // ==================== Frequency lookup key ====================

    #[test]
    fn test_freq_key_lowercases_and_strips_diacritics() {
        assert_eq!(freq_key("Café"), "cafe");
    }

    #[test]
    fn test_freq_key_unifies_apostrophe_variants() {
        assert_eq!(freq_key("don\u{2019}t"), "don't");
    }

    #[test]
    fn test_freq_key_trims_quotes_and_collapses_whitespace() {
        assert_eq!(freq_key("\"New  York\""), "new york");
        assert_eq!(freq_key("«Москва»"), "москва");
    }

    #[test]
    fn test_freq_key_does_not_unwrap_links() {
        // The key form never touches markup; the surrounding brackets are
        // trimmed but the pipe body stays intact.
        assert_eq!(freq_key("[[a|b]]"), "a|b");
    }

    // ==================== Letter guard ====================

    #[test]
    fn test_contains_letter_accepts_latin_and_cyrillic() {
        assert!(contains_letter("word"));
        assert!(contains_letter("слово"));
        assert!(contains_letter("ёлка"));
        assert!(contains_letter("12 дней"));
    }

    #[test]
    fn test_contains_letter_rejects_punctuation_and_digits() {
        assert!(!contains_letter("123"));
        assert!(!contains_letter("--?!"));
        assert!(!contains_letter(""));
    }
}
