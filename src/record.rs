//! Emitted record types shared by both pipelines.

use std::fmt;

use serde::Serialize;

/// Fixed language-pair tag carried by every emitted record.
pub const LANGUAGE_PAIR: &str = "en-ru";

/// Fixed confidence value carried by phrase records.
pub const PHRASE_CONFIDENCE: u8 = 95;

/// Part-of-speech classes accepted from the dictionary source.
///
/// Entries tagged outside this set are discarded by the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
    ProperNoun,
}

impl PartOfSpeech {
    /// Parses the short tag used in the TEI source (`n`, `v`, `adj`, `adv`,
    /// `pn`). Any other tag is outside the allowed set.
    #[must_use]
    pub fn from_short_tag(tag: &str) -> Option<Self> {
        match tag {
            "n" => Some(Self::Noun),
            "v" => Some(Self::Verb),
            "adj" => Some(Self::Adjective),
            "adv" => Some(Self::Adverb),
            "pn" => Some(Self::ProperNoun),
            _ => None,
        }
    }

    /// The full snake_case name as it appears in output records.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Noun => "noun",
            Self::Verb => "verb",
            Self::Adjective => "adjective",
            Self::Adverb => "adverb",
            Self::ProperNoun => "proper_noun",
        }
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One dictionary record: a (headword, translation) pairing.
#[derive(Debug, Clone, Serialize)]
pub struct LexicalRecord {
    pub id: u64,
    pub source_word: String,
    pub target_word: String,
    pub language_pair: &'static str,
    pub part_of_speech: PartOfSpeech,
    pub definition: Option<String>,
    pub frequency: u8,
    pub created_at: u64,
    pub updated_at: u64,
}

/// One phrase-pair record.
#[derive(Debug, Clone, Serialize)]
pub struct PhraseRecord {
    pub id: u64,
    pub source_phrase: String,
    pub target_phrase: String,
    pub language_pair: &'static str,
    pub frequency: u8,
    pub confidence: u8,
    pub created_at: u64,
    pub updated_at: u64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_part_of_speech_from_short_tag() {
        assert_eq!(PartOfSpeech::from_short_tag("n"), Some(PartOfSpeech::Noun));
        assert_eq!(PartOfSpeech::from_short_tag("v"), Some(PartOfSpeech::Verb));
        assert_eq!(
            PartOfSpeech::from_short_tag("adj"),
            Some(PartOfSpeech::Adjective)
        );
        assert_eq!(
            PartOfSpeech::from_short_tag("adv"),
            Some(PartOfSpeech::Adverb)
        );
        assert_eq!(
            PartOfSpeech::from_short_tag("pn"),
            Some(PartOfSpeech::ProperNoun)
        );
    }

    #[test]
    fn test_part_of_speech_rejects_disallowed_tags() {
        assert_eq!(PartOfSpeech::from_short_tag("suffix"), None);
        assert_eq!(PartOfSpeech::from_short_tag("noun"), None);
        assert_eq!(PartOfSpeech::from_short_tag(""), None);
    }

    #[test]
    fn test_part_of_speech_serializes_as_snake_case() {
        let json = serde_json::to_string(&PartOfSpeech::ProperNoun).unwrap();
        assert_eq!(json, "\"proper_noun\"");
    }

    #[test]
    fn test_lexical_record_serializes_all_fields() {
        let record = LexicalRecord {
            id: 1,
            source_word: "run".to_string(),
            target_word: "бежать".to_string(),
            language_pair: LANGUAGE_PAIR,
            part_of_speech: PartOfSpeech::Verb,
            definition: None,
            frequency: 20,
            created_at: 1700000000000,
            updated_at: 1700000000000,
        };

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"source_word\":\"run\""));
        assert!(json.contains("\"target_word\":\"бежать\""));
        assert!(json.contains("\"part_of_speech\":\"verb\""));
        assert!(json.contains("\"definition\":null"));
        assert!(json.contains("\"language_pair\":\"en-ru\""));
    }

    #[test]
    fn test_phrase_record_serializes_confidence() {
        let record = PhraseRecord {
            id: 2,
            source_phrase: "good morning".to_string(),
            target_phrase: "доброе утро".to_string(),
            language_pair: LANGUAGE_PAIR,
            frequency: 50,
            confidence: PHRASE_CONFIDENCE,
            created_at: 0,
            updated_at: 0,
        };

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"confidence\":95"));
        assert!(!json.contains("part_of_speech"));
    }
}
