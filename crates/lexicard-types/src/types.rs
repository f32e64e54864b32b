use std::collections::HashMap;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Target language the user is learning translations into.
///
/// Adding a language means adding a variant here and to [`Language::ALL`];
/// nothing in the quiz sequencer changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "Spanish")]
    Spanish,
    #[serde(rename = "Chinese (Mandarin)")]
    ChineseMandarin,
}

impl Language {
    pub const ALL: &'static [Language] = &[Language::Spanish, Language::ChineseMandarin];

    /// Human-readable name, also the persisted form.
    pub fn name(&self) -> &'static str {
        match self {
            Language::Spanish => "Spanish",
            Language::ChineseMandarin => "Chinese (Mandarin)",
        }
    }

    /// Short code used on the command line.
    pub fn code(&self) -> &'static str {
        match self {
            Language::Spanish => "es",
            Language::ChineseMandarin => "zh",
        }
    }

    pub fn from_code(code: &str) -> Option<Language> {
        Language::ALL
            .iter()
            .copied()
            .find(|lang| lang.code().eq_ignore_ascii_case(code))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Detail bundle for one word in one target language.
///
/// Immutable once fetched; only ever replaced wholesale per language key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordDetails {
    pub translation: String,
    pub definition: String,
    /// English example sentence.
    pub example_sentence: String,
    /// Example sentence in the target language, when the provider gave one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_language_example_sentence: Option<String>,
    pub english_pronunciation: String,
    pub target_language_pronunciation: String,
    /// Base64 encoded audio data or URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub english_pronunciation_audio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_language_pronunciation_audio: Option<String>,
}

/// One vocabulary item tracked by the user, keyed by its canonical
/// (English) text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordEntry {
    pub id: String,
    /// Canonical English word; case-insensitively unique within a library.
    pub original_word: String,
    /// Epoch milliseconds.
    pub date_added: u64,
    #[serde(default)]
    pub details_by_language: HashMap<Language, WordDetails>,
}

impl WordEntry {
    pub fn new(original_word: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            original_word: original_word.into(),
            date_added: now_millis(),
            details_by_language: HashMap::new(),
        }
    }

    pub fn details_for(&self, language: Language) -> Option<&WordDetails> {
        self.details_by_language.get(&language)
    }

    /// Replaces the detail bundle for one language, leaving the rest intact.
    pub fn with_details(mut self, language: Language, details: WordDetails) -> Self {
        self.details_by_language.insert(language, details);
        self
    }
}

pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Identity of one quiz run, used to discard stale delayed events after a
/// restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "quiz-{}", self.0)
    }
}

/// The single answerable question the sequencer exposes at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    /// Target-language translation shown to the user.
    pub word_to_guess: String,
    /// Canonical original word the user must type back.
    pub correct_answer: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuizSummary {
    pub score: u32,
    pub answered: u32,
    pub skipped: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_round_trips_through_its_persisted_name() {
        for lang in Language::ALL {
            let json = serde_json::to_string(lang).unwrap();
            assert_eq!(json, format!("\"{}\"", lang.name()));
            let back: Language = serde_json::from_str(&json).unwrap();
            assert_eq!(back, *lang);
        }
    }

    #[test]
    fn language_codes_parse_case_insensitively() {
        assert_eq!(Language::from_code("ES"), Some(Language::Spanish));
        assert_eq!(Language::from_code("zh"), Some(Language::ChineseMandarin));
        assert_eq!(Language::from_code("fr"), None);
    }

    #[test]
    fn word_entry_serializes_with_camel_case_keys() {
        let entry = WordEntry::new("casa");
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("originalWord").is_some());
        assert!(json.get("dateAdded").is_some());
        assert!(json.get("detailsByLanguage").is_some());
    }

    #[test]
    fn details_map_uses_language_names_as_keys() {
        let details = WordDetails {
            translation: "casa".into(),
            definition: "a building for living in".into(),
            example_sentence: "The house is red.".into(),
            target_language_example_sentence: Some("La casa es roja.".into()),
            english_pronunciation: "/haʊs/".into(),
            target_language_pronunciation: "/ˈkasa/".into(),
            english_pronunciation_audio: None,
            target_language_pronunciation_audio: None,
        };
        let entry = WordEntry::new("house").with_details(Language::Spanish, details);
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json["detailsByLanguage"].get("Spanish").is_some());
    }
}
