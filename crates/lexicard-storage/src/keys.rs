use lexicard_types::{Language, WordEntry};

use crate::{KeyValueStore, StorageError};

pub const WORDS_KEY: &str = "wordLearnerLibrary";
pub const LANGUAGE_KEY: &str = "wordLearnerTargetLanguage";

/// Persists the whole library snapshot; there is no incremental diff.
pub async fn save_words(
    store: &dyn KeyValueStore,
    words: &[WordEntry],
) -> Result<(), StorageError> {
    store.set(WORDS_KEY, serde_json::to_value(words)?).await
}

pub async fn load_words(store: &dyn KeyValueStore) -> Result<Vec<WordEntry>, StorageError> {
    match store.get(WORDS_KEY).await? {
        Some(value) => Ok(serde_json::from_value(value)?),
        None => Ok(Vec::new()),
    }
}

pub async fn save_target_language(
    store: &dyn KeyValueStore,
    language: Language,
) -> Result<(), StorageError> {
    store
        .set(LANGUAGE_KEY, serde_json::to_value(language)?)
        .await
}

pub async fn load_target_language(
    store: &dyn KeyValueStore,
) -> Result<Option<Language>, StorageError> {
    match store.get(LANGUAGE_KEY).await? {
        Some(value) => Ok(serde_json::from_value(value)?),
        None => Ok(None),
    }
}
