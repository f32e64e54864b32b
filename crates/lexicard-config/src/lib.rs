use std::env;

use lexicard_types::Language;
use serde::{Deserialize, Serialize};

use self::provider::ProviderConfig;
use self::quiz::QuizConfig;
use self::storage::StorageConfig;

pub mod provider;
pub mod quiz;
pub mod storage;

#[derive(Serialize, Deserialize)]
pub struct Config {
    pub provider: ProviderConfig,
    pub storage: StorageConfig,
    pub quiz: QuizConfig,

    /// Target language used until a stored preference is loaded.
    pub default_language: Language,
}

impl Config {
    pub fn from_env() -> Self {
        let default_language = env::var("LEXICARD_LANGUAGE")
            .ok()
            .and_then(|v| Language::from_code(&v))
            .unwrap_or(Language::Spanish);

        Config {
            provider: ProviderConfig::from_env(),
            storage: StorageConfig::from_env(),
            quiz: QuizConfig::from_env(),
            default_language,
        }
    }
}
