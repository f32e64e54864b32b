use std::env;

use serde::{Deserialize, Serialize};

fn default_api_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ProviderConfig {
    /// Gemini API key. Empty means the provider is unusable; the app treats
    /// that as fatal at startup.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_model")]
    pub model: String,
}

impl ProviderConfig {
    pub fn from_env() -> Self {
        // Plain API_KEY is accepted as a fallback for older setups.
        let api_key = env::var("GEMINI_API_KEY")
            .or_else(|_| env::var("API_KEY"))
            .unwrap_or_default();

        let api_url = env::var("GEMINI_API_URL").unwrap_or_else(|_| default_api_url());
        let model = env::var("GEMINI_MODEL").unwrap_or_else(|_| default_model());

        Self {
            api_key,
            api_url,
            model,
        }
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: default_api_url(),
            model: default_model(),
        }
    }
}
