use async_trait::async_trait;
use lexicard_provider::{DetailProvider, ProviderError, ProviderMetadata};
use lexicard_types::{Language, WordDetails};
use serde_json::json;

use crate::prompt::build_prompt;
use crate::reply::parse_details;

#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: String, api_url: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            api_url,
            model,
        }
    }
}

#[async_trait]
impl DetailProvider for GeminiClient {
    async fn fetch(&self, word: &str, target: Language) -> Result<WordDetails, ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::Authentication);
        }

        let url = format!("{}/models/{}:generateContent", self.api_url, self.model);
        let body = json!({
            "contents": [{ "parts": [{ "text": build_prompt(word, target) }] }],
            "generationConfig": { "responseMimeType": "application/json" }
        });

        tracing::debug!(word, target = %target, "requesting word details");

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        if response.status() == 429 {
            return Err(ProviderError::RateLimitExceeded);
        }

        if response.status() == 401 || response.status() == 403 {
            return Err(ProviderError::Authentication);
        }

        if !response.status().is_success() {
            return Err(ProviderError::Api(format!("HTTP {}", response.status())));
        }

        let reply: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ProviderError::Api(format!("failed to parse response: {e}")))?;

        let text = reply["candidates"]
            .get(0)
            .and_then(|c| c["content"]["parts"].get(0))
            .and_then(|p| p["text"].as_str())
            .ok_or_else(|| ProviderError::Malformed("no text part in reply".to_string()))?;

        parse_details(text)
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Gemini".to_string(),
            requires_api_key: true,
        }
    }
}
