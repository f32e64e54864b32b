use lexicard_types::{Language, WordDetails};

/// Detail provider interface
#[async_trait::async_trait]
pub trait DetailProvider: Send + Sync {
    /// Fetch the detail bundle for one word in one target language.
    async fn fetch(&self, word: &str, target: Language) -> Result<WordDetails, ProviderError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub requires_api_key: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication error: API key missing or rejected")]
    Authentication,
}
