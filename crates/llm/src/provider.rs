use async_trait::async_trait;
use precis_core::config::OllamaConfig;
use serde::{Deserialize, Serialize};

/// Generation parameters sent with every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelOptions {
    pub model: String,
    pub temperature: f32,
    /// Context window size in tokens.
    pub num_ctx: u32,
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self::from(&OllamaConfig::default())
    }
}

impl From<&OllamaConfig> for ModelOptions {
    fn from(config: &OllamaConfig) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
            num_ctx: config.num_ctx,
        }
    }
}

impl ModelOptions {
    /// Same options with a different model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// Trait for text-generation backends.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send one prompt and return the generated text.
    async fn generate(&self, prompt: &str, options: &ModelOptions) -> Result<String, LlmError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("API error: {status}: {body}")]
    ApiError { status: u16, body: String },
    #[error("failed to parse response: {0}")]
    ParseError(String),
    #[error("model '{model}' returned an empty response")]
    EmptyResponse { model: String },
}
