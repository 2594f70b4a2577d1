use std::time::Duration;

use async_trait::async_trait;
use precis_core::config::OllamaConfig;
use serde_json::json;
use tracing::debug;

use crate::provider::{LlmError, LlmProvider, ModelOptions};

pub struct OllamaProvider {
    client: reqwest::Client,
    url: String,
}

impl OllamaProvider {
    /// `url` is the resolved base URL, e.g. `http://localhost:11434`.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn from_config(config: &OllamaConfig) -> Result<Self, LlmError> {
        Self::new(config.base_url(), Duration::from_secs(config.timeout_secs))
    }

    pub fn base_url(&self) -> &str {
        &self.url
    }

    /// Names of the models installed on the server (`/api/tags`).
    pub async fn list_models(&self) -> Result<Vec<String>, LlmError> {
        let url = format!("{}/api/tags", self.url);
        debug!("Ollama request to {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::ApiError { status, body });
        }

        let resp: serde_json::Value = response
            .json()
            .await
            .map_err(|e| LlmError::ParseError(e.to_string()))?;
        let models = resp["models"]
            .as_array()
            .ok_or_else(|| LlmError::ParseError("missing models".into()))?
            .iter()
            .filter_map(|m| m["name"].as_str().map(str::to_string))
            .collect();

        Ok(models)
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    async fn generate(&self, prompt: &str, options: &ModelOptions) -> Result<String, LlmError> {
        let url = format!("{}/api/generate", self.url);

        let body = json!({
            "model": options.model,
            "prompt": prompt,
            "stream": false,
            "options": {
                "temperature": options.temperature,
                "num_ctx": options.num_ctx,
            },
        });

        debug!(
            "Ollama request to {} (model={}, prompt_chars={})",
            url,
            options.model,
            prompt.chars().count()
        );

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::ApiError { status, body });
        }

        let resp: serde_json::Value = response
            .json()
            .await
            .map_err(|e| LlmError::ParseError(e.to_string()))?;
        let content = resp["response"]
            .as_str()
            .ok_or_else(|| LlmError::ParseError("missing response".into()))?;

        let content = content.trim();
        if content.is_empty() {
            return Err(LlmError::EmptyResponse {
                model: options.model.clone(),
            });
        }

        Ok(content.to_string())
    }
}
