pub mod ollama;

use std::sync::Arc;

use precis_core::config::OllamaConfig;

use crate::provider::{LlmError, LlmProvider};

/// Create the inference provider described by config.
pub fn create_provider(ollama_config: &OllamaConfig) -> Result<Arc<dyn LlmProvider>, LlmError> {
    let provider = ollama::OllamaProvider::from_config(ollama_config)?;
    Ok(Arc::new(provider))
}
