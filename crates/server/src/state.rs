use std::path::PathBuf;
use std::sync::Arc;

use precis_core::Config;
use precis_llm::{LlmError, LlmProvider, OllamaProvider};
use precis_summarize::{Pipeline, Summarizer};

pub struct AppState {
    pub pipeline: Pipeline,
    /// Used to report which models the Ollama server has installed.
    pub ollama: Option<Arc<OllamaProvider>>,
    /// Model used when an upload does not pick one.
    pub default_model: String,
    pub upload_dir: PathBuf,
    pub output_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self, LlmError> {
        let ollama = Arc::new(OllamaProvider::from_config(&config.ollama)?);
        let provider: Arc<dyn LlmProvider> = ollama.clone();
        let summarizer = Summarizer::from_config(provider, config);

        Ok(Self {
            pipeline: Pipeline::new(summarizer, config.summary.wrap_width),
            ollama: Some(ollama),
            default_model: config.ollama.model.clone(),
            upload_dir: config.server.upload_dir.clone(),
            output_dir: config.server.output_dir.clone(),
            max_upload_bytes: config.server.max_upload_mb * 1024 * 1024,
        })
    }
}
