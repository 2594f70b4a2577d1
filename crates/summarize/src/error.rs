use std::path::PathBuf;

use precis_core::CoreError;
use precis_ingest::ExtractionError;
use precis_llm::LlmError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("document contains no text to summarize")]
    EmptyDocument,
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] CoreError),
    #[error("inference failed: {0}")]
    Inference(#[from] LlmError),
}

/// Reading or writing a summary file failed.
#[derive(Debug, Error)]
#[error("I/O error on {}: {source}", path.display())]
pub struct PersistError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error(transparent)]
    Summarize(#[from] SummarizeError),
    #[error(transparent)]
    Persist(#[from] PersistError),
    #[error("failed to create inference client: {0}")]
    Provider(#[from] LlmError),
}
