use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use precis_core::{CompressionRate, Config, SummaryStats};
use precis_ingest::read_document;
use precis_llm::{create_provider, LlmProvider};
use serde::Serialize;
use tracing::info;

use crate::error::PipelineError;
use crate::format::format_summary;
use crate::persist::save_summary;
use crate::summarizer::{Summarizer, SummaryOutcome};

/// Result of one end-to-end run.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport {
    pub filename: String,
    /// Formatted summary text.
    pub summary: String,
    pub stats: SummaryStats,
    pub outcome: SummaryOutcome,
    /// Where the summary was written, if anywhere.
    pub output_path: Option<PathBuf>,
    pub elapsed: Duration,
}

/// Read, summarize, format and optionally save one document.
#[derive(Clone)]
pub struct Pipeline {
    summarizer: Summarizer,
    wrap_width: usize,
}

impl Pipeline {
    pub fn new(summarizer: Summarizer, wrap_width: usize) -> Self {
        Self {
            summarizer,
            wrap_width,
        }
    }

    /// Pipeline backed by the Ollama server described in `config`.
    pub fn from_config(config: &Config) -> Result<Self, PipelineError> {
        let provider: Arc<dyn LlmProvider> = create_provider(&config.ollama)?;
        let summarizer = Summarizer::from_config(provider, config);
        Ok(Self::new(summarizer, config.summary.wrap_width))
    }

    /// Same pipeline with a different model.
    pub fn with_model(&self, model: &str) -> Self {
        Self {
            summarizer: self.summarizer.clone().with_model(model),
            wrap_width: self.wrap_width,
        }
    }

    /// Run the whole workflow on `input`.
    ///
    /// `output` is written only once summarization has succeeded.
    pub async fn run(
        &self,
        input: &Path,
        output: Option<&Path>,
        rate: CompressionRate,
    ) -> Result<SummaryReport, PipelineError> {
        info!("Reading document from {}", input.display());
        let document = read_document(input)?;
        let source_words = document.word_count();
        info!("Document length: {} words", source_words);

        info!(
            "Summarizing with model {} at target compression rate of {}",
            self.summarizer.options().model,
            rate
        );
        let start = Instant::now();
        let summary = self.summarizer.summarize(&document.text, rate).await?;
        let formatted = format_summary(&summary.text, self.wrap_width);
        let elapsed = start.elapsed();

        if let Some(path) = output {
            save_summary(&formatted, path)?;
        }

        let stats = SummaryStats::compute(&document.text, &formatted, rate);
        info!(
            "Summary length: {} words, actual compression rate: {:.2}% ({:.2}s)",
            stats.summary_words,
            stats.actual_rate * 100.0,
            elapsed.as_secs_f64()
        );

        Ok(SummaryReport {
            filename: document.filename,
            summary: formatted,
            stats,
            outcome: summary.outcome,
            output_path: output.map(Path::to_path_buf),
            elapsed,
        })
    }
}
