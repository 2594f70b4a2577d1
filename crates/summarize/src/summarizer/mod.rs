mod reduce;


use std::sync::Arc;
use std::time::Instant;

use futures::{stream, StreamExt, TryStreamExt};
use precis_core::config::{Config, SummaryConfig};
use precis_core::CompressionRate;
use precis_ingest::{normalize, split_text, ChunkConfig};
use precis_llm::{LlmError, LlmProvider, ModelOptions};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::SummarizeError;
use crate::prompts;

pub use reduce::plan_batches;

/// Knobs of the map and combine stages.
#[derive(Debug, Clone, PartialEq)]
pub struct SummarySettings {
    /// Target percentage given to every map request.
    pub map_percent: u32,
    /// Largest joined input (in characters) a combine request receives, unless
    /// it combines only two summaries.
    pub combine_max_chars: usize,
    /// Requests in flight at once within a stage.
    pub map_concurrency: usize,
}

impl Default for SummarySettings {
    fn default() -> Self {
        Self::from(&SummaryConfig::default())
    }
}

impl From<&SummaryConfig> for SummarySettings {
    fn from(config: &SummaryConfig) -> Self {
        Self {
            map_percent: config.map_percent,
            combine_max_chars: config.combine_max_chars,
            map_concurrency: config.map_concurrency.max(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// The whole document fit in one chunk: one request, no combine.
    SingleChunk,
    MapReduce,
}

/// How a summary was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryOutcome {
    pub strategy: Strategy,
    pub chunks: usize,
    /// Combine levels run, including the final one. 0 on the single-chunk path.
    pub combine_rounds: usize,
}

#[derive(Debug, Clone)]
pub struct Summary {
    /// Raw model output, before formatting.
    pub text: String,
    pub outcome: SummaryOutcome,
}

/// Map-reduce summarizer over an inference provider.
///
/// Configuration is fixed at construction; one instance can serve any number
/// of concurrent `summarize` calls.
#[derive(Clone)]
pub struct Summarizer {
    provider: Arc<dyn LlmProvider>,
    options: ModelOptions,
    chunking: ChunkConfig,
    settings: SummarySettings,
}

impl Summarizer {
    pub fn new(provider: Arc<dyn LlmProvider>, options: ModelOptions) -> Self {
        Self {
            provider,
            options,
            chunking: ChunkConfig::default(),
            settings: SummarySettings::default(),
        }
    }

    pub fn from_config(provider: Arc<dyn LlmProvider>, config: &Config) -> Self {
        Self {
            provider,
            options: ModelOptions::from(&config.ollama),
            chunking: ChunkConfig::from(&config.chunking),
            settings: SummarySettings::from(&config.summary),
        }
    }

    pub fn with_chunking(mut self, chunking: ChunkConfig) -> Self {
        self.chunking = chunking;
        self
    }

    pub fn with_settings(mut self, settings: SummarySettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.options = self.options.with_model(model);
        self
    }

    pub fn options(&self) -> &ModelOptions {
        &self.options
    }

    /// Summarize a document's raw text to roughly `rate` of its length.
    ///
    /// Any inference failure aborts the whole run; partial summaries are
    /// discarded.
    pub async fn summarize(
        &self,
        text: &str,
        rate: CompressionRate,
    ) -> Result<Summary, SummarizeError> {
        self.chunking.validate()?;

        let normalized = normalize(text);
        if normalized.is_empty() {
            return Err(SummarizeError::EmptyDocument);
        }

        let chunks = split_text(&normalized, &self.chunking);
        info!("Text split into {} chunks", chunks.len());

        if let [only] = chunks.as_slice() {
            info!("Single chunk detected, summarizing directly at {}", rate);
            let prompt = prompts::single_chunk_prompt(&only.content, rate.percent());
            let text = self.provider.generate(&prompt, &self.options).await?;
            return Ok(Summary {
                text,
                outcome: SummaryOutcome {
                    strategy: Strategy::SingleChunk,
                    chunks: 1,
                    combine_rounds: 0,
                },
            });
        }

        info!(
            "Starting map-reduce over {} chunks (model={}, concurrency={})",
            chunks.len(),
            self.options.model,
            self.settings.map_concurrency
        );
        let start = Instant::now();

        let map_prompts: Vec<String> = chunks
            .iter()
            .map(|c| prompts::map_prompt(&c.content, self.settings.map_percent))
            .collect();
        let partials = self.run_all(map_prompts).await?;
        debug!("Map stage produced {} partial summaries", partials.len());

        let (text, combine_rounds) = self.reduce(partials, rate).await?;

        info!(
            "Summarization completed in {:.2} seconds",
            start.elapsed().as_secs_f64()
        );

        Ok(Summary {
            text,
            outcome: SummaryOutcome {
                strategy: Strategy::MapReduce,
                chunks: chunks.len(),
                combine_rounds,
            },
        })
    }

    /// Combine partial summaries, level by level, until one request can take
    /// them all.
    ///
    /// Two summaries are always combined in one final request, even when
    /// together they exceed `combine_max_chars`.
    async fn reduce(
        &self,
        mut summaries: Vec<String>,
        rate: CompressionRate,
    ) -> Result<(String, usize), SummarizeError> {
        let percent = rate.percent();
        let max_chars = self.settings.combine_max_chars;
        let mut rounds = 0;

        while summaries.len() > 2 && reduce::joined_len(&summaries) > max_chars {
            rounds += 1;
            let batches = plan_batches(summaries, max_chars);
            info!("Combine round {}: {} batches", rounds, batches.len());

            // Lone batches pass through; the rest become combine requests.
            let mut pending = Vec::new();
            let mut slots = Vec::with_capacity(batches.len());
            for mut batch in batches {
                match batch.len() {
                    1 => slots.push(batch.pop()),
                    _ => {
                        pending.push(prompts::combine_prompt(&batch, percent));
                        slots.push(None);
                    }
                }
            }

            let mut combined = self.run_all(pending).await?.into_iter();
            summaries = slots
                .into_iter()
                .filter_map(|slot| slot.or_else(|| combined.next()))
                .collect();
        }

        rounds += 1;
        info!("Combining {} summaries (round {})", summaries.len(), rounds);
        let prompt = prompts::combine_prompt(&summaries, percent);
        let text = self.provider.generate(&prompt, &self.options).await?;
        Ok((text, rounds))
    }

    /// Send prompts with bounded concurrency, returning replies in prompt order.
    async fn run_all(&self, prompts: Vec<String>) -> Result<Vec<String>, LlmError> {
        let concurrency = self.settings.map_concurrency.max(1);
        stream::iter(prompts)
            .map(|prompt| {
                let provider = Arc::clone(&self.provider);
                let options = self.options.clone();
                async move { provider.generate(&prompt, &options).await }
            })
            .buffered(concurrency)
            .try_collect()
            .await
    }
}
