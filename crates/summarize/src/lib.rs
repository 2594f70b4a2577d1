pub mod error;
pub mod format;
pub mod persist;
pub mod pipeline;
pub mod prompts;
pub mod summarizer;

pub use error::{PersistError, PipelineError, SummarizeError};
pub use format::format_summary;
pub use persist::{load_summary, save_summary};
pub use pipeline::{Pipeline, SummaryReport};
pub use summarizer::{Strategy, Summarizer, Summary, SummaryOutcome, SummarySettings};
