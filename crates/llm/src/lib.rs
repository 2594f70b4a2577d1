pub mod provider;
pub mod providers;

pub use provider::{LlmError, LlmProvider, ModelOptions};
pub use providers::create_provider;
pub use providers::ollama::OllamaProvider;
