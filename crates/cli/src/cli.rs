use std::path::{Path, PathBuf};

use clap::Parser;
use precis_core::Config;

/// Summarize a book or document with a local Ollama model.
///
/// Flags override the environment (read through `Config::from_env`, so
/// `PRECIS_PROFILE` applies), which overrides built-in defaults.
#[derive(Parser, Debug)]
#[command(name = "precis", version, about = "Summarize documents with a local LLM")]
pub struct CliArgs {
    /// Document to summarize (.pdf, anything else is read as text)
    pub input: PathBuf,

    /// Where to write the summary (default: <output dir>/summary_<input name>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Target summary length as a fraction of the source, between 0 and 1
    #[arg(long)]
    pub rate: Option<f64>,

    /// Ollama model name
    #[arg(long)]
    pub model: Option<String>,

    /// Ollama host name or base URL
    #[arg(long)]
    pub host: Option<String>,

    /// Column width of the formatted summary
    #[arg(long)]
    pub width: Option<usize>,

    /// Maximum characters per chunk
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Characters shared between consecutive chunks
    #[arg(long)]
    pub chunk_overlap: Option<usize>,

    /// Per-chunk requests sent to the model at once
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Also print the summary to stdout
    #[arg(long)]
    pub print: bool,
}

impl CliArgs {
    /// Overlay the flags that were given onto `config`.
    pub fn apply(&self, config: &mut Config) {
        if let Some(rate) = self.rate {
            config.summary.compression_rate = rate;
        }
        if let Some(ref model) = self.model {
            config.ollama.model = model.clone();
        }
        if let Some(ref host) = self.host {
            config.ollama.host = host.clone();
        }
        if let Some(width) = self.width {
            config.summary.wrap_width = width;
        }
        if let Some(size) = self.chunk_size {
            config.chunking.chunk_size = size;
        }
        if let Some(overlap) = self.chunk_overlap {
            config.chunking.chunk_overlap = overlap;
        }
        if let Some(n) = self.concurrency {
            config.summary.map_concurrency = n.max(1);
        }
    }

    pub fn output_path(&self, output_dir: &Path) -> PathBuf {
        match self.output {
            Some(ref path) => path.clone(),
            None => {
                let name = self
                    .input
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "document".to_string());
                output_dir.join(format!("summary_{}", name))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let args = CliArgs::try_parse_from([
            "precis",
            "book.pdf",
            "--rate",
            "0.6",
            "--model",
            "llama3:8b",
            "--chunk-size",
            "2000",
            "--concurrency",
            "0",
        ])
        .unwrap();

        let mut config = Config::default();
        args.apply(&mut config);
        assert!((config.summary.compression_rate - 0.6).abs() < f64::EPSILON);
        assert_eq!(config.ollama.model, "llama3:8b");
        assert_eq!(config.chunking.chunk_size, 2000);
        assert_eq!(config.chunking.chunk_overlap, 300);
        assert_eq!(config.summary.map_concurrency, 1);
    }

    #[test]
    fn profiled_environment_survives_when_no_flags_are_given() {
        std::env::set_var("PRECIS_PROFILE", "GPU");
        std::env::set_var("GPU_COMPRESSION_RATE", "0.5");
        std::env::set_var("COMPRESSION_RATE", "0.2");
        std::env::set_var("GPU_OLLAMA_MODEL", "phi3:14b");
        std::env::set_var("OLLAMA_MODEL", "llama2:7b");

        let mut config = Config::from_env();
        CliArgs::try_parse_from(["precis", "book.txt"])
            .unwrap()
            .apply(&mut config);
        assert_eq!(config.profile_label(), "GPU");
        assert_eq!(config.ollama.model, "phi3:14b");
        assert!((config.summary.compression_rate - 0.5).abs() < f64::EPSILON);

        let mut config = Config::from_env();
        CliArgs::try_parse_from(["precis", "book.txt", "--model", "llama3:8b"])
            .unwrap()
            .apply(&mut config);
        assert_eq!(config.ollama.model, "llama3:8b");
        assert!((config.summary.compression_rate - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn default_output_goes_to_output_dir() {
        let args = CliArgs::try_parse_from(["precis", "books/war_and_peace.txt"]).unwrap();
        assert_eq!(
            args.output_path(Path::new("outputs")),
            PathBuf::from("outputs/summary_war_and_peace.txt")
        );

        let args = CliArgs::try_parse_from(["precis", "a.txt", "-o", "out.txt"]).unwrap();
        assert_eq!(args.output_path(Path::new("outputs")), PathBuf::from("out.txt"));
    }
}
