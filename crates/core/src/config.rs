use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_parse<T: std::str::FromStr>(profile: &str, key: &str, default: T) -> T {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Models offered to the user by the front-ends.
pub const SUPPORTED_MODELS: &[&str] = &["mistral:7b", "llama2:7b", "llama3:8b", "phi3:14b"];

/// Model used when the caller does not pick one.
pub const DEFAULT_MODEL: &str = "mistral:7b";

/// Port Ollama listens on when only a hostname is configured.
pub const DEFAULT_OLLAMA_PORT: u16 = 11434;

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub ollama: OllamaConfig,
    pub chunking: ChunkingConfig,
    pub summary: SummaryConfig,
    pub server: ServerConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `PRECIS_PROFILE` env var. When set (e.g. `GPU`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("PRECIS_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            ollama: OllamaConfig::from_env_profiled(p),
            chunking: ChunkingConfig::from_env_profiled(p),
            summary: SummaryConfig::from_env_profiled(p),
            server: ServerConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  ollama:    host={}, model={}, temperature={}, num_ctx={}",
            self.ollama.host,
            self.ollama.model,
            self.ollama.temperature,
            self.ollama.num_ctx
        );
        tracing::info!(
            "  chunking:  size={}, overlap={}",
            self.chunking.chunk_size,
            self.chunking.chunk_overlap
        );
        tracing::info!(
            "  summary:   rate={}, map_percent={}, combine_max_chars={}, concurrency={}",
            self.summary.compression_rate,
            self.summary.map_percent,
            self.summary.combine_max_chars,
            self.summary.map_concurrency
        );
        tracing::info!(
            "  server:    {}:{}, uploads={}, outputs={}",
            self.server.host,
            self.server.port,
            self.server.upload_dir.display(),
            self.server.output_dir.display()
        );
    }
}

// ── Ollama ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Hostname or full base URL. A bare hostname gets `http://` and port 11434.
    pub host: String,
    pub model: String,
    pub temperature: f32,
    /// Context window passed to the model as `num_ctx`.
    pub num_ctx: u32,
    pub timeout_secs: u64,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.1,
            num_ctx: 5000,
            timeout_secs: 600,
        }
    }
}

impl OllamaConfig {
    fn from_env_profiled(p: &str) -> Self {
        let d = Self::default();
        Self {
            host: profiled_env_or(p, "OLLAMA_HOST", &d.host),
            model: profiled_env_or(p, "OLLAMA_MODEL", &d.model),
            temperature: profiled_env_parse(p, "OLLAMA_TEMPERATURE", d.temperature),
            num_ctx: profiled_env_parse(p, "OLLAMA_NUM_CTX", d.num_ctx),
            timeout_secs: profiled_env_parse(p, "OLLAMA_TIMEOUT_SECS", d.timeout_secs),
        }
    }

    /// Resolve `host` into a base URL.
    ///
    /// `gpu-box` becomes `http://gpu-box:11434`; anything already starting with
    /// `http` is used as-is (minus a trailing slash).
    pub fn base_url(&self) -> String {
        resolve_base_url(&self.host)
    }
}

pub fn resolve_base_url(host: &str) -> String {
    let host = host.trim();
    if host.starts_with("http") {
        host.trim_end_matches('/').to_string()
    } else {
        format!("http://{}:{}", host, DEFAULT_OLLAMA_PORT)
    }
}

// ── Chunking ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Maximum characters per chunk.
    pub chunk_size: usize,
    /// Characters carried over from the end of one chunk into the next.
    pub chunk_overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 3000,
            chunk_overlap: 300,
        }
    }
}

impl ChunkingConfig {
    fn from_env_profiled(p: &str) -> Self {
        let d = Self::default();
        Self {
            chunk_size: profiled_env_parse(p, "CHUNK_SIZE", d.chunk_size),
            chunk_overlap: profiled_env_parse(p, "CHUNK_OVERLAP", d.chunk_overlap),
        }
    }
}

// ── Summary ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// Default target length as a fraction of the source.
    pub compression_rate: f64,
    /// Target percentage given to every per-chunk (map) request.
    pub map_percent: u32,
    /// Largest joined input a single combine request may receive.
    pub combine_max_chars: usize,
    /// Map requests in flight at once (1 = sequential).
    pub map_concurrency: usize,
    /// Column width for the formatted summary.
    pub wrap_width: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            compression_rate: 0.3,
            map_percent: 30,
            combine_max_chars: 12_000,
            map_concurrency: 1,
            wrap_width: 80,
        }
    }
}

impl SummaryConfig {
    fn from_env_profiled(p: &str) -> Self {
        let d = Self::default();
        Self {
            compression_rate: profiled_env_parse(p, "COMPRESSION_RATE", d.compression_rate),
            map_percent: profiled_env_parse(p, "MAP_PERCENT", d.map_percent),
            combine_max_chars: profiled_env_parse(p, "COMBINE_MAX_CHARS", d.combine_max_chars),
            map_concurrency: profiled_env_parse(p, "MAP_CONCURRENCY", d.map_concurrency).max(1),
            wrap_width: profiled_env_parse(p, "WRAP_WIDTH", d.wrap_width),
        }
    }
}

// ── Server ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
    pub upload_dir: PathBuf,
    pub output_dir: PathBuf,
    pub max_upload_mb: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8501,
            cors_origin: "*".to_string(),
            upload_dir: PathBuf::from("uploads"),
            output_dir: PathBuf::from("outputs"),
            max_upload_mb: 50,
        }
    }
}

impl ServerConfig {
    fn from_env_profiled(p: &str) -> Self {
        let d = Self::default();
        Self {
            host: profiled_env_or(p, "HOST", &d.host),
            port: profiled_env_parse(p, "PORT", d.port),
            cors_origin: profiled_env_or(p, "CORS_ORIGIN", &d.cors_origin),
            upload_dir: profiled_env_opt(p, "UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(d.upload_dir),
            output_dir: profiled_env_opt(p, "OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(d.output_dir),
            max_upload_mb: profiled_env_parse(p, "MAX_UPLOAD_MB", d.max_upload_mb),
        }
    }
}
