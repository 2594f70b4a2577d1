use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use precis_core::config::SUPPORTED_MODELS;
use serde::Serialize;
use tracing::warn;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
pub struct ModelsResponse {
    /// Models an upload may select.
    pub models: Vec<&'static str>,
    pub default: String,
    /// Models installed on the Ollama server; `None` when it is unreachable.
    pub installed: Option<Vec<String>>,
}

pub async fn models(State(state): State<Arc<AppState>>) -> Json<ModelsResponse> {
    let installed = match state.ollama {
        Some(ref ollama) => match ollama.list_models().await {
            Ok(models) => Some(models),
            Err(e) => {
                warn!("Could not list models on {}: {}", ollama.base_url(), e);
                None
            }
        },
        None => None,
    };

    Json(ModelsResponse {
        models: SUPPORTED_MODELS.to_vec(),
        default: state.default_model.clone(),
        installed,
    })
}
