//! Upload-and-summarize endpoints.
//!
//! The upload is written to `<upload_dir>/<uuid>_<name>` and the summary to
//! `<output_dir>/summary_<uuid>_<name>`. Both files are removed before the
//! response is sent, whether or not summarization succeeded.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use precis_core::config::SUPPORTED_MODELS;
use precis_core::{CompressionRate, SummaryStats};
use precis_summarize::{Strategy, SummaryReport};
use serde::Serialize;
use tokio::fs;
use tracing::{info, warn};
use uuid::Uuid;

use super::error::ApiError;
use crate::state::AppState;

/// Compression rate used when the form leaves it out.
pub const DEFAULT_UPLOAD_RATE: f64 = 0.6;

/// A validated summarize request.
#[derive(Debug)]
pub(crate) struct Upload {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub rate: CompressionRate,
    pub model: String,
}

impl Upload {
    async fn from_multipart(mut multipart: Multipart, default_model: &str) -> Result<Self, ApiError> {
        let mut file: Option<(String, Vec<u8>)> = None;
        let mut rate = None;
        let mut model = None;

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "file" => {
                    let name = field.file_name().unwrap_or("document.txt").to_string();
                    let bytes = field.bytes().await?;
                    file = Some((name, bytes.to_vec()));
                }
                "compression_rate" => {
                    rate = Some(parse_rate(field.text().await?.trim())?);
                }
                "model" => {
                    model = Some(parse_model(field.text().await?.trim())?);
                }
                _ => {}
            }
        }

        let (filename, bytes) =
            file.ok_or_else(|| ApiError::BadRequest("No file provided".to_string()))?;
        if bytes.is_empty() {
            return Err(ApiError::BadRequest(format!("File '{}' is empty", filename)));
        }

        let rate = match rate {
            Some(rate) => rate,
            None => CompressionRate::new(DEFAULT_UPLOAD_RATE)
                .map_err(|e| ApiError::BadRequest(e.to_string()))?,
        };

        Ok(Self {
            filename: safe_file_name(&filename),
            bytes,
            rate,
            model: model.unwrap_or_else(|| default_model.to_string()),
        })
    }
}

/// Accept 0.1 through 0.9 in steps of 0.1.
fn parse_rate(raw: &str) -> Result<CompressionRate, ApiError> {
    let invalid = || {
        ApiError::BadRequest(format!(
            "compression_rate must be one of 0.1, 0.2, ... 0.9 (got '{}')",
            raw
        ))
    };
    let value: f64 = raw.parse().map_err(|_| invalid())?;
    let tenths = (value * 10.0).round();
    if !(1.0..=9.0).contains(&tenths) || (value * 10.0 - tenths).abs() > 1e-6 {
        return Err(invalid());
    }
    CompressionRate::new(tenths / 10.0).map_err(|_| invalid())
}

fn parse_model(raw: &str) -> Result<String, ApiError> {
    if SUPPORTED_MODELS.contains(&raw) {
        Ok(raw.to_string())
    } else {
        Err(ApiError::BadRequest(format!(
            "unknown model '{}', expected one of: {}",
            raw,
            SUPPORTED_MODELS.join(", ")
        )))
    }
}

/// Strip any directory components a client put in the file name.
fn safe_file_name(name: &str) -> String {
    Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "document.txt".to_string())
}

async fn remove_quietly(path: &Path) {
    if let Err(e) = fs::remove_file(path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!("Failed to remove temporary file {}: {}", path.display(), e);
        }
    }
}

/// Run the pipeline on an upload through its temporary files.
async fn summarize_upload(state: &AppState, upload: &Upload) -> Result<SummaryReport, ApiError> {
    let id = Uuid::new_v4();
    let upload_path: PathBuf = state.upload_dir.join(format!("{}_{}", id, upload.filename));
    let output_path: PathBuf = state
        .output_dir
        .join(format!("summary_{}_{}", id, upload.filename));

    let result = run_saved_upload(state, upload, &upload_path, &output_path).await;

    remove_quietly(&upload_path).await;
    remove_quietly(&output_path).await;

    result
}

async fn run_saved_upload(
    state: &AppState,
    upload: &Upload,
    upload_path: &Path,
    output_path: &Path,
) -> Result<SummaryReport, ApiError> {
    fs::create_dir_all(&state.upload_dir).await?;
    fs::write(upload_path, &upload.bytes).await?;
    info!(
        "Saved upload '{}' ({} bytes) as {}",
        upload.filename,
        upload.bytes.len(),
        upload_path.display()
    );

    let pipeline = state.pipeline.with_model(&upload.model);
    Ok(pipeline.run(upload_path, Some(output_path), upload.rate).await?)
}

#[derive(Serialize)]
pub struct SummarizeResponse {
    pub filename: String,
    pub model: String,
    pub summary: String,
    pub stats: SummaryStats,
    pub chunks: usize,
    pub strategy: Strategy,
    pub combine_rounds: usize,
    pub elapsed_secs: f64,
}

pub async fn summarize(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<SummarizeResponse>, ApiError> {
    let upload = Upload::from_multipart(multipart, &state.default_model).await?;
    let report = summarize_upload(&state, &upload).await?;

    Ok(Json(SummarizeResponse {
        filename: upload.filename,
        model: upload.model,
        summary: report.summary,
        stats: report.stats,
        chunks: report.outcome.chunks,
        strategy: report.outcome.strategy,
        combine_rounds: report.outcome.combine_rounds,
        elapsed_secs: report.elapsed.as_secs_f64(),
    }))
}

/// Same as `summarize`, answering with the summary as a text attachment.
pub async fn download(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let upload = Upload::from_multipart(multipart, &state.default_model).await?;
    let report = summarize_upload(&state, &upload).await?;

    let disposition = format!("attachment; filename=\"summary_{}\"", upload.filename);
    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        report.summary,
    ))
}
