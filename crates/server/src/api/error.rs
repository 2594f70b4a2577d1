use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use precis_summarize::{PipelineError, SummarizeError};
use serde::Serialize;
use tracing::{error, warn};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("multipart error: {0}")]
    Multipart(#[from] MultipartError),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Multipart(e) => e.status(),
            ApiError::Pipeline(e) => match e {
                PipelineError::Extraction(_) => StatusCode::UNPROCESSABLE_ENTITY,
                PipelineError::Summarize(SummarizeError::EmptyDocument) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                PipelineError::Summarize(SummarizeError::Inference(_))
                | PipelineError::Provider(_) => StatusCode::BAD_GATEWAY,
                PipelineError::Summarize(SummarizeError::InvalidConfig(_))
                | PipelineError::Persist(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed ({}): {}", status, self);
        } else {
            warn!("Request rejected ({}): {}", status, self);
        }
        (status, Json(ErrorResponse { error: self.to_string() })).into_response()
    }
}
