use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("compression rate must be between 0 and 1 (exclusive), got {0}")]
    InvalidCompressionRate(f64),

    #[error("invalid chunk configuration: {0}")]
    InvalidChunkConfig(String),
}
