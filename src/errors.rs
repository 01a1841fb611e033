use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unknown format {0}")]
    UnknownFormat(String),

    #[error("Invalid quality '{quality}' for format {format}")]
    InvalidQuality { format: String, quality: String },

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
