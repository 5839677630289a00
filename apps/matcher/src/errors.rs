use std::path::PathBuf;

use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// `main` renders it as a JSON error object on stderr and exits with `exit_code()`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::Io {
            path: path.into(),
            source,
        }
    }

    /// Stable machine-readable code for the error class.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Io { .. } => "IO_ERROR",
            AppError::Json(_) => "JSON_ERROR",
            AppError::Config(_) => "CONFIG_ERROR",
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Validation(_) | AppError::Json(_) => 2,
            AppError::NotFound(_) => 3,
            AppError::Io { .. } => 4,
            AppError::Config(_) => 5,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "error": {
                "code": self.code(),
                "message": self.to_string()
            }
        })
    }
}
