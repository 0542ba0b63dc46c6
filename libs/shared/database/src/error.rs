use reqwest::StatusCode;
use thiserror::Error;

use shared_models::error::AppError;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Unique constraint violated: {0}")]
    Conflict(String),

    #[error("Store rejected credentials: {0}")]
    Auth(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Store API error ({status}): {body}")]
    Api { status: StatusCode, body: String },

    #[error("Invalid store configuration: {0}")]
    Config(String),

    #[error("Store transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected store payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl StoreError {
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status.as_u16() {
            409 => StoreError::Conflict(body),
            401 | 403 => StoreError::Auth(body),
            404 => StoreError::NotFound(body),
            _ => StoreError::Api { status, body },
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(msg) => AppError::Conflict(msg),
            StoreError::NotFound(msg) => AppError::NotFound(msg),
            StoreError::Auth(_) | StoreError::Api { .. } | StoreError::Transport(_) => {
                AppError::ExternalService(err.to_string())
            }
            StoreError::Config(_) | StoreError::Decode(_) => AppError::Database(err.to_string()),
        }
    }
}
