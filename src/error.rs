use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::error;
use serde_json::json;
use thiserror::Error;

/// Shape problems in a generate request, reported before the scheduler runs.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("courses, teachers, rooms and slots are required")]
    MissingCollections(Vec<&'static str>),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid PORT value {0:?}")]
    InvalidPort(String),
}

/// Errors surfaced by HTTP handlers.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("could not save")]
    Save(#[source] StorageError),
    #[error("could not load")]
    Load(#[source] StorageError),
}

impl From<InputError> for AppError {
    fn from(e: InputError) -> Self {
        AppError::BadRequest(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Save(source) | AppError::Load(source) => {
                error!("{}: {}", self, source);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_collections_become_bad_request() {
        let err = AppError::from(InputError::MissingCollections(vec!["rooms"]));
        assert!(
            matches!(&err, AppError::BadRequest(msg) if msg == "courses, teachers, rooms and slots are required")
        );
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
