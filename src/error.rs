use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::validation::SchemaViolation;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    ConstraintViolation(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotAcceptable(String),

    #[error("{0}")]
    UnsupportedMediaType(String),

    #[error("Song {song_id} references missing file {file_id}")]
    MissingFile { song_id: i32, file_id: i32 },
}

impl From<SchemaViolation> for AppError {
    fn from(violation: SchemaViolation) -> Self {
        Self::Validation(violation.to_string())
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Database(_) | Self::MissingFile { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) | Self::ConstraintViolation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotAcceptable(_) => StatusCode::NOT_ACCEPTABLE,
            Self::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match self {
            Self::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                "Database error occurred".to_string()
            }
            Self::MissingFile { .. } => {
                tracing::error!("Inconsistent catalog: {}", self);
                "Internal consistency error".to_string()
            }
            ref other => other.to_string(),
        };

        (self.status(), Json(json!({ "message": message }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
