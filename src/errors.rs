use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("root must be an existing directory")]
    InvalidRoot,
    #[error("path is outside the chosen root")]
    OutsideRoot,
    #[error("missing path")]
    MissingPath,
    #[error("path not found")]
    NotFound,
    #[error("path is not a directory")]
    NotADirectory,
    #[error("not a regular file")]
    NotAFile,
    #[error("permission denied")]
    PermissionDenied,
    #[error("unable to read file: {0}")]
    ReadError(String),
    #[error("path resolution failed: {0}")]
    Resolution(String),
    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidRoot => "InvalidRoot",
            AppError::OutsideRoot => "OutsideRoot",
            AppError::MissingPath => "MissingPath",
            AppError::NotFound => "NotFound",
            AppError::NotADirectory => "NotADirectory",
            AppError::NotAFile => "NotAFile",
            AppError::PermissionDenied => "PermissionDenied",
            AppError::ReadError(_) => "ReadError",
            AppError::Resolution(_) => "Resolution",
            AppError::Internal(_) => "Internal",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidRoot | AppError::MissingPath | AppError::NotADirectory => {
                StatusCode::BAD_REQUEST
            }
            AppError::OutsideRoot | AppError::PermissionDenied => StatusCode::FORBIDDEN,
            AppError::NotFound | AppError::NotAFile => StatusCode::NOT_FOUND,
            AppError::ReadError(_) | AppError::Resolution(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            code: self.code(),
            message: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
