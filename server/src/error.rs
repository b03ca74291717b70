use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde::Serialize;

use crate::auth_token::AuthTokenError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Invalid document: {0}")]
    Serialization(#[from] mongodb::bson::ser::Error),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Invalid identifier: {0}")]
    InvalidObjectId(#[from] mongodb::bson::oid::Error),

    #[error("Failed to issue session token: {0}")]
    Token(#[from] AuthTokenError),

    #[error("unauthorized access")]
    AuthMissing,

    #[error("unauthorized access")]
    AuthInvalid,

    #[error("forbidden access")]
    AuthMismatch,

    #[error("Configuration error: {0}")]
    Config(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::AuthMissing => StatusCode::UNAUTHORIZED,
            ApiError::AuthInvalid => StatusCode::UNAUTHORIZED,
            ApiError::AuthMismatch => StatusCode::FORBIDDEN,
            ApiError::InvalidObjectId(_) => StatusCode::BAD_REQUEST,
            ApiError::Serialization(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Token(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{}", self);
        }

        let error_response = ErrorResponse {
            success: false,
            error: self.to_string(),
        };

        HttpResponse::build(status).json(error_response)
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
