//! Error types for the API service

use bestiary_store::StoreError;
use bestiary_types::{ErrorCode, ValidationError};
use serde::Serialize;
use thiserror::Error;
use warp::http::StatusCode;
use warp::Reply;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("HTTP error: {0}")]
    Http(#[from] warp::Error),

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Password hashing failed: {0}")]
    Hashing(#[from] bcrypt::BcryptError),
}

pub type Result<T> = std::result::Result<T, ApiError>;

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Validation(err.into())
    }
}

/// JSON body of every error response
#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub message: &'a str,
    pub code: &'a str,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(err) if err.code() == ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Http(_) | ApiError::Configuration { .. } | ApiError::Hashing(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(err) => err.code().as_str(),
            ApiError::Http(_) | ApiError::Configuration { .. } | ApiError::Hashing(_) => {
                "internal"
            }
        }
    }

    pub fn into_response(self) -> warp::reply::Response {
        let message = match &self {
            ApiError::Validation(err) => err.message().to_string(),
            // internals stay in the log
            _ => "Internal server error".to_string(),
        };
        let body = ErrorBody {
            message: &message,
            code: self.code(),
        };
        warp::reply::with_status(warp::reply::json(&body), self.status()).into_response()
    }
}
