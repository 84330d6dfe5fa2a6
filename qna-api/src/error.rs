use crate::storage::StoreError;
use actix_web::{HttpResponse, ResponseError};
use shared_types::ErrorResponse;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        let error_response = ErrorResponse {
            error: self.error_type(),
            message: self.to_string(),
        };

        match self {
            ApiError::NotFound(_) | ApiError::Store(StoreError::NotFound(_)) => {
                HttpResponse::NotFound().json(error_response)
            }
            ApiError::InvalidRequest(_) => HttpResponse::BadRequest().json(error_response),
            ApiError::Unauthorized(_) => HttpResponse::Unauthorized().json(error_response),
            ApiError::Store(_) | ApiError::Internal(_) => {
                HttpResponse::InternalServerError().json(error_response)
            }
        }
    }
}

impl ApiError {
    fn error_type(&self) -> String {
        match self {
            ApiError::Store(StoreError::NotFound(_)) | ApiError::NotFound(_) => {
                "not_found".to_string()
            }
            ApiError::Store(_) => "storage_error".to_string(),
            ApiError::InvalidRequest(_) => "invalid_request".to_string(),
            ApiError::Unauthorized(_) => "unauthorized".to_string(),
            ApiError::Internal(_) => "internal_error".to_string(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
