use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

use crate::store::StoreError;

/// Domain error taxonomy for products.
///
/// Every failure the persistence layer produces is one of these three kinds.
/// Only the gateway classifies store failures; callers above it map kinds to
/// status codes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("internal server error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl ProductError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::BadRequest(msg) => AppError::BadRequest(msg),
            ProductError::NotFound(msg) => AppError::NotFound(msg),
            ProductError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// Store failures that reach the domain are always internal.
impl From<StoreError> for ProductError {
    fn from(err: StoreError) -> Self {
        ProductError::Internal(err.to_string())
    }
}

impl From<mongodb::bson::de::Error> for ProductError {
    fn from(err: mongodb::bson::de::Error) -> Self {
        ProductError::Internal(format!("failed to decode product document: {}", err))
    }
}
