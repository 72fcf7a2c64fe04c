use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product with ID {0} not found")]
    NotFound(i64),

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    /// The upstream API failed. `status` is `None` for transport failures
    /// (connect, timeout) where no response arrived.
    #[error("External API error: {message}")]
    ExternalApi { status: Option<u16>, message: String },

    #[error("Error processing products: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl ProductError {
    pub fn external(status: StatusCode, message: impl Into<String>) -> Self {
        ProductError::ExternalApi {
            status: Some(status.as_u16()),
            message: message.into(),
        }
    }
}

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(_) => AppError::NotFound(err.to_string()),
            ProductError::Validation(errors) => AppError::ValidationError(errors),
            ProductError::ExternalApi { status, .. } => AppError::Upstream {
                status: status
                    .and_then(|s| StatusCode::from_u16(s).ok())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                message: err.to_string(),
            },
            ProductError::Internal(_) => AppError::InternalServerError(err.to_string()),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<reqwest::Error> for ProductError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return ProductError::Internal(format!("invalid upstream response body: {}", err));
        }

        ProductError::ExternalApi {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}
