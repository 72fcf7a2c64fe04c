pub mod handlers;
pub mod messages;
pub mod responses;

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Standard error response structure.
///
/// Every non-2xx response produced by the service has this shape:
///
/// ```json
/// {
///   "statusCode": 404,
///   "message": "Product with ID 42 not found"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// HTTP status code, repeated in the body
    pub status_code: u16,
    /// Human-readable error message
    pub message: String,
}

/// A single failed field constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    /// Dotted path of the offending field, e.g. `data.price`
    pub field: String,
    /// Message describing the violated constraint
    pub message: String,
}

/// Application error type that can be converted to HTTP responses.
///
/// This is the single error boundary of the HTTP layer: every variant is
/// logged when rendered, and anything not explicitly classified becomes a
/// 500 with a generic message.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Query string error: {0}")]
    QueryRejection(#[from] QueryRejection),

    #[error("Path parameter error: {0}")]
    PathRejection(#[from] PathRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Upstream error ({status}): {message}")]
    Upstream { status: StatusCode, message: String },

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl AppError {
    /// Status code this error renders with.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::JsonExtractorRejection(JsonRejection::MissingJsonContentType(_)) => {
                StatusCode::UNSUPPORTED_MEDIA_TYPE
            }
            AppError::JsonExtractorRejection(_)
            | AppError::QueryRejection(_)
            | AppError::PathRejection(_)
            | AppError::ValidationError(_)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upstream { status, .. } => {
                if status.is_client_error() || status.is_server_error() {
                    *status
                } else {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            }
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match self {
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!(status = status.as_u16(), "JSON extraction error: {}", e);
                e.body_text()
            }
            AppError::QueryRejection(e) => {
                tracing::info!(status = status.as_u16(), "Query string rejected: {}", e);
                e.body_text()
            }
            AppError::PathRejection(e) => {
                tracing::info!(status = status.as_u16(), "Path parameter rejected: {}", e);
                e.body_text()
            }
            AppError::ValidationError(e) => {
                let errors = field_errors(&e);
                tracing::info!(status = status.as_u16(), ?errors, "Validation error");
                validation_message(&errors)
            }
            AppError::BadRequest(msg) => {
                tracing::info!(status = status.as_u16(), "Bad request: {}", msg);
                msg
            }
            AppError::NotFound(msg) => {
                tracing::info!(status = status.as_u16(), "Not found: {}", msg);
                msg
            }
            AppError::Upstream { message, .. } => {
                tracing::error!(status = status.as_u16(), "Upstream error: {}", message);
                message
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(status = status.as_u16(), "Internal server error: {}", msg);
                messages::INTERNAL_ERROR.to_string()
            }
        };

        error_response(status, message)
    }
}

/// Flattens validator output into `field -> message` pairs.
///
/// Nested structs contribute dotted paths (`data.year`), list entries use
/// an index segment (`items[2].name`). The result is sorted by field so
/// messages are stable across runs.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out = Vec::new();
    collect_field_errors(errors, None, &mut out);
    out.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.message.cmp(&b.message)));
    out
}

fn collect_field_errors(errors: &ValidationErrors, prefix: Option<&str>, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        let path = match prefix {
            Some(prefix) => format!("{}.{}", prefix, field),
            None => field.to_string(),
        };

        match kind {
            ValidationErrorsKind::Field(list) => {
                for err in list {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid ({})", path, err.code));
                    out.push(FieldError {
                        field: path.clone(),
                        message,
                    });
                }
            }
            ValidationErrorsKind::Struct(inner) => {
                collect_field_errors(inner, Some(&path), out);
            }
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    let item_path = format!("{}[{}]", path, index);
                    collect_field_errors(inner, Some(&item_path), out);
                }
            }
        }
    }
}

fn validation_message(errors: &[FieldError]) -> String {
    if errors.is_empty() {
        return messages::VALIDATION_FAILED.to_string();
    }

    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Helper function to create error responses.
///
/// # Example
///
/// ```rust,ignore
/// use axum_helpers::errors::error_response;
/// use axum::http::StatusCode;
///
/// let response = error_response(StatusCode::BAD_REQUEST, "Invalid input".to_string());
/// ```
pub fn error_response(status: StatusCode, message: String) -> Response {
    let body = Json(ErrorResponse {
        status_code: status.as_u16(),
        message,
    });

    (status, body).into_response()
}
