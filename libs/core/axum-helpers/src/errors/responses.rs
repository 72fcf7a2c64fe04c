//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "statusCode": 500,
        "message": "An unexpected error occurred."
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - invalid query, path or body",
    content_type = "application/json",
    example = json!({
        "statusCode": 400,
        "message": "Price must be greater than zero"
    })
)]
pub struct BadRequestResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "statusCode": 404,
        "message": "Product with ID 42 not found"
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Upstream API failure, status mirrors the upstream response",
    content_type = "application/json",
    example = json!({
        "statusCode": 502,
        "message": "External API error: Response status code does not indicate success: 502 (Bad Gateway)"
    })
)]
pub struct UpstreamErrorResponse(pub ErrorResponse);
