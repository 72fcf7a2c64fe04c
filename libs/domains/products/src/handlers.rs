//! HTTP handlers for Products API

use axum::{
    extract::{OriginalUri, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use axum_helpers::{
    errors::{
        handlers::method_not_allowed,
        responses::{
            BadRequestResponse, InternalServerErrorResponse, NotFoundResponse,
            UpstreamErrorResponse,
        },
    },
    IdPath, ValidQuery, ValidatedJson,
};
use std::sync::Arc;
use utoipa::OpenApi;
use validator::Validate;

use crate::client::ProductClient;
use crate::error::ProductResult;
use crate::models::{Product, ProductData, ProductListResponse, ProductSearchParams};
use crate::service::ProductService;

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(list_products, create_product, get_product, delete_product),
    components(
        schemas(Product, ProductData, ProductListResponse, ProductSearchParams),
        responses(
            BadRequestResponse,
            NotFoundResponse,
            UpstreamErrorResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Products backed by the upstream catalog API")
    )
)]
pub struct ApiDoc;

/// Create the products router with all HTTP endpoints
pub fn router<C: ProductClient + 'static>(service: ProductService<C>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/{id}", get(get_product).delete(delete_product))
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(shared_service)
}

/// List products, filtered by name and paginated
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    params(ProductSearchParams),
    responses(
        (status = 200, description = "One page of products", body = ProductListResponse),
        (status = 400, response = BadRequestResponse),
        (status = 502, response = UpstreamErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<C: ProductClient>(
    State(service): State<Arc<ProductService<C>>>,
    ValidQuery(params): ValidQuery<ProductSearchParams>,
) -> ProductResult<Json<ProductListResponse>> {
    params.validate()?;
    let page = service.get_products(params).await?;
    Ok(Json(page))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = Product,
    responses(
        (status = 201, description = "Product created", body = Product,
            headers(("Location" = String, description = "URL of the created product"))),
        (status = 400, response = BadRequestResponse),
        (status = 502, response = UpstreamErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<C: ProductClient>(
    State(service): State<Arc<ProductService<C>>>,
    OriginalUri(uri): OriginalUri,
    ValidatedJson(input): ValidatedJson<Product>,
) -> ProductResult<Response> {
    let product = service.create_product(input).await?;

    // Ids the upstream generates itself are not numeric; no Location then.
    let location = product
        .id
        .map(|id| format!("{}/{}", uri.path().trim_end_matches('/'), id))
        .and_then(|loc| HeaderValue::from_str(&loc).ok());

    let mut response = (StatusCode::CREATED, Json(product)).into_response();
    if let Some(location) = location {
        response.headers_mut().insert(header::LOCATION, location);
    }
    Ok(response)
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 502, response = UpstreamErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<C: ProductClient>(
    State(service): State<Arc<ProductService<C>>>,
    IdPath(id): IdPath,
) -> ProductResult<Json<Product>> {
    let product = service.get_product_by_id(id).await?;
    Ok(Json(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 502, response = UpstreamErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<C: ProductClient>(
    State(service): State<Arc<ProductService<C>>>,
    IdPath(id): IdPath,
) -> ProductResult<impl IntoResponse> {
    service.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
