//! Handler tests for Products domain
//!
//! These drive the products router over HTTP against a stub upstream:
//! - Query and body validation (before any upstream call)
//! - Response serialization and status codes
//! - Translation of upstream failures into `{statusCode, message}` bodies
//!
//! The router is nested at `/api/products` the way the binary mounts it.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use axum_helpers::ErrorResponse;
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::time::Duration;
use test_utils::{catalog, StubUpstream};
use tower::ServiceExt; // For oneshot()

fn app(upstream: &StubUpstream) -> Router {
    let config = UpstreamConfig::new(upstream.base_url(), Duration::from_secs(5));
    let client = HttpProductClient::new(&config).unwrap();
    Router::new().nest("/api/products", handlers::router(ProductService::new(client)))
}

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/products")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn names(page: &ProductListResponse) -> Vec<&str> {
    page.products.iter().map(|p| p.name.as_str()).collect()
}

#[tokio::test]
async fn test_list_uses_default_paging() {
    let upstream = StubUpstream::start(catalog()).await;

    let response = app(&upstream).oneshot(get("/api/products")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let page: ProductListResponse = json_body(response.into_body()).await;
    assert_eq!(page.page, 1);
    assert_eq!(page.page_size, 10);
    assert_eq!(page.total_count, 10);
    assert_eq!(page.products.len(), 10);
    assert_eq!(page.products[0].id, Some(1));
    assert_eq!(page.products[0].name, "Google Pixel 6 Pro");
}

#[tokio::test]
async fn test_list_filters_then_paginates() {
    let upstream = StubUpstream::start(catalog()).await;

    let response = app(&upstream)
        .oneshot(get("/api/products?nameFilter=apple&page=2&pageSize=2"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let page: ProductListResponse = json_body(response.into_body()).await;
    assert_eq!(page.total_count, 7);
    assert_eq!(names(&page), vec!["Apple iPhone 11, 64GB", "Apple AirPods"]);
}

#[tokio::test]
async fn test_list_filter_is_case_insensitive() {
    let upstream = StubUpstream::start(catalog()).await;

    let response = app(&upstream)
        .oneshot(get("/api/products?nameFilter=WATCH"))
        .await
        .unwrap();

    let page: ProductListResponse = json_body(response.into_body()).await;
    assert_eq!(names(&page), vec!["Apple Watch Series 8"]);
    assert_eq!(page.total_count, 1);
}

#[tokio::test]
async fn test_list_page_past_end_is_empty() {
    let upstream = StubUpstream::start(catalog()).await;

    let response = app(&upstream)
        .oneshot(get("/api/products?page=1000"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let page: ProductListResponse = json_body(response.into_body()).await;
    assert!(page.products.is_empty());
    assert_eq!(page.total_count, 10);
    assert_eq!(page.page, 1000);
}

#[tokio::test]
async fn test_list_rejects_bad_paging_without_calling_upstream() {
    let upstream = StubUpstream::start(catalog()).await;

    let cases = [
        ("/api/products?page=0", "Page must be greater than 0"),
        ("/api/products?page=-3", "Page must be greater than 0"),
        ("/api/products?pageSize=0", "Page size must be between 1 and 100"),
        ("/api/products?pageSize=101", "Page size must be between 1 and 100"),
    ];

    for (uri, message) in cases {
        let response = app(&upstream).oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);

        let error: ErrorResponse = json_body(response.into_body()).await;
        assert_eq!(error.status_code, 400);
        assert_eq!(error.message, message);
    }

    assert_eq!(upstream.request_count(), 0);
}

#[tokio::test]
async fn test_list_reports_both_paging_violations() {
    let upstream = StubUpstream::start(catalog()).await;

    let response = app(&upstream)
        .oneshot(get("/api/products?page=0&pageSize=0"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(
        error.message,
        "Page must be greater than 0; Page size must be between 1 and 100"
    );
    assert_eq!(upstream.request_count(), 0);
}

#[tokio::test]
async fn test_list_rejects_non_numeric_paging() {
    let upstream = StubUpstream::start(catalog()).await;

    let response = app(&upstream)
        .oneshot(get("/api/products?pageSize=lots"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.status_code, 400);
}

#[tokio::test]
async fn test_get_product_by_id() {
    let upstream = StubUpstream::start(catalog()).await;

    let response = app(&upstream)
        .oneshot(get("/api/products/7"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(
        body,
        json!({
            "id": 7,
            "name": "Apple MacBook Pro 16",
            "data": {
                "year": 2019,
                "price": 1849.99,
                "CPU model": "Intel Core i9",
                "Hard disk size": "1 TB"
            }
        })
    );
}

#[tokio::test]
async fn test_get_product_with_null_data() {
    let upstream = StubUpstream::start(catalog()).await;

    let response = app(&upstream)
        .oneshot(get("/api/products/2"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let product: Product = json_body(response.into_body()).await;
    assert_eq!(product.id, Some(2));
    assert_eq!(product.data, ProductData::default());
}

#[tokio::test]
async fn test_get_missing_product_returns_404() {
    let upstream = StubUpstream::start(catalog()).await;

    let response = app(&upstream)
        .oneshot(get("/api/products/999"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(
        error,
        ErrorResponse {
            status_code: 404,
            message: "Product with ID 999 not found".to_string(),
        }
    );
}

#[tokio::test]
async fn test_get_with_non_integer_id_returns_400() {
    let upstream = StubUpstream::start(catalog()).await;

    let response = app(&upstream)
        .oneshot(get("/api/products/abc"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(upstream.request_count(), 0);
}

#[tokio::test]
async fn test_create_round_trip() {
    let upstream = StubUpstream::start(vec![]).await;

    let response = app(&upstream)
        .oneshot(post_json(json!({
            "name": "Apple iPad",
            "data": {"year": 2021, "price": 549.99, "color": "Silver"}
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.headers()[header::LOCATION], "/api/products/100");

    let product: Product = json_body(response.into_body()).await;
    assert_eq!(product.id, Some(100));
    assert_eq!(product.name, "Apple iPad");
    assert_eq!(product.data.year, 2021);
    assert_eq!(product.data.price, 549.99);
    assert_eq!(product.data.color.as_deref(), Some("Silver"));

    // The upstream received exactly what the client sent, minus the id.
    let stored = upstream.objects();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0]["data"], json!({"year": 2021, "price": 549.99, "color": "Silver"}));
}

#[tokio::test]
async fn test_create_with_zero_price_never_reaches_upstream() {
    let upstream = StubUpstream::start(vec![]).await;

    let response = app(&upstream)
        .oneshot(post_json(json!({
            "name": "Apple iPad",
            "data": {"year": 2021, "price": 0}
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.message, "Price must be greater than zero");
    assert_eq!(upstream.request_count(), 0);
}

#[tokio::test]
async fn test_create_reports_every_field_violation() {
    let upstream = StubUpstream::start(vec![]).await;

    let response = app(&upstream)
        .oneshot(post_json(json!({
            "name": "",
            "data": {"year": 1800, "price": 10}
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(
        error.message,
        "Year must be between 1900 and 2100; Name is required"
    );
}

#[tokio::test]
async fn test_create_rejects_long_name() {
    let upstream = StubUpstream::start(vec![]).await;

    let response = app(&upstream)
        .oneshot(post_json(json!({
            "name": "x".repeat(101),
            "data": {"year": 2021, "price": 10}
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.message, "Name cannot exceed 100 characters");
}

#[tokio::test]
async fn test_create_rejects_malformed_json() {
    let upstream = StubUpstream::start(vec![]).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/products")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();

    let response = app(&upstream).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.status_code, 400);
    assert_eq!(upstream.request_count(), 0);
}

#[tokio::test]
async fn test_create_without_json_content_type_returns_415() {
    let upstream = StubUpstream::start(vec![]).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/products")
        .body(Body::from(json!({"name": "Apple iPad"}).to_string()))
        .unwrap();

    let response = app(&upstream).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_delete_then_get_returns_404() {
    let upstream = StubUpstream::start(catalog()).await;
    let app = app(&upstream);

    let request = Request::builder()
        .method("DELETE")
        .uri("/api/products/3")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.oneshot(get("/api/products/3")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_missing_product_returns_404() {
    let upstream = StubUpstream::start(catalog()).await;

    let request = Request::builder()
        .method("DELETE")
        .uri("/api/products/999")
        .body(Body::empty())
        .unwrap();
    let response = app(&upstream).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.message, "Product with ID 999 not found");
}

#[tokio::test]
async fn test_upstream_failure_status_is_propagated() {
    let upstream = StubUpstream::failing(StatusCode::SERVICE_UNAVAILABLE).await;

    let response = app(&upstream).oneshot(get("/api/products")).await.unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.status_code, 503);
    assert!(error.message.starts_with(
        "External API error: Response status code does not indicate success: 503 (Service Unavailable)"
    ));
}

#[tokio::test]
async fn test_upstream_garbage_is_a_generic_500() {
    let upstream = StubUpstream::raw(StatusCode::OK, "<html>maintenance</html>").await;

    let response = app(&upstream).oneshot(get("/api/products")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.message, "An unexpected error occurred.");
}

#[tokio::test]
async fn test_unsupported_method_returns_json_405() {
    let upstream = StubUpstream::start(catalog()).await;

    let request = Request::builder()
        .method("PUT")
        .uri("/api/products/1")
        .body(Body::empty())
        .unwrap();
    let response = app(&upstream).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.status_code, 405);
}
