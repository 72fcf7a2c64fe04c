//! Products Domain
//!
//! A products API whose catalog lives in a third-party HTTP service
//! (restful-api.dev by default). Nothing is stored locally.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, query/body validation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Name filter, pagination, not-found mapping
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Client    │  ← Upstream access (trait + reqwest implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Product DTOs shared with the upstream
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{handlers, HttpProductClient, ProductService, UpstreamConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpProductClient::new(&UpstreamConfig::default())?;
//! let service = ProductService::new(client);
//!
//! // Create Axum router
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod http;
pub mod models;
pub mod service;

// Re-export commonly used types
pub use client::ProductClient;
pub use config::UpstreamConfig;
pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use http::HttpProductClient;
pub use models::{Product, ProductData, ProductListResponse, ProductSearchParams};
pub use service::ProductService;
