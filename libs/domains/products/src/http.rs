//! reqwest implementation of ProductClient

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, instrument, warn};

use crate::client::ProductClient;
use crate::config::UpstreamConfig;
use crate::error::{ProductError, ProductResult};
use crate::models::Product;

const MAX_ERROR_BODY_CHARS: usize = 256;

/// Talks to a restful-api.dev style `/objects` collection over HTTP.
#[derive(Clone, Debug)]
pub struct HttpProductClient {
    client: Client,
    base_url: String,
}

impl HttpProductClient {
    /// Build a client with the configured request timeout
    pub fn new(config: &UpstreamConfig) -> ProductResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProductError::Internal(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(client, config.base_url.clone()))
    }

    /// Use an existing reqwest client, e.g. one shared with other services
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/{}", self.base_url, id)
    }
}

#[async_trait]
impl ProductClient for HttpProductClient {
    #[instrument(skip(self))]
    async fn list_all(&self) -> ProductResult<Vec<Product>> {
        let response = self.client.get(&self.base_url).send().await?;
        let products: Vec<Product> = ensure_success(response).await?.json().await?;

        debug!(count = products.len(), "Fetched products from upstream");
        Ok(products)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let response = self.client.get(self.item_url(id)).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let product: Option<Product> = ensure_success(response).await?.json().await?;
        Ok(product)
    }

    #[instrument(skip(self, product), fields(product_name = %product.name))]
    async fn create(&self, product: Product) -> ProductResult<Product> {
        let response = self.client.post(&self.base_url).json(&product).send().await?;
        let created: Option<Product> = ensure_success(response).await?.json().await?;

        created.ok_or_else(|| {
            ProductError::Internal("Failed to parse created product response".to_string())
        })
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> ProductResult<bool> {
        let response = self.client.delete(self.item_url(id)).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }

        ensure_success(response).await?;
        Ok(true)
    }
}

/// Turns a non-2xx upstream response into [`ProductError::ExternalApi`],
/// keeping the upstream status and a bounded excerpt of its body.
async fn ensure_success(response: Response) -> ProductResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let mut message = format!(
        "Response status code does not indicate success: {} ({})",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown")
    );

    let body = body.trim();
    if !body.is_empty() {
        message.push_str(": ");
        message.extend(body.chars().take(MAX_ERROR_BODY_CHARS));
    }

    warn!(status = status.as_u16(), "Upstream request failed");
    Err(ProductError::external(status, message))
}
