use async_trait::async_trait;

use crate::error::ProductResult;
use crate::models::Product;

/// Access to the upstream product catalog.
///
/// The catalog is owned by a third-party API; this trait is the only place
/// the rest of the crate talks to it, so the service can be exercised
/// against a mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductClient: Send + Sync {
    /// Fetch every product the upstream knows about, in upstream order
    async fn list_all(&self) -> ProductResult<Vec<Product>>;

    /// Fetch one product. `None` when the upstream has no such id.
    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>>;

    /// Create a product and return the upstream's echo of it
    async fn create(&self, product: Product) -> ProductResult<Product>;

    /// Delete a product. `false` when the upstream has no such id.
    async fn delete(&self, id: i64) -> ProductResult<bool>;
}
