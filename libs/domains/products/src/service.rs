//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;

use crate::client::ProductClient;
use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductListResponse, ProductSearchParams};

/// Product service on top of the upstream catalog.
///
/// The upstream has no server-side filtering or paging, so listing pulls
/// the whole collection and slices it locally.
pub struct ProductService<C: ProductClient> {
    client: Arc<C>,
}

impl<C: ProductClient> Clone for ProductService<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}

impl<C: ProductClient> ProductService<C> {
    /// Create a new ProductService with the given client
    pub fn new(client: C) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// List one page of products, optionally filtered by name
    #[instrument(skip(self))]
    pub async fn get_products(
        &self,
        params: ProductSearchParams,
    ) -> ProductResult<ProductListResponse> {
        let products = self.client.list_all().await?;
        Ok(paginate(products, &params))
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product_by_id(&self, id: i64) -> ProductResult<Product> {
        self.client
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Create a product upstream. The payload is expected to be validated.
    #[instrument(skip(self, product), fields(product_name = %product.name))]
    pub async fn create_product(&self, product: Product) -> ProductResult<Product> {
        self.client.create(product).await
    }

    /// Delete a product
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i64) -> ProductResult<()> {
        if self.client.delete(id).await? {
            Ok(())
        } else {
            Err(ProductError::NotFound(id))
        }
    }
}

/// Filter by name and cut out the requested page.
///
/// `total_count` is taken after filtering and before paging. Pages past
/// the end come back empty.
pub fn paginate(products: Vec<Product>, params: &ProductSearchParams) -> ProductListResponse {
    let needle = params
        .name_filter
        .as_deref()
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_lowercase);

    let filtered: Vec<Product> = match needle {
        Some(needle) => products
            .into_iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .collect(),
        None => products,
    };

    let total_count = filtered.len();
    let page_size = usize::try_from(params.page_size.max(0)).unwrap_or(usize::MAX);
    let skip = usize::try_from(params.page.saturating_sub(1).max(0))
        .unwrap_or(usize::MAX)
        .saturating_mul(page_size);

    let products = filtered.into_iter().skip(skip).take(page_size).collect();

    ProductListResponse {
        products,
        total_count,
        page: params.page,
        page_size: params.page_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockProductClient;
    use crate::models::ProductData;
    use axum::http::StatusCode;
    use mockall::predicate::eq;

    fn product(id: i64, name: &str) -> Product {
        Product {
            id: Some(id),
            name: name.to_string(),
            data: ProductData::default(),
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(1, "Google Pixel 6 Pro"),
            product(2, "Apple iPhone 12 Mini"),
            product(3, "Apple iPhone 12 Pro Max"),
            product(4, "Samsung Galaxy Z Fold2"),
            product(5, "Apple Watch Series 8"),
        ]
    }

    fn params(page: i64, page_size: i64, name_filter: Option<&str>) -> ProductSearchParams {
        ProductSearchParams {
            page,
            page_size,
            name_filter: name_filter.map(str::to_string),
        }
    }

    fn names(response: &ProductListResponse) -> Vec<&str> {
        response.products.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_first_page_keeps_upstream_order() {
        let response = paginate(catalog(), &params(1, 2, None));
        assert_eq!(names(&response), vec!["Google Pixel 6 Pro", "Apple iPhone 12 Mini"]);
        assert_eq!(response.total_count, 5);
        assert_eq!(response.page, 1);
        assert_eq!(response.page_size, 2);
    }

    #[test]
    fn test_last_partial_page() {
        let response = paginate(catalog(), &params(3, 2, None));
        assert_eq!(names(&response), vec!["Apple Watch Series 8"]);
        assert_eq!(response.total_count, 5);
    }

    #[test]
    fn test_page_past_end_is_empty_not_error() {
        let response = paginate(catalog(), &params(1000, 10, None));
        assert!(response.products.is_empty());
        assert_eq!(response.total_count, 5);
    }

    #[test]
    fn test_huge_page_does_not_overflow() {
        let response = paginate(catalog(), &params(i64::MAX, 100, None));
        assert!(response.products.is_empty());
        assert_eq!(response.total_count, 5);
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let response = paginate(catalog(), &params(1, 10, Some("watch")));
        assert_eq!(names(&response), vec!["Apple Watch Series 8"]);
        assert_eq!(response.total_count, 1);

        let response = paginate(catalog(), &params(1, 10, Some("APPLE")));
        assert_eq!(response.total_count, 3);
    }

    #[test]
    fn test_blank_filter_is_ignored() {
        let response = paginate(catalog(), &params(1, 10, Some("   ")));
        assert_eq!(response.total_count, 5);
    }

    #[test]
    fn test_total_count_is_independent_of_page() {
        for page in 1..=4 {
            for page_size in [1, 2, 3, 10] {
                let response = paginate(catalog(), &params(page, page_size, Some("apple")));
                assert_eq!(response.total_count, 3);
                assert!(response.products.len() <= page_size as usize);
            }
        }
    }

    #[tokio::test]
    async fn test_get_products_uses_upstream_list() {
        let mut mock_client = MockProductClient::new();
        mock_client
            .expect_list_all()
            .times(1)
            .returning(|| Ok(catalog()));

        let service = ProductService::new(mock_client);
        let response = service
            .get_products(params(2, 2, None))
            .await
            .unwrap();

        assert_eq!(names(&response), vec!["Apple iPhone 12 Pro Max", "Samsung Galaxy Z Fold2"]);
    }

    #[tokio::test]
    async fn test_get_products_propagates_upstream_failure() {
        let mut mock_client = MockProductClient::new();
        mock_client
            .expect_list_all()
            .returning(|| Err(ProductError::external(StatusCode::BAD_GATEWAY, "down")));

        let service = ProductService::new(mock_client);
        let err = service
            .get_products(ProductSearchParams::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ProductError::ExternalApi { status: Some(502), .. }));
    }

    #[tokio::test]
    async fn test_get_product_by_id_found() {
        let mut mock_client = MockProductClient::new();
        mock_client
            .expect_get_by_id()
            .with(eq(3))
            .returning(|id| Ok(Some(product(id, "Apple iPhone 12 Pro Max"))));

        let service = ProductService::new(mock_client);
        let found = service.get_product_by_id(3).await.unwrap();

        assert_eq!(found.id, Some(3));
    }

    #[tokio::test]
    async fn test_get_product_by_id_missing_is_not_found() {
        let mut mock_client = MockProductClient::new();
        mock_client
            .expect_get_by_id()
            .with(eq(999))
            .returning(|_| Ok(None));

        let service = ProductService::new(mock_client);
        let err = service.get_product_by_id(999).await.unwrap_err();

        assert!(matches!(err, ProductError::NotFound(999)));
        assert_eq!(err.to_string(), "Product with ID 999 not found");
    }

    #[tokio::test]
    async fn test_create_product_forwards_payload() {
        let mut mock_client = MockProductClient::new();
        mock_client
            .expect_create()
            .withf(|p| p.id.is_none() && p.name == "Apple iPad")
            .times(1)
            .returning(|p| Ok(Product { id: Some(14), ..p }));

        let service = ProductService::new(mock_client);
        let created = service
            .create_product(Product {
                id: None,
                name: "Apple iPad".to_string(),
                data: ProductData::default(),
            })
            .await
            .unwrap();

        assert_eq!(created.id, Some(14));
        assert_eq!(created.name, "Apple iPad");
    }

    #[tokio::test]
    async fn test_delete_product() {
        let mut mock_client = MockProductClient::new();
        mock_client
            .expect_delete()
            .with(eq(4))
            .returning(|_| Ok(true));

        let service = ProductService::new(mock_client);
        assert!(service.delete_product(4).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_missing_product_is_not_found() {
        let mut mock_client = MockProductClient::new();
        mock_client
            .expect_delete()
            .with(eq(42))
            .returning(|_| Ok(false));

        let service = ProductService::new(mock_client);
        let err = service.delete_product(42).await.unwrap_err();

        assert!(matches!(err, ProductError::NotFound(42)));
    }
}
