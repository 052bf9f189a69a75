//! Stock and product lookups against the storefront catalog API.
//!
//! The API exposes two read endpoints:
//!
//! - `GET /stock/{id}` -> `{ "id": 1, "amount": 5 }`
//! - `GET /products/{id}` -> product metadata, 404 or an empty record when
//!   the product does not exist
//!
//! Product metadata is cached via `moka` (5-minute TTL). Stock levels are
//! never cached: every mutation validates against a fresh read.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use rocket_shoes_core::ProductId;

/// Product metadata cache TTL.
const PRODUCT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Available quantity for a product, as reported by the stock service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct StockInfo {
    /// Product the stock level refers to.
    pub id: ProductId,
    /// Units currently available.
    pub amount: u32,
}

/// Catalog metadata for a product.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product id.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price in the store currency.
    pub price: Decimal,
    /// Product image URL.
    pub image_url: String,
}

/// Errors that can occur when querying the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Product does not exist in the catalog.
    #[error("product not found: {0}")]
    NotFound(ProductId),

    /// Catalog returned an unexpected status code.
    #[error("unexpected status {0} from catalog")]
    Status(reqwest::StatusCode),
}

/// Read-only access to stock levels and product metadata.
///
/// The cart store is generic over this trait so tests can script stock
/// levels without a running catalog service.
pub trait ProductCatalog {
    /// Look up the available stock for a product.
    ///
    /// Implementations must not serve stale data; every call reflects a
    /// fresh read of the stock service.
    fn stock(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<StockInfo, CatalogError>> + Send;

    /// Look up the catalog metadata for a product.
    fn product(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<Product, CatalogError>> + Send;
}

// =============================================================================
// HttpCatalog
// =============================================================================

/// Catalog client for the storefront REST API.
///
/// Cheaply cloneable; clones share the HTTP connection pool and the
/// product metadata cache.
#[derive(Clone)]
pub struct HttpCatalog {
    inner: Arc<HttpCatalogInner>,
}

struct HttpCatalogInner {
    client: reqwest::Client,
    base_url: String,
    products: Cache<ProductId, Product>,
}

impl HttpCatalog {
    /// Create a new catalog client for the given API base URL.
    #[must_use]
    pub fn new(base_url: &Url) -> Self {
        let products = Cache::builder()
            .max_capacity(1000)
            .time_to_live(PRODUCT_CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(HttpCatalogInner {
                client: reqwest::Client::new(),
                base_url: base_url.as_str().trim_end_matches('/').to_string(),
                products,
            }),
        }
    }

    /// Fetch a resource and fail on non-success statuses.
    async fn fetch(&self, path: &str, id: ProductId) -> Result<reqwest::Response, CatalogError> {
        let url = format!("{}/{path}/{id}", self.inner.base_url);
        let response = self.inner.client.get(&url).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(id));
        }
        if !status.is_success() {
            return Err(CatalogError::Status(status));
        }

        Ok(response)
    }
}

impl ProductCatalog for HttpCatalog {
    /// Stock is never cached: every call hits the service.
    #[instrument(skip(self), fields(product_id = %id))]
    async fn stock(&self, id: ProductId) -> Result<StockInfo, CatalogError> {
        let response = self.fetch("stock", id).await?;
        Ok(response.json().await?)
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        if let Some(product) = self.inner.products.get(&id).await {
            debug!("Cache hit for product");
            return Ok(product);
        }

        let response = self.fetch("products", id).await?;

        // Some backends answer a missing id with an empty record instead
        // of a 404, so decode through Value and check before converting.
        let body: serde_json::Value = response.json().await?;
        if body.is_null() || body.as_object().is_some_and(serde_json::Map::is_empty) {
            return Err(CatalogError::NotFound(id));
        }

        let product: Product = serde_json::from_value(body)?;
        self.inner.products.insert(id, product.clone()).await;

        Ok(product)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_info_decodes() {
        let stock: StockInfo = serde_json::from_str(r#"{"id":1,"amount":5}"#).unwrap();
        assert_eq!(stock.id, ProductId::new(1));
        assert_eq!(stock.amount, 5);
    }

    #[test]
    fn test_product_decodes_camel_case() {
        let product: Product = serde_json::from_str(
            r#"{"id":2,"name":"Shoe","price":139.9,"imageUrl":"https://cdn.example.com/shoe.jpg"}"#,
        )
        .unwrap();
        assert_eq!(product.id, ProductId::new(2));
        assert_eq!(product.name, "Shoe");
        assert_eq!(product.price, Decimal::new(1399, 1));
        assert_eq!(product.image_url, "https://cdn.example.com/shoe.jpg");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let url = Url::parse("http://localhost:3333/").unwrap();
        let catalog = HttpCatalog::new(&url);
        assert_eq!(catalog.inner.base_url, "http://localhost:3333");
    }
}
