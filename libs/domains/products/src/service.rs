//! Product Service - Business logic layer

use serde_json::Value;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductFilter};
use crate::repository::{ProductQueryExt, ProductRepository};

/// Product service providing business logic operations
///
/// Request bodies arrive as raw JSON and are applied through
/// [`Product::deserialize`], so missing keys and bad values surface as
/// validation errors before the repository is touched.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Create a new product from a JSON body
    #[instrument(skip(self, body))]
    pub async fn create_product(&self, body: &Value) -> ProductResult<Product> {
        let mut product = Product::default();
        product.deserialize(body)?;
        self.repository.create(product).await
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i32) -> ProductResult<Product> {
        self.repository
            .find(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Replace every field of an existing product
    #[instrument(skip(self, body))]
    pub async fn update_product(&self, id: i32, body: &Value) -> ProductResult<Product> {
        let mut product = self.get_product(id).await?;
        product.deserialize(body)?;
        self.repository.update(product).await
    }

    /// Delete a product
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i32) -> ProductResult<()> {
        let product = self.get_product(id).await?;
        self.repository.delete(&product).await
    }

    /// List products, optionally narrowed by a single filter
    #[instrument(skip(self))]
    pub async fn list_products(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        let repo = self.repository.as_ref();

        match filter {
            ProductFilter::All => repo.all().await,
            ProductFilter::Name(name) => repo.find_by_name(name).all().await,
            ProductFilter::Category(category) => repo.find_by_category(category).all().await,
            ProductFilter::Available(available) => {
                repo.find_by_availability(available).all().await
            }
            ProductFilter::Price(price) => repo.find_by_price(price)?.all().await,
        }
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
