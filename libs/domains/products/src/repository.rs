use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{Category, IntoPrice, Product, ProductFilter};

/// Repository trait for Product persistence
///
/// Implementations own id assignment. Listing methods return products in
/// ascending id order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert `product` (any incoming id is discarded) and return it with
    /// its new id
    async fn create(&self, product: Product) -> ProductResult<Product>;

    /// Persist every field of an already stored product
    async fn update(&self, product: Product) -> ProductResult<Product>;

    /// Remove the stored row; absent rows are not an error
    async fn delete(&self, product: &Product) -> ProductResult<()>;

    async fn all(&self) -> ProductResult<Vec<Product>>;

    /// Primary-key lookup
    async fn find(&self, id: i32) -> ProductResult<Option<Product>>;

    /// Materialize a filter
    async fn fetch(&self, filter: &ProductFilter) -> ProductResult<Vec<Product>>;
}

/// A filtered product query that has not run yet.
///
/// Nothing touches the store until [`all`](Self::all) or
/// [`count`](Self::count) is awaited, and both may be called repeatedly;
/// each call sees the store as it is at that moment.
pub struct ProductQuery<'a, R: ProductRepository + ?Sized> {
    repository: &'a R,
    filter: ProductFilter,
}

impl<'a, R: ProductRepository + ?Sized> ProductQuery<'a, R> {
    pub fn new(repository: &'a R, filter: ProductFilter) -> Self {
        Self { repository, filter }
    }

    pub fn filter(&self) -> &ProductFilter {
        &self.filter
    }

    pub async fn all(&self) -> ProductResult<Vec<Product>> {
        self.repository.fetch(&self.filter).await
    }

    pub async fn count(&self) -> ProductResult<usize> {
        Ok(self.all().await?.len())
    }
}

/// Lazy `find_by_*` queries, available on every repository.
pub trait ProductQueryExt: ProductRepository {
    /// Case-sensitive exact name match
    fn find_by_name(&self, name: impl Into<String>) -> ProductQuery<'_, Self> {
        ProductQuery::new(self, ProductFilter::Name(name.into()))
    }

    fn find_by_category(&self, category: Category) -> ProductQuery<'_, Self> {
        ProductQuery::new(self, ProductFilter::Category(category))
    }

    fn find_by_availability(&self, available: bool) -> ProductQuery<'_, Self> {
        ProductQuery::new(self, ProductFilter::Available(available))
    }

    /// Fails when `price` is not numeric.
    fn find_by_price(&self, price: impl IntoPrice) -> ProductResult<ProductQuery<'_, Self>> {
        Ok(ProductQuery::new(
            self,
            ProductFilter::Price(price.into_price()?),
        ))
    }
}

impl<R: ProductRepository + ?Sized> ProductQueryExt for R {}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<BTreeMap<i32, Product>>>,
    last_id: Arc<AtomicI32>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, mut product: Product) -> ProductResult<Product> {
        let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
        product.id = Some(id);

        self.products.write().await.insert(id, product.clone());

        tracing::info!(product_id = id, "Created product");
        Ok(product)
    }

    async fn update(&self, product: Product) -> ProductResult<Product> {
        let id = product.id.ok_or_else(|| {
            ProductError::Validation("Update called with empty ID field".to_string())
        })?;

        let mut products = self.products.write().await;
        let stored = products.get_mut(&id).ok_or(ProductError::NotFound(id))?;
        *stored = product.clone();

        tracing::info!(product_id = id, "Updated product");
        Ok(product)
    }

    async fn delete(&self, product: &Product) -> ProductResult<()> {
        let Some(id) = product.id else {
            return Ok(());
        };

        if self.products.write().await.remove(&id).is_some() {
            tracing::info!(product_id = id, "Deleted product");
        }
        Ok(())
    }

    async fn all(&self) -> ProductResult<Vec<Product>> {
        Ok(self.products.read().await.values().cloned().collect())
    }

    async fn find(&self, id: i32) -> ProductResult<Option<Product>> {
        Ok(self.products.read().await.get(&id).cloned())
    }

    async fn fetch(&self, filter: &ProductFilter) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect())
    }
}
