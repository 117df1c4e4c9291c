use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::{NewProduct, Product, ProductChanges};

/// Repository trait for Product persistence
///
/// Listings are ordered newest first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, input: NewProduct) -> ProductResult<Product>;

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    async fn list(&self) -> ProductResult<Vec<Product>>;

    /// Products whose category equals `category` exactly
    async fn list_by_category(&self, category: &str) -> ProductResult<Vec<Product>>;

    /// Applies `changes` atomically; `None` when no product has this id
    async fn update(&self, id: Uuid, changes: ProductChanges) -> ProductResult<Option<Product>>;

    /// Returns whether a product was removed
    async fn delete(&self, id: Uuid) -> ProductResult<bool>;
}

/// In-memory implementation for testing and local runs without MongoDB
#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn newest_first(mut products: Vec<Product>) -> Vec<Product> {
        // v7 ids sort by creation time
        products.sort_by(|a, b| b.id.cmp(&a.id));
        products
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: NewProduct) -> ProductResult<Product> {
        let product = Product::new(input);
        let mut products = self.products.write().await;
        products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn list(&self) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        Ok(Self::newest_first(products.values().cloned().collect()))
    }

    async fn list_by_category(&self, category: &str) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        Ok(Self::newest_first(
            products
                .values()
                .filter(|p| p.category == category)
                .cloned()
                .collect(),
        ))
    }

    async fn update(&self, id: Uuid, changes: ProductChanges) -> ProductResult<Option<Product>> {
        let mut products = self.products.write().await;
        Ok(products.get_mut(&id).map(|product| {
            product.apply(changes);
            product.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        let mut products = self.products.write().await;
        Ok(products.remove(&id).is_some())
    }
}
