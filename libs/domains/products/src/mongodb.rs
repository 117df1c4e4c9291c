//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::{FindOptions, IndexOptions, ReturnDocument},
    Collection, Database, IndexModel,
};
use serde::Serialize;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{NewProduct, Product, ProductChanges};
use crate::repository::ProductRepository;

pub const COLLECTION: &str = "products";

/// MongoDB implementation of the ProductRepository
#[derive(Clone)]
pub struct MongoProductRepository {
    collection: Collection<Product>,
}

/// `$set` body for an update; absent fields are left out of the document
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SetFields<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    quantity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_url: Option<&'a str>,
    updated_at: DateTime<Utc>,
}

impl<'a> SetFields<'a> {
    fn new(changes: &'a ProductChanges, now: DateTime<Utc>) -> Self {
        Self {
            name: changes.name.as_deref(),
            description: changes.description.as_deref(),
            price: changes.price,
            category: changes.category.as_deref(),
            quantity: changes.quantity,
            image_url: changes.image_url.as_deref(),
            updated_at: now,
        }
    }
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, COLLECTION)
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Product>(collection_name);
        Self { collection }
    }

    /// Creates the category index used by the category listing
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let indexes = vec![IndexModel::builder()
            .keys(doc! { "category": 1, "_id": -1 })
            .options(
                IndexOptions::builder()
                    .name("idx_category".to_string())
                    .build(),
            )
            .build()];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }

    fn id_filter(id: Uuid) -> Document {
        doc! { "_id": id.to_string() }
    }

    async fn find_newest_first(&self, filter: Document) -> ProductResult<Vec<Product>> {
        // v7 ids stored as strings sort by creation time
        let options = FindOptions::builder().sort(doc! { "_id": -1 }).build();

        let cursor = self.collection.find(filter).with_options(options).await?;
        let products: Vec<Product> = cursor.try_collect().await?;
        Ok(products)
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    async fn create(&self, input: NewProduct) -> ProductResult<Product> {
        let product = Product::new(input);

        self.collection.insert_one(&product).await?;

        tracing::info!(product_id = %product.id, "Product created successfully");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let product = self.collection.find_one(Self::id_filter(id)).await?;
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> ProductResult<Vec<Product>> {
        self.find_newest_first(doc! {}).await
    }

    #[instrument(skip(self))]
    async fn list_by_category(&self, category: &str) -> ProductResult<Vec<Product>> {
        self.find_newest_first(doc! { "category": category }).await
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: Uuid, changes: ProductChanges) -> ProductResult<Option<Product>> {
        let set = mongodb::bson::to_document(&SetFields::new(&changes, Utc::now()))
            .map_err(|e| ProductError::Internal(e.to_string()))?;

        let updated = self
            .collection
            .find_one_and_update(Self::id_filter(id), doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?;

        if updated.is_some() {
            tracing::info!(product_id = %id, "Product updated successfully");
        }
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        let result = self.collection.delete_one(Self::id_filter(id)).await?;

        let deleted = result.deleted_count > 0;
        if deleted {
            tracing::info!(product_id = %id, "Product deleted successfully");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_fields_skip_absent_values() {
        let changes = ProductChanges {
            price: Some(0.0),
            quantity: Some(0),
            ..Default::default()
        };
        let set = mongodb::bson::to_document(&SetFields::new(&changes, Utc::now())).unwrap();

        assert_eq!(set.get_f64("price").unwrap(), 0.0);
        assert_eq!(set.get_i32("quantity").unwrap(), 0);
        assert!(set.contains_key("updatedAt"));
        assert!(!set.contains_key("name"));
        assert!(!set.contains_key("imageUrl"));
    }

    #[test]
    fn test_product_id_is_stored_as_string() {
        let product = Product::new(NewProduct {
            name: "Lamp".into(),
            description: "Warm".into(),
            price: 1.0,
            category: "lighting".into(),
            quantity: 0,
            image_url: None,
        });
        let stored = mongodb::bson::to_document(&product).unwrap();

        assert_eq!(stored.get_str("_id").unwrap(), product.id.to_string());
        assert_eq!(
            MongoProductRepository::id_filter(product.id).get_str("_id").unwrap(),
            product.id.to_string()
        );
    }
}
