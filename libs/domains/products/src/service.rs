//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{ImageSource, NewProduct, Product, ProductChanges, ProductInput};
use crate::repository::ProductRepository;
use crate::storage::ImageStore;

/// Product service providing business logic operations
///
/// Validates input, stores uploaded images and orchestrates repository
/// operations.
pub struct ProductService<R: ProductRepository, S: ImageStore> {
    repository: Arc<R>,
    images: Arc<S>,
}

impl<R: ProductRepository, S: ImageStore> ProductService<R, S> {
    pub fn new(repository: R, images: S) -> Self {
        Self {
            repository: Arc::new(repository),
            images: Arc::new(images),
        }
    }

    /// Create a new product.
    ///
    /// `name`, `description`, `price` and `category` must be present; blank
    /// strings count as missing. A price of `0` is accepted. Uploaded images
    /// are stored before the document is inserted.
    #[instrument(skip(self, input, image))]
    pub async fn create_product(
        &self,
        input: ProductInput,
        image: ImageSource,
    ) -> ProductResult<Product> {
        let new_product = Self::required_fields(input)?;
        let image_url = self.resolve_image(image).await?;

        self.repository
            .create(NewProduct {
                image_url,
                ..new_product
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Every product, newest first
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.list().await
    }

    #[instrument(skip(self))]
    pub async fn list_by_category(&self, category: &str) -> ProductResult<Vec<Product>> {
        self.repository.list_by_category(category).await
    }

    /// Update an existing product.
    ///
    /// Only fields present in `input` are written, zero values included.
    /// The image is replaced only when `image` is not [`ImageSource::None`].
    #[instrument(skip(self, input, image))]
    pub async fn update_product(
        &self,
        id: Uuid,
        input: ProductInput,
        image: ImageSource,
    ) -> ProductResult<Product> {
        input.validate()?;

        if self.repository.get_by_id(id).await?.is_none() {
            return Err(ProductError::NotFound(id));
        }

        let mut changes = ProductChanges::from(input);
        changes.image_url = self.resolve_image(image).await?;

        self.repository
            .update(id, changes)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> ProductResult<()> {
        if !self.repository.delete(id).await? {
            return Err(ProductError::NotFound(id));
        }
        Ok(())
    }

    async fn resolve_image(&self, image: ImageSource) -> ProductResult<Option<String>> {
        match image {
            ImageSource::None => Ok(None),
            ImageSource::Url(url) => Ok(Some(url)),
            ImageSource::Upload(upload) => self.images.store(upload).await.map(Some),
        }
    }

    fn required_fields(input: ProductInput) -> ProductResult<NewProduct> {
        let blank = |value: &Option<String>| !value.as_deref().is_some_and(|v| !v.trim().is_empty());

        let missing: Vec<&str> = [
            ("name", blank(&input.name)),
            ("description", blank(&input.description)),
            ("price", input.price.is_none()),
            ("category", blank(&input.category)),
        ]
        .into_iter()
        .filter_map(|(field, is_missing)| is_missing.then_some(field))
        .collect();

        if !missing.is_empty() {
            return Err(ProductError::Validation(format!(
                "All fields are required: {}",
                missing.join(", ")
            )));
        }

        input.validate()?;

        Ok(NewProduct {
            name: input.name.unwrap_or_default(),
            description: input.description.unwrap_or_default(),
            price: input.price.unwrap_or_default(),
            category: input.category.unwrap_or_default(),
            quantity: input.quantity.unwrap_or(0),
            image_url: None,
        })
    }
}

impl<R: ProductRepository, S: ImageStore> Clone for ProductService<R, S> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            images: Arc::clone(&self.images),
        }
    }
}
