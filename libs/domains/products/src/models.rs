use bytes::Bytes;
use chrono::{DateTime, Utc};
use database::mongodb::serde_helpers::uuid_as_string;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Product entity, stored in the `products` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (UUID v7, stored as `_id`)
    #[serde(rename = "_id", with = "uuid_as_string")]
    #[schema(value_type = String, format = Uuid)]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    /// Exact-match filter key
    pub category: String,
    pub quantity: i32,
    /// `/uploads/<file>` for stored uploads, a caller supplied URL, or null
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(input: NewProduct) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            description: input.description,
            price: input.price,
            category: input.category,
            quantity: input.quantity,
            image_url: input.image_url,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrites every field present in `changes` and bumps `updated_at`
    pub fn apply(&mut self, changes: ProductChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        if let Some(category) = changes.category {
            self.category = category;
        }
        if let Some(quantity) = changes.quantity {
            self.quantity = quantity;
        }
        if let Some(image_url) = changes.image_url {
            self.image_url = Some(image_url);
        }
        self.updated_at = Utc::now();
    }
}

/// Request body for creating or updating a product.
///
/// Every field is optional on the wire so that presence can be told apart
/// from zero values: on create the service reports missing required fields,
/// on update only present fields are written.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    #[validate(custom(function = "not_blank", message = "Name must not be empty"))]
    #[schema(example = "Desk lamp")]
    pub name: Option<String>,
    #[validate(custom(function = "not_blank", message = "Description must not be empty"))]
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "Price must be zero or greater"))]
    #[schema(example = 24.5)]
    pub price: Option<f64>,
    #[validate(custom(function = "not_blank", message = "Category must not be empty"))]
    #[schema(example = "lighting")]
    pub category: Option<String>,
    #[validate(range(min = 0, message = "Quantity must be zero or greater"))]
    pub quantity: Option<i32>,
    /// Image URL to store as-is; ignored when a file is uploaded
    pub image_url: Option<String>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Validated fields for a new product
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub quantity: i32,
    pub image_url: Option<String>,
}

/// Fields to overwrite on update; `None` leaves the stored value untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub quantity: Option<i32>,
    pub image_url: Option<String>,
}

impl From<ProductInput> for ProductChanges {
    fn from(input: ProductInput) -> Self {
        Self {
            name: input.name,
            description: input.description,
            price: input.price,
            category: input.category,
            quantity: input.quantity,
            image_url: None,
        }
    }
}

/// A file received in the `image` part of a multipart body
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedImage {
    /// Client supplied file name, only used for its extension
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Where a product's image comes from
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ImageSource {
    #[default]
    None,
    Url(String),
    Upload(UploadedImage),
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Product deleted successfully")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
