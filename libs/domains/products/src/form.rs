//! Request body extractor accepting either JSON or `multipart/form-data`.

use axum::{
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Json,
};
use axum_helpers::AppError;
use utoipa::ToSchema;

use crate::models::{ImageSource, ProductInput, UploadedImage};

/// Multipart part carrying the image file
pub const IMAGE_FIELD: &str = "image";

/// Product fields plus the resolved image, from either body kind.
///
/// JSON bodies take the image from `imageUrl`. Multipart bodies take text
/// parts for the fields and an optional `image` file part; a file part wins
/// over an `imageUrl` text part. Empty file parts (a form submitted without
/// choosing a file) count as no image.
#[derive(Debug)]
pub struct ProductForm {
    pub input: ProductInput,
    pub image: ImageSource,
}

impl<S> FromRequest<S> for ProductForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("multipart/form-data"));

        if is_multipart {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            from_multipart(multipart).await
        } else {
            let Json(mut input) = Json::<ProductInput>::from_request(req, state).await?;
            let image = url_source(input.image_url.take());
            Ok(Self { input, image })
        }
    }
}

async fn from_multipart(mut multipart: Multipart) -> Result<ProductForm, AppError> {
    let mut input = ProductInput::default();
    let mut upload = None;
    let mut image_url = None;

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        if name == IMAGE_FIELD {
            let file_name = field.file_name().map(str::to_owned);
            let content_type = field.content_type().map(str::to_owned);
            let bytes = field.bytes().await?;
            if !bytes.is_empty() {
                upload = Some(UploadedImage {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            continue;
        }

        let text = field.text().await?;
        match name.as_str() {
            "name" => input.name = Some(text),
            "description" => input.description = Some(text),
            "category" => input.category = Some(text),
            "price" => input.price = parse_price(&text)?,
            "quantity" => input.quantity = parse_quantity(&text)?,
            "imageUrl" => image_url = Some(text),
            other => tracing::debug!(field = other, "Ignoring unknown form field"),
        }
    }

    let image = match upload {
        Some(upload) => ImageSource::Upload(upload),
        None => url_source(image_url),
    };

    Ok(ProductForm { input, image })
}

fn url_source(url: Option<String>) -> ImageSource {
    match url {
        Some(url) if !url.trim().is_empty() => ImageSource::Url(url),
        _ => ImageSource::None,
    }
}

fn blank_as_none(text: &str) -> Option<&str> {
    let text = text.trim();
    (!text.is_empty()).then_some(text)
}

/// Blank text counts as absent
fn parse_price(text: &str) -> Result<Option<f64>, AppError> {
    let Some(text) = blank_as_none(text) else {
        return Ok(None);
    };
    match text.parse::<f64>() {
        Ok(price) if price.is_finite() => Ok(Some(price)),
        _ => Err(AppError::BadRequest("Price must be a number".to_string())),
    }
}

fn parse_quantity(text: &str) -> Result<Option<i32>, AppError> {
    blank_as_none(text)
        .map(str::parse::<i32>)
        .transpose()
        .map_err(|_| AppError::BadRequest("Quantity must be a whole number".to_string()))
}

/// `multipart/form-data` body accepted by the create and update endpoints
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct ProductUploadForm {
    name: Option<String>,
    description: Option<String>,
    price: Option<f64>,
    category: Option<String>,
    quantity: Option<i32>,
    image_url: Option<String>,
    /// Image file, stored under `/uploads`
    #[schema(value_type = Option<String>, format = Binary)]
    image: Option<Vec<u8>>,
}
