//! Products Domain
//!
//! Product catalogue stored in MongoDB, with images uploaded to local disk.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, JSON or multipart bodies
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐     ┌─────────────┐
//! │   Service   │ ──► │ ImageStore  │  ← uploads, named by content hash
//! └──────┬──────┘     └─────────────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB and in-memory implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{handlers, DiskImageStore, MongoProductRepository, ProductService};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ::mongodb::Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("shop");
//!
//! let repository = MongoProductRepository::new(&db);
//! repository.init_indexes().await?;
//!
//! let images = DiskImageStore::new("uploads");
//! images.ensure_dir().await?;
//!
//! let service = ProductService::new(repository, images);
//! let router = handlers::router(service, 10 * 1024 * 1024);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod form;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;
pub mod storage;

// Re-export commonly used types
pub use error::{ProductError, ProductResult};
pub use form::ProductForm;
pub use handlers::ApiDoc;
pub use models::{
    ImageSource, MessageResponse, NewProduct, Product, ProductChanges, ProductInput,
    UploadedImage,
};
pub use mongodb::MongoProductRepository;
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
pub use storage::{DiskImageStore, ImageStore};
