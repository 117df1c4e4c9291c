//! Products API routes

use axum::Router;
use domain_products::{handlers, DiskImageStore, MongoProductRepository, ProductService};

use crate::state::AppState;

/// Create products router
pub fn router(state: &AppState) -> Router {
    let repository = MongoProductRepository::new(&state.db);
    let images = DiskImageStore::new(&state.config.uploads.dir);
    let service = ProductService::new(repository, images);
    handlers::router(service, state.config.uploads.max_bytes)
}

/// Initialize products indexes
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    let repository = MongoProductRepository::new(&state.db);
    repository.init_indexes().await?;
    Ok(())
}
