//! Shop API - accounts and product catalog over REST

use axum_helpers::server::{create_production_app, create_router_with_root, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_products::{storage::UPLOADS_URL_PREFIX, DiskImageStore};
use std::time::Duration;
use tower_http::services::ServeDir;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let mongo_client =
        database::mongodb::connect_from_config_with_retry(&config.mongodb, None).await?;

    let db = mongo_client.database(config.mongodb.database());

    info!(
        "Successfully connected to MongoDB database: {}",
        config.mongodb.database()
    );

    let state = AppState {
        config: config.clone(),
        mongo_client,
        db,
    };

    api::init_indexes(&state).await?;

    DiskImageStore::new(&config.uploads.dir).ensure_dir().await?;
    info!(dir = %config.uploads.dir.display(), "Serving uploads");

    let api_routes = api::routes(&state);
    let root_routes = health_router(config.app)
        .nest_service(UPLOADS_URL_PREFIX, ServeDir::new(&config.uploads.dir));
    let app = create_router_with_root::<openapi::ApiDoc>(
        api_routes,
        root_routes,
        &config.server.cors_allowed_origins,
    )?;

    info!(
        "Starting {} v{} on port {}",
        config.app.name, config.app.version, config.server.port
    );

    create_production_app(app, &config.server, Duration::from_secs(30), async move {
        info!("Shutting down: closing MongoDB connections");
        drop(state.mongo_client);
        info!("MongoDB connection closed");
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Shop API shutdown complete");
    Ok(())
}
