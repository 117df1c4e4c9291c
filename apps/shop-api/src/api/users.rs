//! Users API routes

use axum::Router;
use axum_helpers::JwtAuth;
use domain_users::{handlers, MongoUserRepository, UserService};

use crate::state::AppState;

/// Create users router
pub fn router(state: &AppState) -> Router {
    let repository = MongoUserRepository::new(&state.db);
    let jwt = JwtAuth::new(&state.config.jwt);
    let service = UserService::new(repository, jwt);
    handlers::router(service, state.config.promote_requires_admin)
}

/// Initialize users indexes
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    let repository = MongoUserRepository::new(&state.db);
    repository.init_indexes().await?;
    Ok(())
}
