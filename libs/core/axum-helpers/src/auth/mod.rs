//! Stateless JWT authentication.
//!
//! - [`JwtAuth`] issues and verifies HS256 tokens
//! - [`jwt_auth_middleware`] puts verified [`JwtClaims`] into request extensions
//! - [`require_role`] gates a route on the `role` claim
//!
//! ```ignore
//! use axum::middleware::{from_fn_with_state};
//!
//! let admin_only = Router::new()
//!     .route("/promote", post(promote))
//!     .layer(from_fn_with_state("admin", require_role))
//!     .layer(from_fn_with_state(auth.clone(), jwt_auth_middleware));
//! ```

pub mod config;
pub mod jwt;
pub mod middleware;

pub use config::JwtConfig;
pub use jwt::{JwtAuth, JwtClaims, TOKEN_TTL};
pub use middleware::{jwt_auth_middleware, require_role};
