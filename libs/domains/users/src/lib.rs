//! Users Domain
//!
//! Signup, login and role promotion for shop customers.
//!
//! # Features
//!
//! - Signup with Argon2 password hashing and unique emails
//! - Login issuing HS256 tokens that carry the user's role
//! - Promotion to admin, optionally guarded by an admin token
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, password hashing, token issuing
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB and in-memory implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs, enums
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum_helpers::{JwtAuth, JwtConfig};
//! use domain_users::{InMemoryUserRepository, UserService, handlers};
//!
//! let jwt = JwtAuth::new(&JwtConfig::new("a-development-secret-of-32-chars!!").unwrap());
//! let service = UserService::new(InMemoryUserRepository::new(), jwt);
//!
//! let router = handlers::router(service, false);
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{UserError, UserResult};
pub use handlers::ApiDoc;
pub use models::{
    LoginRequest, LoginResponse, MessageResponse, PromoteRequest, Role, SignupRequest, User,
};
pub use mongodb::MongoUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
