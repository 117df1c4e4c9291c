use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use axum_helpers::JwtAuth;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{LoginRequest, LoginResponse, Role, SignupRequest, User, normalize_email};
use crate::repository::UserRepository;

/// Service layer for signup, login and promotion
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    jwt: JwtAuth,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R, jwt: JwtAuth) -> Self {
        Self {
            repository: Arc::new(repository),
            jwt,
        }
    }

    /// Token issuer, shared with the route guards
    pub fn jwt(&self) -> &JwtAuth {
        &self.jwt
    }

    /// Registers a user with role `user`.
    ///
    /// A taken email fails with [`UserError::DuplicateEmail`] and leaves the
    /// existing account untouched.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn signup(&self, input: SignupRequest) -> UserResult<User> {
        input.validate()?;

        let password_hash = hash_password(input.password).await?;
        let user = User::new(input.username, normalize_email(&input.email), password_hash);

        self.repository.create(user).await
    }

    /// Checks credentials and issues a one hour token carrying the user's role.
    ///
    /// Unknown email and wrong password fail identically.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginRequest) -> UserResult<LoginResponse> {
        input.validate()?;

        let Some(user) = self
            .repository
            .get_by_email(&normalize_email(&input.email))
            .await?
        else {
            tracing::info!("Login for unknown email");
            return Err(UserError::InvalidCredentials);
        };

        if !verify_password(input.password, user.password_hash.clone()).await? {
            tracing::info!(user_id = %user.id, "Password mismatch");
            return Err(UserError::InvalidCredentials);
        }

        let token = self
            .jwt
            .create_token(&user.id.to_string(), user.role.as_str())
            .map_err(|e| UserError::Token(e.to_string()))?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(LoginResponse {
            token,
            role: user.role,
        })
    }

    /// Makes the first user named `username` an admin
    #[instrument(skip(self))]
    pub async fn promote(&self, username: &str) -> UserResult<User> {
        self.repository
            .set_role(username, Role::Admin)
            .await?
            .ok_or_else(|| UserError::NotFound(username.to_string()))
    }
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            jwt: self.jwt.clone(),
        }
    }
}

// Argon2 is CPU bound; keep it off the async workers.

async fn hash_password(password: String) -> UserResult<String> {
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| UserError::PasswordHash(e.to_string()))
    })
    .await
    .map_err(|e| UserError::Internal(e.to_string()))?
}

async fn verify_password(password: String, hash: String) -> UserResult<bool> {
    tokio::task::spawn_blocking(move || {
        let parsed_hash =
            PasswordHash::new(&hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    })
    .await
    .map_err(|e| UserError::Internal(e.to_string()))?
}
