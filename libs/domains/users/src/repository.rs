use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{Role, User};

/// Repository trait for User persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts `user` unless its email is taken, failing with
    /// [`UserError::DuplicateEmail`]. The check and the insert are atomic.
    async fn create(&self, user: User) -> UserResult<User>;

    /// Exact match on the stored (normalized) email
    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>>;

    /// Sets the role of the first user named `username`; `None` if there is none
    async fn set_role(&self, username: &str, role: Role) -> UserResult<Option<User>>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> UserResult<User> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(UserError::DuplicateEmail(user.email));
        }

        users.insert(user.id, user.clone());

        tracing::info!(user_id = %user.id, email = %user.email, "Created user");
        Ok(user)
    }

    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn set_role(&self, username: &str, role: Role) -> UserResult<Option<User>> {
        let mut users = self.users.write().await;

        // First match in insertion order; v7 ids sort by creation time
        let Some(user) = users
            .values_mut()
            .filter(|u| u.username == username)
            .min_by_key(|u| u.id)
        else {
            return Ok(None);
        };

        user.role = role;
        user.updated_at = Utc::now();

        tracing::info!(user_id = %user.id, role = %role, "Updated user role");
        Ok(Some(user.clone()))
    }
}
