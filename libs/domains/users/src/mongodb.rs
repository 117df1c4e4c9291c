//! MongoDB implementation of UserRepository

use async_trait::async_trait;
use chrono::Utc;
use database::mongodb::is_duplicate_key_error;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{doc, to_bson},
    options::{IndexOptions, ReturnDocument},
};
use tracing::instrument;

use crate::error::{UserError, UserResult};
use crate::models::{Role, User};
use crate::repository::UserRepository;

pub const COLLECTION: &str = "users";

/// MongoDB implementation of the UserRepository
///
/// Email uniqueness relies on the unique index created by
/// [`MongoUserRepository::init_indexes`].
#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, COLLECTION)
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<User>(collection_name);
        Self { collection }
    }

    /// Creates the unique email index and the username lookup index
    pub async fn init_indexes(&self) -> UserResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "email": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name("idx_email_unique".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "username": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_username".to_string())
                        .build(),
                )
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("User indexes created successfully");
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self, user), fields(user_id = %user.id, email = %user.email))]
    async fn create(&self, user: User) -> UserResult<User> {
        match self.collection.insert_one(&user).await {
            Ok(_) => {
                tracing::info!("Created user");
                Ok(user)
            }
            Err(e) if is_duplicate_key_error(&e) => Err(UserError::DuplicateEmail(user.email)),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let user = self.collection.find_one(doc! { "email": email }).await?;
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn set_role(&self, username: &str, role: Role) -> UserResult<Option<User>> {
        let updated_at = to_bson(&Utc::now()).map_err(|e| UserError::Internal(e.to_string()))?;

        let user = self
            .collection
            .find_one_and_update(
                doc! { "username": username },
                doc! { "$set": { "role": role.as_str(), "updated_at": updated_at } },
            )
            .sort(doc! { "_id": 1 })
            .return_document(ReturnDocument::After)
            .await?;

        if let Some(ref user) = user {
            tracing::info!(user_id = %user.id, role = %role, "Updated user role");
        }
        Ok(user)
    }
}
