use std::sync::Arc;

use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use pickup_app::domain::{
    RepoError, RepoRetrieveError, UserId,
    user::{PlayerProfile, UserRepository},
};

use crate::{create_db_pool, entity::user};

pub struct UserRepositoryImpl {
    db: DatabaseConnection,
    profile_cache: Arc<moka::sync::Cache<UserId, PlayerProfile>>,
}

impl UserRepositoryImpl {
    pub async fn new() -> Self {
        let db = create_db_pool().await;
        Self::from_connection(db)
    }

    pub fn from_connection(db: DatabaseConnection) -> Self {
        let profile_cache = Arc::new(
            moka::sync::Cache::builder()
                .max_capacity(10_000)
                .time_to_live(std::time::Duration::from_secs(60 * 5))
                .build(),
        );
        Self { db, profile_cache }
    }

    pub fn model_to_profile(model: user::Model) -> PlayerProfile {
        PlayerProfile {
            user_id: UserId(model.id),
            name: model.name,
            position: model.position,
            level: model.level,
            avatar_url: model.avatar_url,
        }
    }

    /// Player accounts are managed outside the server; this is used by the
    /// seeding binary.
    pub async fn create_user(
        &self,
        name: &str,
        position: Option<&str>,
        level: Option<i32>,
        avatar_url: Option<&str>,
    ) -> Result<UserId, RepoError> {
        let model = user::ActiveModel {
            id: Default::default(), // Auto-increment
            name: Set(name.to_string()),
            position: Set(position.map(|p| p.to_string())),
            level: Set(level),
            avatar_url: Set(avatar_url.map(|a| a.to_string())),
        };
        let inserted = model
            .insert(&self.db)
            .await
            .map_err(|e| RepoError::StorageError(e.to_string()))?;
        Ok(UserId(inserted.id))
    }
}

#[async_trait::async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn get_profile(&self, user_id: UserId) -> Result<PlayerProfile, RepoRetrieveError> {
        if let Some(cached_profile) = self.profile_cache.get(&user_id) {
            return Ok(cached_profile);
        }

        let model = user::Entity::find_by_id(user_id.0)
            .one(&self.db)
            .await
            .map_err(|e| RepoRetrieveError::StorageError(e.to_string()))?
            .ok_or(RepoRetrieveError::NotFound)?;

        let profile = Self::model_to_profile(model);
        self.profile_cache.insert(user_id, profile.clone());
        Ok(profile)
    }
}
