use std::sync::Arc;

use crate::domain::{
    RepoRetrieveError, UserId,
    user::{PlayerProfile, UserRepository},
};

#[async_trait::async_trait]
pub trait GetProfileUseCase {
    async fn get_profile(&self, user_id: UserId) -> Result<PlayerProfile, GetProfileError>;
}

#[derive(Debug)]
pub enum GetProfileError {
    NotFound,
    Internal,
}

pub struct GetProfileUseCaseImpl<U: UserRepository> {
    user_repository: Arc<U>,
}

impl<U: UserRepository> GetProfileUseCaseImpl<U> {
    pub fn new(user_repository: Arc<U>) -> Self {
        Self { user_repository }
    }
}

#[async_trait::async_trait]
impl<U: UserRepository + Send + Sync + 'static> GetProfileUseCase for GetProfileUseCaseImpl<U> {
    async fn get_profile(&self, user_id: UserId) -> Result<PlayerProfile, GetProfileError> {
        match self.user_repository.get_profile(user_id).await {
            Ok(profile) => Ok(profile),
            Err(RepoRetrieveError::NotFound) => Err(GetProfileError::NotFound),
            Err(RepoRetrieveError::StorageError(e)) => {
                log::error!("Failed to load profile of user {}: {}", user_id, e);
                Err(GetProfileError::Internal)
            }
        }
    }
}
