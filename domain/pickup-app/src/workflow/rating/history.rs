use std::sync::Arc;

use crate::domain::{
    RepoError, UserId,
    rating::{RatingHistoryEntry, RatingRepository},
};

#[async_trait::async_trait]
pub trait ListUserRatingsUseCase {
    async fn list_ratings(
        &self,
        user_id: UserId,
    ) -> Result<Vec<RatingHistoryEntry>, ListRatingsError>;
}

#[derive(Debug)]
pub enum ListRatingsError {
    Internal,
}

pub struct ListUserRatingsUseCaseImpl<RT: RatingRepository> {
    rating_repository: Arc<RT>,
}

impl<RT: RatingRepository> ListUserRatingsUseCaseImpl<RT> {
    pub fn new(rating_repository: Arc<RT>) -> Self {
        Self { rating_repository }
    }
}

#[async_trait::async_trait]
impl<RT: RatingRepository + Send + Sync + 'static> ListUserRatingsUseCase
    for ListUserRatingsUseCaseImpl<RT>
{
    async fn list_ratings(
        &self,
        user_id: UserId,
    ) -> Result<Vec<RatingHistoryEntry>, ListRatingsError> {
        self.rating_repository
            .list_ratings_for_user(user_id)
            .await
            .map_err(|RepoError::StorageError(e)| {
                log::error!("Failed to list ratings of user {}: {}", user_id, e);
                ListRatingsError::Internal
            })
    }
}
