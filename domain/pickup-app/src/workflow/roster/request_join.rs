use std::sync::Arc;

use crate::domain::{
    MatchId, RepoError, RepoRetrieveError, UserId,
    r#match::MatchRepository,
    roster::{JoinOutcome, RosterRepository},
};

#[async_trait::async_trait]
pub trait RequestJoinUseCase {
    async fn request_join(
        &self,
        match_id: MatchId,
        user_id: UserId,
    ) -> Result<JoinOutcome, RequestJoinError>;
}

#[derive(Debug, PartialEq, Eq)]
pub enum RequestJoinError {
    MatchNotFound,
    Internal,
}

pub struct RequestJoinUseCaseImpl<M: MatchRepository, R: RosterRepository> {
    match_repository: Arc<M>,
    roster_repository: Arc<R>,
}

impl<M: MatchRepository, R: RosterRepository> RequestJoinUseCaseImpl<M, R> {
    pub fn new(match_repository: Arc<M>, roster_repository: Arc<R>) -> Self {
        Self {
            match_repository,
            roster_repository,
        }
    }
}

#[async_trait::async_trait]
impl<M, R> RequestJoinUseCase for RequestJoinUseCaseImpl<M, R>
where
    M: MatchRepository + Send + Sync + 'static,
    R: RosterRepository + Send + Sync + 'static,
{
    async fn request_join(
        &self,
        match_id: MatchId,
        user_id: UserId,
    ) -> Result<JoinOutcome, RequestJoinError> {
        match self.match_repository.get_match(match_id).await {
            Ok(_) => {}
            Err(RepoRetrieveError::NotFound) => return Err(RequestJoinError::MatchNotFound),
            Err(RepoRetrieveError::StorageError(e)) => {
                log::error!("Failed to load match {}: {}", match_id, e);
                return Err(RequestJoinError::Internal);
            }
        }

        match self
            .roster_repository
            .insert_if_absent(match_id, user_id, chrono::Utc::now())
            .await
        {
            Ok(JoinOutcome::Created) => {
                log::info!("User {} requested to join match {}", user_id, match_id);
                Ok(JoinOutcome::Created)
            }
            Ok(JoinOutcome::AlreadyRequested) => {
                log::debug!(
                    "User {} already has a request for match {}",
                    user_id,
                    match_id
                );
                Ok(JoinOutcome::AlreadyRequested)
            }
            Err(RepoError::StorageError(e)) => {
                log::error!(
                    "Failed to store join request of user {} for match {}: {}",
                    user_id,
                    match_id,
                    e
                );
                Err(RequestJoinError::Internal)
            }
        }
    }
}
