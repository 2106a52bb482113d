use std::sync::Arc;

use crate::{
    domain::{
        MatchId, RepoUpdateError, UserId,
        r#match::MatchRepository,
        roster::{ParticipationStatus, RosterRepository},
    },
    workflow::{OrganizerCheckError, authorize_organizer},
};

#[async_trait::async_trait]
pub trait SetParticipantStatusUseCase {
    async fn set_status(
        &self,
        match_id: MatchId,
        user_id: UserId,
        actor: UserId,
        status: ParticipationStatus,
    ) -> Result<(), SetStatusError>;
}

#[derive(Debug, PartialEq, Eq)]
pub enum SetStatusError {
    MatchNotFound,
    ParticipantNotFound,
    Forbidden,
    Internal,
}

impl From<OrganizerCheckError> for SetStatusError {
    fn from(e: OrganizerCheckError) -> Self {
        match e {
            OrganizerCheckError::MatchNotFound => SetStatusError::MatchNotFound,
            OrganizerCheckError::Forbidden => SetStatusError::Forbidden,
            OrganizerCheckError::Internal => SetStatusError::Internal,
        }
    }
}

pub struct SetParticipantStatusUseCaseImpl<M: MatchRepository, R: RosterRepository> {
    match_repository: Arc<M>,
    roster_repository: Arc<R>,
}

impl<M: MatchRepository, R: RosterRepository> SetParticipantStatusUseCaseImpl<M, R> {
    pub fn new(match_repository: Arc<M>, roster_repository: Arc<R>) -> Self {
        Self {
            match_repository,
            roster_repository,
        }
    }
}

#[async_trait::async_trait]
impl<M, R> SetParticipantStatusUseCase for SetParticipantStatusUseCaseImpl<M, R>
where
    M: MatchRepository + Send + Sync + 'static,
    R: RosterRepository + Send + Sync + 'static,
{
    async fn set_status(
        &self,
        match_id: MatchId,
        user_id: UserId,
        actor: UserId,
        status: ParticipationStatus,
    ) -> Result<(), SetStatusError> {
        authorize_organizer(self.match_repository.as_ref(), match_id, actor).await?;

        match self
            .roster_repository
            .update_status(match_id, user_id, status)
            .await
        {
            Ok(()) => {
                log::info!(
                    "Participation of user {} in match {} set to {}",
                    user_id,
                    match_id,
                    status
                );
                Ok(())
            }
            Err(RepoUpdateError::NotFound) => Err(SetStatusError::ParticipantNotFound),
            Err(RepoUpdateError::StorageError(e)) => {
                log::error!(
                    "Failed to update participation of user {} in match {}: {}",
                    user_id,
                    match_id,
                    e
                );
                Err(SetStatusError::Internal)
            }
        }
    }
}
