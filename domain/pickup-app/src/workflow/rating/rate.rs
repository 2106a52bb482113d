use std::sync::Arc;

use crate::{
    domain::{
        MatchId, RepoError, RepoRetrieveError, UserId,
        r#match::MatchRepository,
        rating::{InvalidRating, NewRating, RatingRepository, RatingValue},
        roster::{ParticipationStatus, RosterRepository},
    },
    workflow::{OrganizerCheckError, authorize_organizer},
};

#[async_trait::async_trait]
pub trait RateParticipantUseCase {
    async fn rate_participant(
        &self,
        match_id: MatchId,
        actor: UserId,
        user_id: UserId,
        rating: i64,
        comment: Option<String>,
    ) -> Result<(), RateParticipantError>;
}

#[derive(Debug)]
pub enum RateParticipantError {
    InvalidRating(InvalidRating),
    MatchNotFound,
    Forbidden,
    NotAParticipant,
    Internal,
}

impl From<OrganizerCheckError> for RateParticipantError {
    fn from(e: OrganizerCheckError) -> Self {
        match e {
            OrganizerCheckError::MatchNotFound => RateParticipantError::MatchNotFound,
            OrganizerCheckError::Forbidden => RateParticipantError::Forbidden,
            OrganizerCheckError::Internal => RateParticipantError::Internal,
        }
    }
}

pub struct RateParticipantUseCaseImpl<M: MatchRepository, R: RosterRepository, RT: RatingRepository>
{
    match_repository: Arc<M>,
    roster_repository: Arc<R>,
    rating_repository: Arc<RT>,
}

impl<M: MatchRepository, R: RosterRepository, RT: RatingRepository>
    RateParticipantUseCaseImpl<M, R, RT>
{
    pub fn new(
        match_repository: Arc<M>,
        roster_repository: Arc<R>,
        rating_repository: Arc<RT>,
    ) -> Self {
        Self {
            match_repository,
            roster_repository,
            rating_repository,
        }
    }
}

#[async_trait::async_trait]
impl<M, R, RT> RateParticipantUseCase for RateParticipantUseCaseImpl<M, R, RT>
where
    M: MatchRepository + Send + Sync + 'static,
    R: RosterRepository + Send + Sync + 'static,
    RT: RatingRepository + Send + Sync + 'static,
{
    async fn rate_participant(
        &self,
        match_id: MatchId,
        actor: UserId,
        user_id: UserId,
        rating: i64,
        comment: Option<String>,
    ) -> Result<(), RateParticipantError> {
        let value = RatingValue::new(rating).map_err(RateParticipantError::InvalidRating)?;
        let comment = comment
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        authorize_organizer(self.match_repository.as_ref(), match_id, actor).await?;

        match self.roster_repository.get_record(match_id, user_id).await {
            Ok(record) if record.status == ParticipationStatus::Accepted => {}
            Ok(_) | Err(RepoRetrieveError::NotFound) => {
                return Err(RateParticipantError::NotAParticipant);
            }
            Err(RepoRetrieveError::StorageError(e)) => {
                log::error!(
                    "Failed to load participation of user {} in match {}: {}",
                    user_id,
                    match_id,
                    e
                );
                return Err(RateParticipantError::Internal);
            }
        }

        let new_rating = NewRating {
            match_id,
            user_id,
            admin_id: actor,
            value,
            comment,
            created_at: chrono::Utc::now(),
        };
        match self.rating_repository.insert_rating(new_rating).await {
            Ok(()) => {
                log::info!(
                    "User {} rated {} with {} in match {}",
                    actor,
                    user_id,
                    value.value(),
                    match_id
                );
                Ok(())
            }
            Err(RepoError::StorageError(e)) => {
                log::error!("Failed to store rating for user {}: {}", user_id, e);
                Err(RateParticipantError::Internal)
            }
        }
    }
}
