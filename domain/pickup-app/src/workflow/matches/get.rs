use std::sync::Arc;

use crate::domain::{
    MatchId, RepoError, RepoRetrieveError,
    r#match::{Match, MatchRepository},
    roster::{RosterEntry, RosterRepository, sort_roster},
};

#[derive(Clone, Debug)]
pub struct MatchDetails {
    pub r#match: Match,
    pub participants: Vec<RosterEntry>,
}

#[async_trait::async_trait]
pub trait GetMatchDetailsUseCase {
    async fn get_match(&self, match_id: MatchId) -> Result<MatchDetails, GetMatchError>;
}

#[derive(Debug)]
pub enum GetMatchError {
    NotFound,
    Internal,
}

pub struct GetMatchDetailsUseCaseImpl<M: MatchRepository, R: RosterRepository> {
    match_repository: Arc<M>,
    roster_repository: Arc<R>,
}

impl<M: MatchRepository, R: RosterRepository> GetMatchDetailsUseCaseImpl<M, R> {
    pub fn new(match_repository: Arc<M>, roster_repository: Arc<R>) -> Self {
        Self {
            match_repository,
            roster_repository,
        }
    }
}

#[async_trait::async_trait]
impl<M, R> GetMatchDetailsUseCase for GetMatchDetailsUseCaseImpl<M, R>
where
    M: MatchRepository + Send + Sync + 'static,
    R: RosterRepository + Send + Sync + 'static,
{
    async fn get_match(&self, match_id: MatchId) -> Result<MatchDetails, GetMatchError> {
        let match_entry = match self.match_repository.get_match(match_id).await {
            Ok(match_entry) => match_entry,
            Err(RepoRetrieveError::NotFound) => return Err(GetMatchError::NotFound),
            Err(RepoRetrieveError::StorageError(e)) => {
                log::error!("Failed to load match {}: {}", match_id, e);
                return Err(GetMatchError::Internal);
            }
        };
        let mut participants = match self.roster_repository.list_roster(match_id).await {
            Ok(participants) => participants,
            Err(RepoError::StorageError(e)) => {
                log::error!("Failed to list roster of match {}: {}", match_id, e);
                return Err(GetMatchError::Internal);
            }
        };
        sort_roster(&mut participants);
        Ok(MatchDetails {
            r#match: match_entry,
            participants,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{UserId, roster::ParticipationStatus},
        testing::InMemoryStore,
    };

    #[tokio::test]
    async fn test_details_include_ordered_roster() {
        let store = Arc::new(InMemoryStore::new());
        let match_id = store.add_match(UserId(1));
        store.add_participant(match_id, UserId(2), ParticipationStatus::Pending);
        store.add_participant(match_id, UserId(3), ParticipationStatus::Accepted);
        let use_case = GetMatchDetailsUseCaseImpl::new(store.clone(), store.clone());

        let details = use_case.get_match(match_id).await.unwrap();

        assert_eq!(details.r#match.owner, UserId(1));
        let users: Vec<i64> = details
            .participants
            .iter()
            .map(|p| p.record.user_id.0)
            .collect();
        assert_eq!(users, vec![3, 2]);

        assert!(matches!(
            use_case.get_match(MatchId(500)).await,
            Err(GetMatchError::NotFound)
        ));
    }
}
