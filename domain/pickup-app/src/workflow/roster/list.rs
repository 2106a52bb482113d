use std::sync::Arc;

use crate::domain::{
    MatchId, RepoError,
    roster::{RosterEntry, RosterRepository, sort_roster},
};

#[async_trait::async_trait]
pub trait ListParticipantsUseCase {
    async fn list_participants(
        &self,
        match_id: MatchId,
    ) -> Result<Vec<RosterEntry>, ListParticipantsError>;
}

#[derive(Debug)]
pub enum ListParticipantsError {
    Internal,
}

pub struct ListParticipantsUseCaseImpl<R: RosterRepository> {
    roster_repository: Arc<R>,
}

impl<R: RosterRepository> ListParticipantsUseCaseImpl<R> {
    pub fn new(roster_repository: Arc<R>) -> Self {
        Self { roster_repository }
    }
}

#[async_trait::async_trait]
impl<R: RosterRepository + Send + Sync + 'static> ListParticipantsUseCase
    for ListParticipantsUseCaseImpl<R>
{
    async fn list_participants(
        &self,
        match_id: MatchId,
    ) -> Result<Vec<RosterEntry>, ListParticipantsError> {
        match self.roster_repository.list_roster(match_id).await {
            Ok(mut entries) => {
                sort_roster(&mut entries);
                Ok(entries)
            }
            Err(RepoError::StorageError(e)) => {
                log::error!("Failed to list roster of match {}: {}", match_id, e);
                Err(ListParticipantsError::Internal)
            }
        }
    }
}
