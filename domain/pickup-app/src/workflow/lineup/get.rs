use std::sync::Arc;

use crate::domain::{
    MatchId, RepoError,
    roster::{RosterEntry, RosterRepository, Team, sort_roster},
};

#[async_trait::async_trait]
pub trait GetLineupUseCase {
    async fn get_lineup(&self, match_id: MatchId) -> Result<Vec<RosterEntry>, GetLineupError>;
}

#[derive(Debug)]
pub enum GetLineupError {
    Internal,
}

pub struct GetLineupUseCaseImpl<R: RosterRepository> {
    roster_repository: Arc<R>,
}

impl<R: RosterRepository> GetLineupUseCaseImpl<R> {
    pub fn new(roster_repository: Arc<R>) -> Self {
        Self { roster_repository }
    }
}

#[async_trait::async_trait]
impl<R: RosterRepository + Send + Sync + 'static> GetLineupUseCase for GetLineupUseCaseImpl<R> {
    async fn get_lineup(&self, match_id: MatchId) -> Result<Vec<RosterEntry>, GetLineupError> {
        let mut roster = match self.roster_repository.list_roster(match_id).await {
            Ok(roster) => roster,
            Err(RepoError::StorageError(e)) => {
                log::error!("Failed to load lineup of match {}: {}", match_id, e);
                return Err(GetLineupError::Internal);
            }
        };
        roster.retain(|entry| entry.record.is_in_lineup());
        sort_roster(&mut roster);
        roster.sort_by_key(|entry| entry.record.team.map(|t| t == Team::B));
        Ok(roster)
    }
}
