use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::{
    domain::{
        MatchId, RepoError, UserId,
        lineup::{BalanceError, LineupAssignment, LineupCandidate, balance_teams},
        r#match::MatchRepository,
        roster::{ParticipationStatus, RosterRepository, sort_roster},
    },
    workflow::{OrganizerCheckError, authorize_organizer},
};

#[async_trait::async_trait]
pub trait GenerateLineupUseCase {
    async fn generate_lineup(
        &self,
        match_id: MatchId,
        actor: UserId,
    ) -> Result<Vec<LineupAssignment>, GenerateLineupError>;
}

#[derive(Debug, PartialEq, Eq)]
pub enum GenerateLineupError {
    MatchNotFound,
    Forbidden,
    InsufficientPlayers(usize),
    Internal,
}

impl From<OrganizerCheckError> for GenerateLineupError {
    fn from(e: OrganizerCheckError) -> Self {
        match e {
            OrganizerCheckError::MatchNotFound => GenerateLineupError::MatchNotFound,
            OrganizerCheckError::Forbidden => GenerateLineupError::Forbidden,
            OrganizerCheckError::Internal => GenerateLineupError::Internal,
        }
    }
}

pub struct GenerateLineupUseCaseImpl<M: MatchRepository, R: RosterRepository> {
    match_repository: Arc<M>,
    roster_repository: Arc<R>,
    running: DashMap<MatchId, Arc<Mutex<()>>>,
}

impl<M: MatchRepository, R: RosterRepository> GenerateLineupUseCaseImpl<M, R> {
    pub fn new(match_repository: Arc<M>, roster_repository: Arc<R>) -> Self {
        Self {
            match_repository,
            roster_repository,
            running: DashMap::new(),
        }
    }

    fn match_lock(&self, match_id: MatchId) -> Arc<Mutex<()>> {
        self.running.entry(match_id).or_default().clone()
    }

    /// Forgets the lock of a match once no other run holds or awaits it.
    fn release_lock(&self, match_id: MatchId, lock: Arc<Mutex<()>>) {
        drop(lock);
        self.running
            .remove_if(&match_id, |_, lock| Arc::strong_count(lock) == 1);
    }
}

impl<M, R> GenerateLineupUseCaseImpl<M, R>
where
    M: MatchRepository + Send + Sync + 'static,
    R: RosterRepository + Send + Sync + 'static,
{
    async fn run_generation(
        &self,
        match_id: MatchId,
        actor: UserId,
    ) -> Result<Vec<LineupAssignment>, GenerateLineupError> {
        authorize_organizer(self.match_repository.as_ref(), match_id, actor).await?;

        let mut roster = match self.roster_repository.list_roster(match_id).await {
            Ok(roster) => roster,
            Err(RepoError::StorageError(e)) => {
                log::error!("Failed to load roster of match {}: {}", match_id, e);
                return Err(GenerateLineupError::Internal);
            }
        };
        sort_roster(&mut roster);

        let candidates: Vec<LineupCandidate> = roster
            .into_iter()
            .filter(|entry| entry.record.status == ParticipationStatus::Accepted)
            .map(|entry| LineupCandidate {
                participation_id: entry.record.id,
                user_id: entry.record.user_id,
                position: entry.profile.position,
                level: entry.profile.level,
            })
            .collect();

        let assignments = balance_teams(&candidates).map_err(|e| match e {
            BalanceError::InsufficientPlayers(n) => GenerateLineupError::InsufficientPlayers(n),
        })?;

        if let Err(RepoError::StorageError(e)) = self
            .roster_repository
            .save_lineup(match_id, &assignments)
            .await
        {
            log::error!("Failed to save lineup of match {}: {}", match_id, e);
            return Err(GenerateLineupError::Internal);
        }

        log::info!(
            "Generated lineup for match {} with {} players",
            match_id,
            assignments.len()
        );
        Ok(assignments)
    }
}

#[async_trait::async_trait]
impl<M, R> GenerateLineupUseCase for GenerateLineupUseCaseImpl<M, R>
where
    M: MatchRepository + Send + Sync + 'static,
    R: RosterRepository + Send + Sync + 'static,
{
    async fn generate_lineup(
        &self,
        match_id: MatchId,
        actor: UserId,
    ) -> Result<Vec<LineupAssignment>, GenerateLineupError> {
        // One run per match at a time within this process.
        let lock = self.match_lock(match_id);
        let result = {
            let _guard = lock.lock().await;
            self.run_generation(match_id, actor).await
        };
        self.release_lock(match_id, lock);
        result
    }
}
