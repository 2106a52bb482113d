use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::domain::{
    MatchId, ParticipationId, RepoError, RepoRetrieveError, RepoUpdateError, UserId,
    lineup::LineupAssignment, user::PlayerProfile,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParticipationStatus {
    Pending,
    Accepted,
    Rejected,
}

#[derive(Debug, thiserror::Error)]
#[error("invalid participation status '{0}'")]
pub struct InvalidStatus(pub String);

impl ParticipationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipationStatus::Pending => "pending",
            ParticipationStatus::Accepted => "accepted",
            ParticipationStatus::Rejected => "rejected",
        }
    }

    fn listing_rank(&self) -> u8 {
        match self {
            ParticipationStatus::Accepted => 0,
            ParticipationStatus::Pending => 1,
            ParticipationStatus::Rejected => 2,
        }
    }
}

impl FromStr for ParticipationStatus {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ParticipationStatus::Pending),
            "accepted" => Ok(ParticipationStatus::Accepted),
            "rejected" => Ok(ParticipationStatus::Rejected),
            other => Err(InvalidStatus(other.to_string())),
        }
    }
}

impl std::fmt::Display for ParticipationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Team {
    A,
    B,
}

impl Team {
    pub fn as_str(&self) -> &'static str {
        match self {
            Team::A => "A",
            Team::B => "B",
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid team '{0}'")]
pub struct InvalidTeam(pub String);

impl FromStr for Team {
    type Err = InvalidTeam;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(Team::A),
            "B" => Ok(Team::B),
            other => Err(InvalidTeam(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParticipationRecord {
    pub id: ParticipationId,
    pub match_id: MatchId,
    pub user_id: UserId,
    pub status: ParticipationStatus,
    pub team: Option<Team>,
    pub slot: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ParticipationRecord {
    pub fn pending(
        id: ParticipationId,
        match_id: MatchId,
        user_id: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            match_id,
            user_id,
            status: ParticipationStatus::Pending,
            team: None,
            slot: None,
            created_at,
        }
    }

    /// Any status may follow any other. A record that is not accepted never
    /// keeps a lineup assignment.
    pub fn set_status(&mut self, status: ParticipationStatus) {
        self.status = status;
        if status != ParticipationStatus::Accepted {
            self.team = None;
            self.slot = None;
        }
    }

    #[cfg(test)]
    pub(crate) fn assign(&mut self, team: Team, slot: &str) {
        if self.status == ParticipationStatus::Accepted {
            self.team = Some(team);
            self.slot = Some(slot.to_string());
        }
    }

    pub fn is_in_lineup(&self) -> bool {
        self.status == ParticipationStatus::Accepted && self.team.is_some()
    }
}

#[derive(Clone, Debug)]
pub struct RosterEntry {
    pub record: ParticipationRecord,
    pub profile: PlayerProfile,
}

/// Accepted players first, then pending, then rejected; earliest request first
/// inside each group.
pub fn sort_roster(entries: &mut [RosterEntry]) {
    entries.sort_by_key(|entry| {
        (
            entry.record.status.listing_rank(),
            entry.record.created_at,
            entry.record.id,
        )
    });
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoinOutcome {
    Created,
    AlreadyRequested,
}

impl JoinOutcome {
    pub fn created(&self) -> bool {
        matches!(self, JoinOutcome::Created)
    }
}

#[async_trait::async_trait]
pub trait RosterRepository {
    /// Creates a pending record unless one already exists for the pair. Must be
    /// atomic with respect to concurrent requests for the same pair.
    async fn insert_if_absent(
        &self,
        match_id: MatchId,
        user_id: UserId,
        created_at: DateTime<Utc>,
    ) -> Result<JoinOutcome, RepoError>;
    async fn get_record(
        &self,
        match_id: MatchId,
        user_id: UserId,
    ) -> Result<ParticipationRecord, RepoRetrieveError>;
    /// Single atomic update. Team and slot are cleared unless the new status
    /// is accepted.
    async fn update_status(
        &self,
        match_id: MatchId,
        user_id: UserId,
        status: ParticipationStatus,
    ) -> Result<(), RepoUpdateError>;
    async fn list_roster(&self, match_id: MatchId) -> Result<Vec<RosterEntry>, RepoError>;
    /// Overwrites team and slot of every assigned record in one transaction.
    async fn save_lineup(
        &self,
        match_id: MatchId,
        assignments: &[LineupAssignment],
    ) -> Result<(), RepoError>;
    async fn count_matches_for_user(&self, user_id: UserId) -> Result<u32, RepoError>;
    async fn count_accepted_matches_for_user(&self, user_id: UserId) -> Result<u32, RepoError>;
}
