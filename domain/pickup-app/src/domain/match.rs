use chrono::NaiveDateTime;

use crate::domain::{MatchId, RepoError, RepoRetrieveError, UserId};

#[derive(Clone, Debug, PartialEq)]
pub struct Match {
    pub id: MatchId,
    pub owner: UserId,
    pub title: String,
    pub location: String,
    pub scheduled_at: NaiveDateTime,
    pub capacity: Capacity,
    pub description: Option<String>,
}

impl Match {
    pub fn is_organizer(&self, user: UserId) -> bool {
        self.owner == user
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capacity {
    Limited(u32),
    Unlimited,
}

#[derive(Debug, thiserror::Error)]
#[error("capacity must be a positive number of players, got {0}")]
pub struct InvalidCapacity(pub i64);

impl Capacity {
    pub fn new(max_players: Option<i64>) -> Result<Self, InvalidCapacity> {
        match max_players {
            None => Ok(Capacity::Unlimited),
            Some(n) if n > 0 && n <= u32::MAX as i64 => Ok(Capacity::Limited(n as u32)),
            Some(n) => Err(InvalidCapacity(n)),
        }
    }

    pub fn max_players(&self) -> Option<u32> {
        match self {
            Capacity::Limited(n) => Some(*n),
            Capacity::Unlimited => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct NewMatch {
    pub owner: UserId,
    pub title: String,
    pub location: String,
    pub scheduled_at: NaiveDateTime,
    pub capacity: Capacity,
    pub description: Option<String>,
}

/// A match as shown in the public listing.
#[derive(Clone, Debug)]
pub struct MatchSummary {
    pub r#match: Match,
    pub owner_name: Option<String>,
    pub accepted_players: u32,
}

#[async_trait::async_trait]
pub trait MatchRepository {
    async fn create_match(&self, new_match: NewMatch) -> Result<Match, RepoError>;
    async fn get_match(&self, match_id: MatchId) -> Result<Match, RepoRetrieveError>;
    /// Ordered by scheduled date and time.
    async fn list_matches(&self) -> Result<Vec<MatchSummary>, RepoError>;
}
