use chrono::{DateTime, Utc};

use crate::domain::{MatchId, RepoError, UserId};

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RatingValue(u8);

#[derive(Debug, thiserror::Error)]
#[error("rating must be between 1 and 10, got {value}")]
pub struct InvalidRating {
    pub value: i64,
}

impl RatingValue {
    pub fn new(value: i64) -> Result<Self, InvalidRating> {
        if (MIN_RATING..=MAX_RATING).contains(&value) {
            Ok(RatingValue(value as u8))
        } else {
            Err(InvalidRating { value })
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

#[derive(Clone, Debug)]
pub struct NewRating {
    pub match_id: MatchId,
    pub user_id: UserId,
    pub admin_id: UserId,
    pub value: RatingValue,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct RatingHistoryEntry {
    pub match_id: MatchId,
    pub match_title: Option<String>,
    pub value: RatingValue,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RatingSummary {
    pub count: u32,
    pub total: i64,
}

impl RatingSummary {
    pub fn average(&self) -> Option<f64> {
        if self.count == 0 {
            return None;
        }
        Some(self.total as f64 / self.count as f64)
    }
}

#[async_trait::async_trait]
pub trait RatingRepository {
    async fn insert_rating(&self, rating: NewRating) -> Result<(), RepoError>;
    /// Newest first.
    async fn list_ratings_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<RatingHistoryEntry>, RepoError>;
    async fn rating_summary(&self, user_id: UserId) -> Result<RatingSummary, RepoError>;
}
