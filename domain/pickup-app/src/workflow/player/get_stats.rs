use std::sync::Arc;

use crate::domain::{
    RepoError, UserId,
    rating::{RatingRepository, RatingSummary},
    roster::RosterRepository,
    stats::UserStats,
};

#[async_trait::async_trait]
pub trait GetUserStatsUseCase {
    /// Never fails. A sub-query that errors contributes its zero value.
    async fn get_stats(&self, user_id: UserId) -> UserStats;
}

pub struct GetUserStatsUseCaseImpl<R: RosterRepository, RT: RatingRepository> {
    roster_repository: Arc<R>,
    rating_repository: Arc<RT>,
}

impl<R: RosterRepository, RT: RatingRepository> GetUserStatsUseCaseImpl<R, RT> {
    pub fn new(roster_repository: Arc<R>, rating_repository: Arc<RT>) -> Self {
        Self {
            roster_repository,
            rating_repository,
        }
    }
}

fn or_degraded<T: Default>(result: Result<T, RepoError>, metric: &str, user_id: UserId) -> T {
    match result {
        Ok(value) => value,
        Err(RepoError::StorageError(e)) => {
            log::warn!(
                "Could not compute {} for user {}, reporting default: {}",
                metric,
                user_id,
                e
            );
            T::default()
        }
    }
}

#[async_trait::async_trait]
impl<R, RT> GetUserStatsUseCase for GetUserStatsUseCaseImpl<R, RT>
where
    R: RosterRepository + Send + Sync + 'static,
    RT: RatingRepository + Send + Sync + 'static,
{
    async fn get_stats(&self, user_id: UserId) -> UserStats {
        let (played, accepted, ratings) = tokio::join!(
            self.roster_repository.count_matches_for_user(user_id),
            self.roster_repository
                .count_accepted_matches_for_user(user_id),
            self.rating_repository.rating_summary(user_id),
        );

        let ratings: RatingSummary = or_degraded(ratings, "rating summary", user_id);
        UserStats {
            matches_played: or_degraded(played, "matches played", user_id),
            matches_accepted: or_degraded(accepted, "matches accepted", user_id),
            avg_rating: ratings.average(),
            total_ratings: ratings.count,
        }
    }
}
