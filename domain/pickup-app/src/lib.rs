use std::sync::Arc;

use crate::{
    domain::{
        r#match::MatchRepository, rating::RatingRepository, roster::RosterRepository,
        user::UserRepository,
    },
    workflow::{
        lineup::{
            generate::{GenerateLineupUseCase, GenerateLineupUseCaseImpl},
            get::{GetLineupUseCase, GetLineupUseCaseImpl},
        },
        matches::{
            create::{CreateMatchUseCase, CreateMatchUseCaseImpl},
            get::{GetMatchDetailsUseCase, GetMatchDetailsUseCaseImpl},
            list::{ListMatchesUseCase, ListMatchesUseCaseImpl},
        },
        player::{
            get_profile::{GetProfileUseCase, GetProfileUseCaseImpl},
            get_stats::{GetUserStatsUseCase, GetUserStatsUseCaseImpl},
        },
        rating::{
            history::{ListUserRatingsUseCase, ListUserRatingsUseCaseImpl},
            rate::{RateParticipantUseCase, RateParticipantUseCaseImpl},
        },
        roster::{
            list::{ListParticipantsUseCase, ListParticipantsUseCaseImpl},
            request_join::{RequestJoinUseCase, RequestJoinUseCaseImpl},
            set_status::{SetParticipantStatusUseCase, SetParticipantStatusUseCaseImpl},
        },
    },
};

pub mod domain;
pub mod ports;
pub mod workflow;

#[cfg(test)]
pub(crate) mod testing;

pub struct Application {
    pub match_create_use_case: Box<dyn CreateMatchUseCase + Send + Sync + 'static>,
    pub match_list_use_case: Box<dyn ListMatchesUseCase + Send + Sync + 'static>,
    pub match_get_use_case: Box<dyn GetMatchDetailsUseCase + Send + Sync + 'static>,

    pub roster_request_join_use_case: Box<dyn RequestJoinUseCase + Send + Sync + 'static>,
    pub roster_set_status_use_case: Box<dyn SetParticipantStatusUseCase + Send + Sync + 'static>,
    pub roster_list_use_case: Box<dyn ListParticipantsUseCase + Send + Sync + 'static>,

    pub lineup_generate_use_case: Box<dyn GenerateLineupUseCase + Send + Sync + 'static>,
    pub lineup_get_use_case: Box<dyn GetLineupUseCase + Send + Sync + 'static>,

    pub rating_rate_use_case: Box<dyn RateParticipantUseCase + Send + Sync + 'static>,
    pub rating_history_use_case: Box<dyn ListUserRatingsUseCase + Send + Sync + 'static>,

    pub player_stats_use_case: Box<dyn GetUserStatsUseCase + Send + Sync + 'static>,
    pub player_profile_use_case: Box<dyn GetProfileUseCase + Send + Sync + 'static>,
}

pub fn build_application<
    M: MatchRepository + Send + Sync + 'static,
    R: RosterRepository + Send + Sync + 'static,
    RT: RatingRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
>(
    match_repository: Arc<M>,
    roster_repository: Arc<R>,
    rating_repository: Arc<RT>,
    user_repository: Arc<U>,
) -> Application {
    Application {
        match_create_use_case: Box::new(CreateMatchUseCaseImpl::new(match_repository.clone())),
        match_list_use_case: Box::new(ListMatchesUseCaseImpl::new(match_repository.clone())),
        match_get_use_case: Box::new(GetMatchDetailsUseCaseImpl::new(
            match_repository.clone(),
            roster_repository.clone(),
        )),

        roster_request_join_use_case: Box::new(RequestJoinUseCaseImpl::new(
            match_repository.clone(),
            roster_repository.clone(),
        )),
        roster_set_status_use_case: Box::new(SetParticipantStatusUseCaseImpl::new(
            match_repository.clone(),
            roster_repository.clone(),
        )),
        roster_list_use_case: Box::new(ListParticipantsUseCaseImpl::new(
            roster_repository.clone(),
        )),

        lineup_generate_use_case: Box::new(GenerateLineupUseCaseImpl::new(
            match_repository.clone(),
            roster_repository.clone(),
        )),
        lineup_get_use_case: Box::new(GetLineupUseCaseImpl::new(roster_repository.clone())),

        rating_rate_use_case: Box::new(RateParticipantUseCaseImpl::new(
            match_repository.clone(),
            roster_repository.clone(),
            rating_repository.clone(),
        )),
        rating_history_use_case: Box::new(ListUserRatingsUseCaseImpl::new(
            rating_repository.clone(),
        )),

        player_stats_use_case: Box::new(GetUserStatsUseCaseImpl::new(
            roster_repository.clone(),
            rating_repository.clone(),
        )),
        player_profile_use_case: Box::new(GetProfileUseCaseImpl::new(user_repository)),
    }
}
