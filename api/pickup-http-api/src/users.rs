use axum::{
    Json,
    extract::State,
};
use pickup_app::{
    domain::{UserId, rating::RatingHistoryEntry, stats::UserStats, user::PlayerProfile},
    workflow::{player::get_profile::GetProfileError, rating::history::ListRatingsError},
};

use crate::{AppState, ServiceError, auth::Auth, extract::PathParam};

#[derive(serde::Serialize)]
pub struct JsonProfile {
    id: i64,
    name: String,
    position: Option<String>,
    level: Option<i32>,
    avatar_url: Option<String>,
}

impl From<PlayerProfile> for JsonProfile {
    fn from(profile: PlayerProfile) -> Self {
        JsonProfile {
            id: profile.user_id.0,
            name: profile.name,
            position: profile.position,
            level: profile.level,
            avatar_url: profile.avatar_url,
        }
    }
}

pub async fn who_am_i(
    Auth(user_id): Auth,
    State(app): State<AppState>,
) -> Result<Json<JsonProfile>, ServiceError> {
    let profile = app
        .app
        .player_profile_use_case
        .get_profile(user_id)
        .await
        .map_err(|e| match e {
            GetProfileError::NotFound => ServiceError::NotFound("User not found".to_string()),
            GetProfileError::Internal => {
                ServiceError::Internal("Failed to load profile".to_string())
            }
        })?;
    Ok(Json(JsonProfile::from(profile)))
}

#[derive(serde::Serialize)]
pub struct JsonRatingHistoryEntry {
    match_id: i64,
    match_title: Option<String>,
    rating: u8,
    comment: Option<String>,
    created_at: String,
}

impl From<RatingHistoryEntry> for JsonRatingHistoryEntry {
    fn from(entry: RatingHistoryEntry) -> Self {
        JsonRatingHistoryEntry {
            match_id: entry.match_id.0,
            match_title: entry.match_title,
            rating: entry.value.value(),
            comment: entry.comment,
            created_at: entry.created_at.to_rfc3339(),
        }
    }
}

pub async fn get_ratings(
    PathParam(id): PathParam<i64>,
    State(app): State<AppState>,
) -> Result<Json<Vec<JsonRatingHistoryEntry>>, ServiceError> {
    let ratings = app
        .app
        .rating_history_use_case
        .list_ratings(UserId(id))
        .await
        .map_err(|ListRatingsError::Internal| {
            ServiceError::Internal("Failed to load ratings".to_string())
        })?;
    Ok(Json(
        ratings
            .into_iter()
            .map(JsonRatingHistoryEntry::from)
            .collect(),
    ))
}

#[derive(serde::Serialize)]
pub struct JsonUserStats {
    matches_played: u32,
    matches_accepted: u32,
    avg_rating: Option<f64>,
    total_ratings: u32,
}

impl From<UserStats> for JsonUserStats {
    fn from(stats: UserStats) -> Self {
        JsonUserStats {
            matches_played: stats.matches_played,
            matches_accepted: stats.matches_accepted,
            avg_rating: stats.avg_rating,
            total_ratings: stats.total_ratings,
        }
    }
}

pub async fn get_stats(
    PathParam(id): PathParam<i64>,
    State(app): State<AppState>,
) -> Json<JsonUserStats> {
    let stats = app.app.player_stats_use_case.get_stats(UserId(id)).await;
    Json(JsonUserStats::from(stats))
}
