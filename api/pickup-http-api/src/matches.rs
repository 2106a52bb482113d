use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use pickup_app::{
    domain::{
        MatchId, UserId,
        lineup::LineupAssignment,
        r#match::{Match, MatchSummary},
        roster::{ParticipationStatus, RosterEntry},
    },
    workflow::{
        lineup::{generate::GenerateLineupError, get::GetLineupError},
        matches::{
            create::{CreateMatchError, CreateMatchRequest},
            get::GetMatchError,
            list::ListMatchesError,
        },
        rating::rate::RateParticipantError,
        roster::{
            list::ListParticipantsError, request_join::RequestJoinError,
            set_status::SetStatusError,
        },
    },
};
use validator::Validate;

use crate::{
    AppState, MessageResponse, ServiceError,
    auth::Auth,
    extract::{JsonBody, PathParam},
};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

#[derive(serde::Serialize)]
pub struct JsonMatch {
    id: i64,
    admin_id: i64,
    title: String,
    location: String,
    date: String,
    time: String,
    max_players: Option<u32>,
    description: Option<String>,
}

impl From<&Match> for JsonMatch {
    fn from(m: &Match) -> Self {
        JsonMatch {
            id: m.id.0,
            admin_id: m.owner.0,
            title: m.title.clone(),
            location: m.location.clone(),
            date: m.scheduled_at.format(DATE_FORMAT).to_string(),
            time: m.scheduled_at.format(TIME_FORMAT).to_string(),
            max_players: m.capacity.max_players(),
            description: m.description.clone(),
        }
    }
}

#[derive(serde::Serialize)]
pub struct JsonMatchSummary {
    #[serde(flatten)]
    r#match: JsonMatch,
    admin_name: Option<String>,
    player_count: u32,
}

impl From<&MatchSummary> for JsonMatchSummary {
    fn from(summary: &MatchSummary) -> Self {
        JsonMatchSummary {
            r#match: JsonMatch::from(&summary.r#match),
            admin_name: summary.owner_name.clone(),
            player_count: summary.accepted_players,
        }
    }
}

#[derive(serde::Serialize)]
pub struct JsonParticipant {
    id: i64,
    user_id: i64,
    status: &'static str,
    team: Option<&'static str>,
    position: Option<String>,
    created_at: String,
    name: String,
    real_position: Option<String>,
    level: Option<i32>,
    avatar_url: Option<String>,
}

impl From<&RosterEntry> for JsonParticipant {
    fn from(entry: &RosterEntry) -> Self {
        JsonParticipant {
            id: entry.record.id.0,
            user_id: entry.record.user_id.0,
            status: entry.record.status.as_str(),
            team: entry.record.team.map(|t| t.as_str()),
            position: entry.record.slot.clone(),
            created_at: entry.record.created_at.to_rfc3339(),
            name: entry.profile.name.clone(),
            real_position: entry.profile.position.clone(),
            level: entry.profile.level,
            avatar_url: entry.profile.avatar_url.clone(),
        }
    }
}

#[derive(serde::Serialize)]
pub struct JsonMatchDetails {
    r#match: JsonMatch,
    players: Vec<JsonParticipant>,
}

pub async fn list_matches(
    State(app): State<AppState>,
) -> Result<Json<Vec<JsonMatchSummary>>, ServiceError> {
    let matches = app
        .app
        .match_list_use_case
        .list_matches()
        .await
        .map_err(|ListMatchesError::Internal| {
            ServiceError::Internal("Failed to list matches".to_string())
        })?;
    Ok(Json(matches.iter().map(JsonMatchSummary::from).collect()))
}

#[derive(serde::Deserialize, Validate)]
pub struct JsonCreateMatch {
    #[serde(default)]
    #[validate(length(min = 1, message = "title is required"))]
    title: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "location is required"))]
    location: String,
    #[serde(default)]
    date: String,
    #[serde(default)]
    time: String,
    #[validate(range(min = 1, message = "max_players must be positive"))]
    max_players: Option<i64>,
    description: Option<String>,
}

impl JsonCreateMatch {
    fn scheduled_at(&self) -> Result<NaiveDateTime, ServiceError> {
        let date = NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT).map_err(|_| {
            ServiceError::BadRequest("date must be formatted as YYYY-MM-DD".to_string())
        })?;
        let time = NaiveTime::parse_from_str(self.time.trim(), TIME_FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(self.time.trim(), "%H:%M:%S"))
            .map_err(|_| ServiceError::BadRequest("time must be formatted as HH:MM".to_string()))?;
        Ok(date.and_time(time))
    }

    fn into_request(self) -> Result<CreateMatchRequest, ServiceError> {
        self.validate()
            .map_err(|e| ServiceError::BadRequest(format!("Missing required fields: {}", e)))?;
        let scheduled_at = self.scheduled_at()?;
        Ok(CreateMatchRequest {
            title: self.title,
            location: self.location,
            scheduled_at,
            max_players: self.max_players,
            description: self.description,
        })
    }
}

pub async fn create_match(
    Auth(user_id): Auth,
    State(app): State<AppState>,
    JsonBody(body): JsonBody<JsonCreateMatch>,
) -> Result<(StatusCode, Json<JsonMatch>), ServiceError> {
    let request = body.into_request()?;
    let created = app
        .app
        .match_create_use_case
        .create_match(user_id, request)
        .await
        .map_err(|e| match e {
            CreateMatchError::MissingField(field) => {
                ServiceError::BadRequest(format!("{} is required", field))
            }
            CreateMatchError::InvalidCapacity(n) => {
                ServiceError::BadRequest(format!("Invalid max_players: {}", n))
            }
            CreateMatchError::Internal => {
                ServiceError::Internal("Failed to create match".to_string())
            }
        })?;
    Ok((StatusCode::CREATED, Json(JsonMatch::from(&created))))
}

pub async fn get_match(
    PathParam(id): PathParam<i64>,
    State(app): State<AppState>,
) -> Result<Json<JsonMatchDetails>, ServiceError> {
    let details = app
        .app
        .match_get_use_case
        .get_match(MatchId(id))
        .await
        .map_err(|e| match e {
            GetMatchError::NotFound => ServiceError::NotFound("Match not found".to_string()),
            GetMatchError::Internal => ServiceError::Internal("Failed to load match".to_string()),
        })?;
    Ok(Json(JsonMatchDetails {
        r#match: JsonMatch::from(&details.r#match),
        players: details.participants.iter().map(JsonParticipant::from).collect(),
    }))
}

pub async fn join_match(
    Auth(user_id): Auth,
    PathParam(id): PathParam<i64>,
    State(app): State<AppState>,
) -> Result<(StatusCode, Json<MessageResponse>), ServiceError> {
    let outcome = app
        .app
        .roster_request_join_use_case
        .request_join(MatchId(id), user_id)
        .await
        .map_err(|e| match e {
            RequestJoinError::MatchNotFound => {
                ServiceError::NotFound("Match not found".to_string())
            }
            RequestJoinError::Internal => ServiceError::Internal("Join failed".to_string()),
        })?;

    if outcome.created() {
        Ok((
            StatusCode::CREATED,
            Json(MessageResponse::new("Join request sent")),
        ))
    } else {
        Ok((
            StatusCode::OK,
            Json(MessageResponse::new("Already requested or joined")),
        ))
    }
}

pub async fn list_players(
    PathParam(id): PathParam<i64>,
    State(app): State<AppState>,
) -> Result<Json<Vec<JsonParticipant>>, ServiceError> {
    let entries = app
        .app
        .roster_list_use_case
        .list_participants(MatchId(id))
        .await
        .map_err(|ListParticipantsError::Internal| {
            ServiceError::Internal("Players fetch failed".to_string())
        })?;
    Ok(Json(entries.iter().map(JsonParticipant::from).collect()))
}

#[derive(serde::Deserialize)]
pub struct JsonStatusUpdate {
    #[serde(default)]
    status: String,
}

pub async fn set_player_status(
    Auth(actor): Auth,
    PathParam((id, player_id)): PathParam<(i64, i64)>,
    State(app): State<AppState>,
    JsonBody(body): JsonBody<JsonStatusUpdate>,
) -> Result<Json<MessageResponse>, ServiceError> {
    let status = body
        .status
        .parse::<ParticipationStatus>()
        .map_err(|_| ServiceError::BadRequest("Invalid status".to_string()))?;

    app.app
        .roster_set_status_use_case
        .set_status(MatchId(id), UserId(player_id), actor, status)
        .await
        .map_err(|e| match e {
            SetStatusError::MatchNotFound => ServiceError::NotFound("Match not found".to_string()),
            SetStatusError::ParticipantNotFound => {
                ServiceError::NotFound("Player not found in match".to_string())
            }
            SetStatusError::Forbidden => ServiceError::Forbidden("Not allowed".to_string()),
            SetStatusError::Internal => ServiceError::Internal("Update failed".to_string()),
        })?;

    Ok(Json(MessageResponse::new("Status updated")))
}

#[derive(serde::Deserialize)]
pub struct JsonRating {
    #[serde(rename = "userId")]
    user_id: Option<i64>,
    rating: Option<i64>,
    comment: Option<String>,
}

pub async fn rate_player(
    Auth(actor): Auth,
    PathParam(id): PathParam<i64>,
    State(app): State<AppState>,
    JsonBody(body): JsonBody<JsonRating>,
) -> Result<(StatusCode, Json<MessageResponse>), ServiceError> {
    let (Some(player_id), Some(rating)) = (body.user_id, body.rating) else {
        return Err(ServiceError::BadRequest(
            "Missing userId or rating".to_string(),
        ));
    };

    app.app
        .rating_rate_use_case
        .rate_participant(MatchId(id), actor, UserId(player_id), rating, body.comment)
        .await
        .map_err(|e| match e {
            RateParticipantError::InvalidRating(e) => ServiceError::BadRequest(e.to_string()),
            RateParticipantError::MatchNotFound => {
                ServiceError::NotFound("Match not found".to_string())
            }
            RateParticipantError::Forbidden => ServiceError::Forbidden("Not allowed".to_string()),
            RateParticipantError::NotAParticipant => {
                ServiceError::NotFound("Player not found in match".to_string())
            }
            RateParticipantError::Internal => ServiceError::Internal("Insert failed".to_string()),
        })?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Rating saved")),
    ))
}

#[derive(serde::Serialize)]
pub struct JsonAssignment {
    mp_id: i64,
    user_id: i64,
    team: &'static str,
    position: &'static str,
}

impl From<&LineupAssignment> for JsonAssignment {
    fn from(assignment: &LineupAssignment) -> Self {
        JsonAssignment {
            mp_id: assignment.participation_id.0,
            user_id: assignment.user_id.0,
            team: assignment.team.as_str(),
            position: assignment.slot,
        }
    }
}

#[derive(serde::Serialize)]
pub struct JsonGeneratedLineup {
    message: &'static str,
    teams: Vec<JsonAssignment>,
}

pub async fn generate_lineup(
    Auth(actor): Auth,
    PathParam(id): PathParam<i64>,
    State(app): State<AppState>,
) -> Result<Json<JsonGeneratedLineup>, ServiceError> {
    let assignments = app
        .app
        .lineup_generate_use_case
        .generate_lineup(MatchId(id), actor)
        .await
        .map_err(|e| match e {
            GenerateLineupError::MatchNotFound => {
                ServiceError::NotFound("Match not found".to_string())
            }
            GenerateLineupError::Forbidden => ServiceError::Forbidden("Not allowed".to_string()),
            GenerateLineupError::InsufficientPlayers(_) => ServiceError::BadRequest(
                "Not enough accepted players to create teams".to_string(),
            ),
            GenerateLineupError::Internal => {
                ServiceError::Internal("Failed to generate teams".to_string())
            }
        })?;

    Ok(Json(JsonGeneratedLineup {
        message: "Teams generated",
        teams: assignments.iter().map(JsonAssignment::from).collect(),
    }))
}

#[derive(serde::Serialize)]
pub struct JsonLineupPlayer {
    user_id: i64,
    team: Option<&'static str>,
    position: Option<String>,
    name: String,
    #[serde(rename = "avatarUrl")]
    avatar_url: Option<String>,
    real_position: Option<String>,
    level: Option<i32>,
}

impl From<&RosterEntry> for JsonLineupPlayer {
    fn from(entry: &RosterEntry) -> Self {
        JsonLineupPlayer {
            user_id: entry.record.user_id.0,
            team: entry.record.team.map(|t| t.as_str()),
            position: entry.record.slot.clone(),
            name: entry.profile.name.clone(),
            avatar_url: entry.profile.avatar_url.clone(),
            real_position: entry.profile.position.clone(),
            level: entry.profile.level,
        }
    }
}

#[derive(serde::Serialize)]
pub struct JsonLineup {
    players: Vec<JsonLineupPlayer>,
}

pub async fn get_lineup(
    PathParam(id): PathParam<i64>,
    State(app): State<AppState>,
) -> Result<Json<JsonLineup>, ServiceError> {
    let entries = app
        .app
        .lineup_get_use_case
        .get_lineup(MatchId(id))
        .await
        .map_err(|GetLineupError::Internal| {
            ServiceError::Internal("Failed to load lineup".to_string())
        })?;
    Ok(Json(JsonLineup {
        players: entries.iter().map(JsonLineupPlayer::from).collect(),
    }))
}
