use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
};

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use crate::domain::{
    MatchId, ParticipationId, RepoError, RepoRetrieveError, RepoUpdateError, UserId,
    lineup::LineupAssignment,
    r#match::{Capacity, Match, MatchRepository, MatchSummary, NewMatch},
    rating::{NewRating, RatingHistoryEntry, RatingRepository, RatingSummary, RatingValue},
    roster::{
        JoinOutcome, ParticipationRecord, ParticipationStatus, RosterEntry, RosterRepository,
        Team,
    },
    user::{PlayerProfile, UserRepository},
};

#[derive(Default)]
struct State {
    next_id: i64,
    ticks: i64,
    matches: Vec<Match>,
    users: HashMap<UserId, PlayerProfile>,
    records: Vec<ParticipationRecord>,
    ratings: Vec<NewRating>,
    failing: HashSet<&'static str>,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn tick(&mut self) -> DateTime<Utc> {
        self.ticks += 1;
        Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap() + Duration::seconds(self.ticks)
    }

    fn check(&self, op: &'static str) -> Result<(), String> {
        if self.failing.contains(op) {
            return Err(format!("{} unavailable", op));
        }
        Ok(())
    }

    fn profile(&self, user_id: UserId) -> PlayerProfile {
        self.users
            .get(&user_id)
            .cloned()
            .unwrap_or_else(|| PlayerProfile {
                user_id,
                name: format!("player{}", user_id),
                position: None,
                level: None,
                avatar_url: None,
            })
    }
}

/// Shared fake backing every repository trait of the crate.
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
        }
    }

    pub fn fail(&self, op: &'static str) {
        self.state.lock().unwrap().failing.insert(op);
    }

    pub fn add_match(&self, owner: UserId) -> MatchId {
        let mut state = self.state.lock().unwrap();
        let id = MatchId(state.next_id());
        state.matches.push(Match {
            id,
            owner,
            title: format!("Match {}", id),
            location: "Stadium".to_string(),
            scheduled_at: NaiveDate::from_ymd_opt(2026, 3, 1)
                .unwrap()
                .and_hms_opt(18, 0, 0)
                .unwrap(),
            capacity: Capacity::Limited(10),
            description: None,
        });
        id
    }

    pub fn transfer_match(&self, match_id: MatchId, owner: UserId) {
        let mut state = self.state.lock().unwrap();
        let entry = state.matches.iter_mut().find(|m| m.id == match_id).unwrap();
        entry.owner = owner;
    }

    pub fn add_user(&self, user_id: UserId, position: Option<&str>, level: Option<i32>) {
        self.state.lock().unwrap().users.insert(
            user_id,
            PlayerProfile {
                user_id,
                name: format!("player{}", user_id),
                position: position.map(|p| p.to_string()),
                level,
                avatar_url: None,
            },
        );
    }

    pub fn add_participant(&self, match_id: MatchId, user_id: UserId, status: ParticipationStatus) {
        let mut state = self.state.lock().unwrap();
        let id = ParticipationId(state.next_id());
        let created_at = state.tick();
        let mut record = ParticipationRecord::pending(id, match_id, user_id, created_at);
        record.set_status(status);
        state.records.push(record);
    }

    pub fn assign(&self, match_id: MatchId, user_id: UserId, team: Team, slot: &str) {
        let mut state = self.state.lock().unwrap();
        let record = state
            .records
            .iter_mut()
            .find(|r| r.match_id == match_id && r.user_id == user_id)
            .unwrap();
        record.assign(team, slot);
    }

    pub fn add_rating(&self, match_id: MatchId, user_id: UserId, value: i64) {
        let mut state = self.state.lock().unwrap();
        let created_at = state.tick();
        state.ratings.push(NewRating {
            match_id,
            user_id,
            admin_id: UserId(1),
            value: RatingValue::new(value).unwrap(),
            comment: None,
            created_at,
        });
    }

    pub fn records(&self, match_id: MatchId) -> Vec<ParticipationRecord> {
        let state = self.state.lock().unwrap();
        state
            .records
            .iter()
            .filter(|r| r.match_id == match_id)
            .cloned()
            .collect()
    }

    pub fn ratings(&self) -> Vec<NewRating> {
        self.state.lock().unwrap().ratings.clone()
    }
}

#[async_trait::async_trait]
impl MatchRepository for InMemoryStore {
    async fn create_match(&self, new_match: NewMatch) -> Result<Match, RepoError> {
        let mut state = self.state.lock().unwrap();
        state.check("create_match").map_err(RepoError::StorageError)?;
        let created = Match {
            id: MatchId(state.next_id()),
            owner: new_match.owner,
            title: new_match.title,
            location: new_match.location,
            scheduled_at: new_match.scheduled_at,
            capacity: new_match.capacity,
            description: new_match.description,
        };
        state.matches.push(created.clone());
        Ok(created)
    }

    async fn get_match(&self, match_id: MatchId) -> Result<Match, RepoRetrieveError> {
        let state = self.state.lock().unwrap();
        state
            .check("get_match")
            .map_err(RepoRetrieveError::StorageError)?;
        state
            .matches
            .iter()
            .find(|m| m.id == match_id)
            .cloned()
            .ok_or(RepoRetrieveError::NotFound)
    }

    async fn list_matches(&self) -> Result<Vec<MatchSummary>, RepoError> {
        let state = self.state.lock().unwrap();
        state.check("list_matches").map_err(RepoError::StorageError)?;
        let mut matches: Vec<MatchSummary> = state
            .matches
            .iter()
            .map(|m| MatchSummary {
                r#match: m.clone(),
                owner_name: Some(state.profile(m.owner).name),
                accepted_players: state
                    .records
                    .iter()
                    .filter(|r| r.match_id == m.id && r.status == ParticipationStatus::Accepted)
                    .count() as u32,
            })
            .collect();
        matches.sort_by_key(|s| s.r#match.scheduled_at);
        Ok(matches)
    }
}

#[async_trait::async_trait]
impl RosterRepository for InMemoryStore {
    async fn insert_if_absent(
        &self,
        match_id: MatchId,
        user_id: UserId,
        created_at: DateTime<Utc>,
    ) -> Result<JoinOutcome, RepoError> {
        let mut state = self.state.lock().unwrap();
        state
            .check("insert_if_absent")
            .map_err(RepoError::StorageError)?;
        if state
            .records
            .iter()
            .any(|r| r.match_id == match_id && r.user_id == user_id)
        {
            return Ok(JoinOutcome::AlreadyRequested);
        }
        let id = ParticipationId(state.next_id());
        state
            .records
            .push(ParticipationRecord::pending(id, match_id, user_id, created_at));
        Ok(JoinOutcome::Created)
    }

    async fn get_record(
        &self,
        match_id: MatchId,
        user_id: UserId,
    ) -> Result<ParticipationRecord, RepoRetrieveError> {
        let state = self.state.lock().unwrap();
        state
            .check("get_record")
            .map_err(RepoRetrieveError::StorageError)?;
        state
            .records
            .iter()
            .find(|r| r.match_id == match_id && r.user_id == user_id)
            .cloned()
            .ok_or(RepoRetrieveError::NotFound)
    }

    async fn update_status(
        &self,
        match_id: MatchId,
        user_id: UserId,
        status: ParticipationStatus,
    ) -> Result<(), RepoUpdateError> {
        let mut state = self.state.lock().unwrap();
        state
            .check("update_status")
            .map_err(RepoUpdateError::StorageError)?;
        let record = state
            .records
            .iter_mut()
            .find(|r| r.match_id == match_id && r.user_id == user_id)
            .ok_or(RepoUpdateError::NotFound)?;
        record.set_status(status);
        Ok(())
    }

    async fn list_roster(&self, match_id: MatchId) -> Result<Vec<RosterEntry>, RepoError> {
        let state = self.state.lock().unwrap();
        state.check("list_roster").map_err(RepoError::StorageError)?;
        Ok(state
            .records
            .iter()
            .filter(|r| r.match_id == match_id)
            .map(|r| RosterEntry {
                record: r.clone(),
                profile: state.profile(r.user_id),
            })
            .collect())
    }

    async fn save_lineup(
        &self,
        match_id: MatchId,
        assignments: &[LineupAssignment],
    ) -> Result<(), RepoError> {
        let mut state = self.state.lock().unwrap();
        state.check("save_lineup").map_err(RepoError::StorageError)?;
        for assignment in assignments {
            if let Some(record) = state
                .records
                .iter_mut()
                .find(|r| r.match_id == match_id && r.id == assignment.participation_id)
            {
                record.assign(assignment.team, assignment.slot);
            }
        }
        Ok(())
    }

    async fn count_matches_for_user(&self, user_id: UserId) -> Result<u32, RepoError> {
        let state = self.state.lock().unwrap();
        state
            .check("count_matches_for_user")
            .map_err(RepoError::StorageError)?;
        let matches: HashSet<MatchId> = state
            .records
            .iter()
            .filter(|r| r.user_id == user_id)
            .map(|r| r.match_id)
            .collect();
        Ok(matches.len() as u32)
    }

    async fn count_accepted_matches_for_user(&self, user_id: UserId) -> Result<u32, RepoError> {
        let state = self.state.lock().unwrap();
        state
            .check("count_accepted_matches_for_user")
            .map_err(RepoError::StorageError)?;
        let matches: HashSet<MatchId> = state
            .records
            .iter()
            .filter(|r| r.user_id == user_id && r.status == ParticipationStatus::Accepted)
            .map(|r| r.match_id)
            .collect();
        Ok(matches.len() as u32)
    }
}

#[async_trait::async_trait]
impl RatingRepository for InMemoryStore {
    async fn insert_rating(&self, rating: NewRating) -> Result<(), RepoError> {
        let mut state = self.state.lock().unwrap();
        state.check("insert_rating").map_err(RepoError::StorageError)?;
        state.ratings.push(rating);
        Ok(())
    }

    async fn list_ratings_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<RatingHistoryEntry>, RepoError> {
        let state = self.state.lock().unwrap();
        state
            .check("list_ratings_for_user")
            .map_err(RepoError::StorageError)?;
        let mut entries: Vec<RatingHistoryEntry> = state
            .ratings
            .iter()
            .filter(|r| r.user_id == user_id)
            .map(|r| RatingHistoryEntry {
                match_id: r.match_id,
                match_title: state
                    .matches
                    .iter()
                    .find(|m| m.id == r.match_id)
                    .map(|m| m.title.clone()),
                value: r.value,
                comment: r.comment.clone(),
                created_at: r.created_at,
            })
            .collect();
        entries.sort_by_key(|e| std::cmp::Reverse(e.created_at));
        Ok(entries)
    }

    async fn rating_summary(&self, user_id: UserId) -> Result<RatingSummary, RepoError> {
        let state = self.state.lock().unwrap();
        state.check("rating_summary").map_err(RepoError::StorageError)?;
        Ok(state
            .ratings
            .iter()
            .filter(|r| r.user_id == user_id)
            .fold(RatingSummary::default(), |acc, r| RatingSummary {
                count: acc.count + 1,
                total: acc.total + r.value.value() as i64,
            }))
    }
}

#[async_trait::async_trait]
impl UserRepository for InMemoryStore {
    async fn get_profile(&self, user_id: UserId) -> Result<PlayerProfile, RepoRetrieveError> {
        let state = self.state.lock().unwrap();
        state
            .check("get_profile")
            .map_err(RepoRetrieveError::StorageError)?;
        state
            .users
            .get(&user_id)
            .cloned()
            .ok_or(RepoRetrieveError::NotFound)
    }
}
