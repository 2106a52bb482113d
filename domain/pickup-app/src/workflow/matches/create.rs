use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::domain::{
    RepoError, UserId,
    r#match::{Capacity, Match, MatchRepository, NewMatch},
};

#[derive(Clone, Debug)]
pub struct CreateMatchRequest {
    pub title: String,
    pub location: String,
    pub scheduled_at: NaiveDateTime,
    pub max_players: Option<i64>,
    pub description: Option<String>,
}

#[async_trait::async_trait]
pub trait CreateMatchUseCase {
    async fn create_match(
        &self,
        owner: UserId,
        request: CreateMatchRequest,
    ) -> Result<Match, CreateMatchError>;
}

#[derive(Debug)]
pub enum CreateMatchError {
    MissingField(&'static str),
    InvalidCapacity(i64),
    Internal,
}

pub struct CreateMatchUseCaseImpl<M: MatchRepository> {
    match_repository: Arc<M>,
}

impl<M: MatchRepository> CreateMatchUseCaseImpl<M> {
    pub fn new(match_repository: Arc<M>) -> Self {
        Self { match_repository }
    }
}

fn required(value: String, field: &'static str) -> Result<String, CreateMatchError> {
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(CreateMatchError::MissingField(field));
    }
    Ok(value)
}

#[async_trait::async_trait]
impl<M: MatchRepository + Send + Sync + 'static> CreateMatchUseCase for CreateMatchUseCaseImpl<M> {
    async fn create_match(
        &self,
        owner: UserId,
        request: CreateMatchRequest,
    ) -> Result<Match, CreateMatchError> {
        let new_match = NewMatch {
            owner,
            title: required(request.title, "title")?,
            location: required(request.location, "location")?,
            scheduled_at: request.scheduled_at,
            capacity: Capacity::new(request.max_players)
                .map_err(|e| CreateMatchError::InvalidCapacity(e.0))?,
            description: request
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
        };

        match self.match_repository.create_match(new_match).await {
            Ok(created) => {
                log::info!("User {} created match {}", owner, created.id);
                Ok(created)
            }
            Err(RepoError::StorageError(e)) => {
                log::error!("Failed to create match for user {}: {}", owner, e);
                Err(CreateMatchError::Internal)
            }
        }
    }
}
