use std::sync::Arc;

use crate::domain::{
    RepoError,
    r#match::{MatchRepository, MatchSummary},
};

#[async_trait::async_trait]
pub trait ListMatchesUseCase {
    async fn list_matches(&self) -> Result<Vec<MatchSummary>, ListMatchesError>;
}

#[derive(Debug)]
pub enum ListMatchesError {
    Internal,
}

pub struct ListMatchesUseCaseImpl<M: MatchRepository> {
    match_repository: Arc<M>,
}

impl<M: MatchRepository> ListMatchesUseCaseImpl<M> {
    pub fn new(match_repository: Arc<M>) -> Self {
        Self { match_repository }
    }
}

#[async_trait::async_trait]
impl<M: MatchRepository + Send + Sync + 'static> ListMatchesUseCase for ListMatchesUseCaseImpl<M> {
    async fn list_matches(&self) -> Result<Vec<MatchSummary>, ListMatchesError> {
        match self.match_repository.list_matches().await {
            Ok(matches) => Ok(matches),
            Err(RepoError::StorageError(e)) => {
                log::error!("Failed to list matches: {}", e);
                Err(ListMatchesError::Internal)
            }
        }
    }
}
