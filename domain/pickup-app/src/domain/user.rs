use crate::domain::{RepoRetrieveError, UserId};

#[derive(Clone, Debug, PartialEq)]
pub struct PlayerProfile {
    pub user_id: UserId,
    pub name: String,
    pub position: Option<String>,
    pub level: Option<i32>,
    pub avatar_url: Option<String>,
}

#[async_trait::async_trait]
pub trait UserRepository {
    async fn get_profile(&self, user_id: UserId) -> Result<PlayerProfile, RepoRetrieveError>;
}
