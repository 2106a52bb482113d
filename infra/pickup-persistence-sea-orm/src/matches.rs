use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use pickup_app::domain::{
    MatchId, RepoError, RepoRetrieveError, UserId,
    r#match::{Capacity, Match, MatchRepository, MatchSummary, NewMatch},
    roster::ParticipationStatus,
};

use crate::{
    create_db_pool,
    entity::{match_player, r#match, user},
};

pub struct MatchRepositoryImpl {
    db: DatabaseConnection,
}

impl MatchRepositoryImpl {
    pub async fn new() -> Self {
        let db = create_db_pool().await;
        Self { db }
    }

    pub fn from_connection(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_match(model: r#match::Model) -> Match {
        Match {
            id: MatchId(model.id),
            owner: UserId(model.admin_id),
            title: model.title,
            location: model.location,
            scheduled_at: model.scheduled_at,
            capacity: match model.max_players {
                Some(n) if n > 0 => Capacity::Limited(n as u32),
                _ => Capacity::Unlimited,
            },
            description: model.description,
        }
    }
}

#[async_trait::async_trait]
impl MatchRepository for MatchRepositoryImpl {
    async fn create_match(&self, new_match: NewMatch) -> Result<Match, RepoError> {
        let model = r#match::ActiveModel {
            id: Default::default(), // Auto-increment
            admin_id: Set(new_match.owner.0),
            title: Set(new_match.title),
            location: Set(new_match.location),
            scheduled_at: Set(new_match.scheduled_at),
            max_players: Set(new_match.capacity.max_players().map(|n| n as i32)),
            description: Set(new_match.description),
        };
        let inserted = model
            .insert(&self.db)
            .await
            .map_err(|e| RepoError::StorageError(e.to_string()))?;
        Ok(Self::model_to_match(inserted))
    }

    async fn get_match(&self, match_id: MatchId) -> Result<Match, RepoRetrieveError> {
        let model = r#match::Entity::find_by_id(match_id.0)
            .one(&self.db)
            .await
            .map_err(|e| RepoRetrieveError::StorageError(e.to_string()))?
            .ok_or(RepoRetrieveError::NotFound)?;
        Ok(Self::model_to_match(model))
    }

    async fn list_matches(&self) -> Result<Vec<MatchSummary>, RepoError> {
        let models = r#match::Entity::find()
            .order_by_asc(r#match::Column::ScheduledAt)
            .order_by_asc(r#match::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::StorageError(e.to_string()))?;

        let accepted_counts: HashMap<i64, i64> = match_player::Entity::find()
            .select_only()
            .column(match_player::Column::MatchId)
            .column_as(match_player::Column::Id.count(), "accepted")
            .filter(match_player::Column::Status.eq(ParticipationStatus::Accepted.as_str()))
            .group_by(match_player::Column::MatchId)
            .into_tuple::<(i64, i64)>()
            .all(&self.db)
            .await
            .map_err(|e| RepoError::StorageError(e.to_string()))?
            .into_iter()
            .collect();

        let owner_names: HashMap<i64, String> = user::Entity::find()
            .filter(user::Column::Id.is_in(models.iter().map(|m| m.admin_id)))
            .all(&self.db)
            .await
            .map_err(|e| RepoError::StorageError(e.to_string()))?
            .into_iter()
            .map(|u| (u.id, u.name))
            .collect();

        Ok(models
            .into_iter()
            .map(|model| MatchSummary {
                owner_name: owner_names.get(&model.admin_id).cloned(),
                accepted_players: accepted_counts.get(&model.id).copied().unwrap_or(0) as u32,
                r#match: Self::model_to_match(model),
            })
            .collect())
    }
}
