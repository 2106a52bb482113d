use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use pickup_app::domain::{
    MatchId, RepoError, UserId,
    rating::{NewRating, RatingHistoryEntry, RatingRepository, RatingSummary, RatingValue},
};

use crate::{
    create_db_pool,
    entity::{r#match, rating},
};

pub struct RatingRepositoryImpl {
    db: DatabaseConnection,
}

impl RatingRepositoryImpl {
    pub async fn new() -> Self {
        let db = create_db_pool().await;
        Self { db }
    }

    pub fn from_connection(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl RatingRepository for RatingRepositoryImpl {
    async fn insert_rating(&self, new_rating: NewRating) -> Result<(), RepoError> {
        let model = rating::ActiveModel {
            id: Default::default(), // Auto-increment
            match_id: Set(new_rating.match_id.0),
            user_id: Set(new_rating.user_id.0),
            admin_id: Set(new_rating.admin_id.0),
            rating: Set(new_rating.value.value() as i32),
            comment: Set(new_rating.comment),
            created_at: Set(new_rating.created_at),
        };
        model
            .insert(&self.db)
            .await
            .map_err(|e| RepoError::StorageError(e.to_string()))?;
        Ok(())
    }

    async fn list_ratings_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<RatingHistoryEntry>, RepoError> {
        let models = rating::Entity::find()
            .filter(rating::Column::UserId.eq(user_id.0))
            .order_by_desc(rating::Column::CreatedAt)
            .order_by_desc(rating::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::StorageError(e.to_string()))?;

        let titles: HashMap<i64, String> = r#match::Entity::find()
            .filter(r#match::Column::Id.is_in(models.iter().map(|m| m.match_id)))
            .all(&self.db)
            .await
            .map_err(|e| RepoError::StorageError(e.to_string()))?
            .into_iter()
            .map(|m| (m.id, m.title))
            .collect();

        models
            .into_iter()
            .map(|model| {
                let value = RatingValue::new(model.rating as i64)
                    .map_err(|e| RepoError::StorageError(e.to_string()))?;
                Ok(RatingHistoryEntry {
                    match_id: MatchId(model.match_id),
                    match_title: titles.get(&model.match_id).cloned(),
                    value,
                    comment: model.comment,
                    created_at: model.created_at,
                })
            })
            .collect()
    }

    async fn rating_summary(&self, user_id: UserId) -> Result<RatingSummary, RepoError> {
        let row = rating::Entity::find()
            .select_only()
            .column_as(rating::Column::Id.count(), "count")
            .column_as(rating::Column::Rating.sum(), "total")
            .filter(rating::Column::UserId.eq(user_id.0))
            .into_tuple::<(i64, Option<i64>)>()
            .one(&self.db)
            .await
            .map_err(|e| RepoError::StorageError(e.to_string()))?;

        Ok(match row {
            Some((count, total)) => RatingSummary {
                count: count as u32,
                total: total.unwrap_or(0),
            },
            None => RatingSummary::default(),
        })
    }
}
