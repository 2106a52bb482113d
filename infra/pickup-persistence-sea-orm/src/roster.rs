use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionError, TransactionTrait,
    prelude::Expr,
    sea_query::OnConflict,
};
use pickup_app::domain::{
    MatchId, ParticipationId, RepoError, RepoRetrieveError, RepoUpdateError, UserId,
    lineup::LineupAssignment,
    roster::{
        JoinOutcome, ParticipationRecord, ParticipationStatus, RosterEntry, RosterRepository,
        Team,
    },
    user::PlayerProfile,
};

use crate::{
    create_db_pool,
    entity::{match_player, user},
    users::UserRepositoryImpl,
};

pub struct RosterRepositoryImpl {
    db: DatabaseConnection,
}

impl RosterRepositoryImpl {
    pub async fn new() -> Self {
        let db = create_db_pool().await;
        Self { db }
    }

    pub fn from_connection(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_record(model: match_player::Model) -> Result<ParticipationRecord, String> {
        let status = model
            .status
            .parse::<ParticipationStatus>()
            .map_err(|e| e.to_string())?;
        Ok(ParticipationRecord {
            id: ParticipationId(model.id),
            match_id: MatchId(model.match_id),
            user_id: UserId(model.user_id),
            status,
            team: model
                .team
                .as_deref()
                .map(str::parse::<Team>)
                .transpose()
                .map_err(|e| e.to_string())?,
            slot: model.slot,
            created_at: model.created_at,
        })
    }

    async fn count_distinct_matches(
        &self,
        user_id: UserId,
        status: Option<ParticipationStatus>,
    ) -> Result<u32, RepoError> {
        let mut query = match_player::Entity::find()
            .select_only()
            .column(match_player::Column::MatchId)
            .distinct()
            .filter(match_player::Column::UserId.eq(user_id.0));
        if let Some(status) = status {
            query = query.filter(match_player::Column::Status.eq(status.as_str()));
        }
        let count = query
            .count(&self.db)
            .await
            .map_err(|e| RepoError::StorageError(e.to_string()))?;
        Ok(count as u32)
    }
}

#[async_trait::async_trait]
impl RosterRepository for RosterRepositoryImpl {
    async fn insert_if_absent(
        &self,
        match_id: MatchId,
        user_id: UserId,
        created_at: DateTime<Utc>,
    ) -> Result<JoinOutcome, RepoError> {
        let model = match_player::ActiveModel {
            id: Default::default(), // Auto-increment
            match_id: Set(match_id.0),
            user_id: Set(user_id.0),
            status: Set(ParticipationStatus::Pending.as_str().to_string()),
            team: Set(None),
            slot: Set(None),
            created_at: Set(created_at),
        };
        let inserted = match_player::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([match_player::Column::MatchId, match_player::Column::UserId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| RepoError::StorageError(e.to_string()))?;

        if inserted == 0 {
            Ok(JoinOutcome::AlreadyRequested)
        } else {
            Ok(JoinOutcome::Created)
        }
    }

    async fn get_record(
        &self,
        match_id: MatchId,
        user_id: UserId,
    ) -> Result<ParticipationRecord, RepoRetrieveError> {
        let model = match_player::Entity::find()
            .filter(match_player::Column::MatchId.eq(match_id.0))
            .filter(match_player::Column::UserId.eq(user_id.0))
            .one(&self.db)
            .await
            .map_err(|e| RepoRetrieveError::StorageError(e.to_string()))?
            .ok_or(RepoRetrieveError::NotFound)?;
        Self::model_to_record(model).map_err(RepoRetrieveError::StorageError)
    }

    async fn update_status(
        &self,
        match_id: MatchId,
        user_id: UserId,
        status: ParticipationStatus,
    ) -> Result<(), RepoUpdateError> {
        let mut query = match_player::Entity::update_many()
            .col_expr(match_player::Column::Status, Expr::value(status.as_str()));
        if status != ParticipationStatus::Accepted {
            query = query
                .col_expr(match_player::Column::Team, Expr::value(Option::<String>::None))
                .col_expr(match_player::Column::Slot, Expr::value(Option::<String>::None));
        }
        let res = query
            .filter(match_player::Column::MatchId.eq(match_id.0))
            .filter(match_player::Column::UserId.eq(user_id.0))
            .exec(&self.db)
            .await
            .map_err(|e| RepoUpdateError::StorageError(e.to_string()))?;

        if res.rows_affected == 0 {
            return Err(RepoUpdateError::NotFound);
        }
        Ok(())
    }

    async fn list_roster(&self, match_id: MatchId) -> Result<Vec<RosterEntry>, RepoError> {
        let models = match_player::Entity::find()
            .filter(match_player::Column::MatchId.eq(match_id.0))
            .order_by_asc(match_player::Column::CreatedAt)
            .order_by_asc(match_player::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::StorageError(e.to_string()))?;

        let mut profiles: HashMap<i64, PlayerProfile> = user::Entity::find()
            .filter(user::Column::Id.is_in(models.iter().map(|m| m.user_id)))
            .all(&self.db)
            .await
            .map_err(|e| RepoError::StorageError(e.to_string()))?
            .into_iter()
            .map(|model| (model.id, UserRepositoryImpl::model_to_profile(model)))
            .collect();

        models
            .into_iter()
            .map(|model| {
                let profile = profiles.remove(&model.user_id).unwrap_or_else(|| {
                    log::warn!("No profile for user {} on match {}", model.user_id, match_id);
                    PlayerProfile {
                        user_id: UserId(model.user_id),
                        name: format!("Player {}", model.user_id),
                        position: None,
                        level: None,
                        avatar_url: None,
                    }
                });
                let record = Self::model_to_record(model).map_err(RepoError::StorageError)?;
                Ok(RosterEntry { record, profile })
            })
            .collect()
    }

    async fn save_lineup(
        &self,
        match_id: MatchId,
        assignments: &[LineupAssignment],
    ) -> Result<(), RepoError> {
        let assignments = assignments.to_vec();
        let res = self
            .db
            .transaction::<_, (), RepoError>(|c| {
                Box::pin(async move {
                    for assignment in assignments {
                        match_player::Entity::update_many()
                            .col_expr(
                                match_player::Column::Team,
                                Expr::value(assignment.team.as_str()),
                            )
                            .col_expr(match_player::Column::Slot, Expr::value(assignment.slot))
                            .filter(match_player::Column::Id.eq(assignment.participation_id.0))
                            .filter(match_player::Column::MatchId.eq(match_id.0))
                            .filter(
                                match_player::Column::Status
                                    .eq(ParticipationStatus::Accepted.as_str()),
                            )
                            .exec(c)
                            .await
                            .map_err(|e| RepoError::StorageError(e.to_string()))?;
                    }
                    Ok(())
                })
            })
            .await;

        match res {
            Ok(()) => Ok(()),
            Err(TransactionError::Transaction(e)) => Err(e),
            Err(TransactionError::Connection(e)) => Err(RepoError::StorageError(e.to_string())),
        }
    }

    async fn count_matches_for_user(&self, user_id: UserId) -> Result<u32, RepoError> {
        self.count_distinct_matches(user_id, None).await
    }

    async fn count_accepted_matches_for_user(&self, user_id: UserId) -> Result<u32, RepoError> {
        self.count_distinct_matches(user_id, Some(ParticipationStatus::Accepted))
            .await
    }
}
