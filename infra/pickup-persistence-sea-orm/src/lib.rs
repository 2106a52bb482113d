use async_lock::OnceCell;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema,
    sea_query::Index,
};

use crate::entity::{match_player, r#match, rating, user};

pub mod entity;
pub mod matches;
pub mod ratings;
pub mod roster;
pub mod users;

static DB_POOL: OnceCell<DatabaseConnection> = OnceCell::new();

pub async fn create_db_pool() -> DatabaseConnection {
    DB_POOL
        .get_or_init(|| async move {
            let db_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

            let mut opt = ConnectOptions::new(&db_url);
            opt.max_connections(5);

            Database::connect(opt)
                .await
                .expect("Failed to connect to database")
        })
        .await
        .clone()
}

pub async fn create_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let schema = Schema::new(db.get_database_backend());

    let user_table = schema
        .create_table_from_entity(user::Entity)
        .if_not_exists()
        .to_owned();
    let match_table = schema
        .create_table_from_entity(r#match::Entity)
        .if_not_exists()
        .to_owned();
    let match_player_table = schema
        .create_table_from_entity(match_player::Entity)
        .if_not_exists()
        .to_owned();
    let rating_table = schema
        .create_table_from_entity(rating::Entity)
        .if_not_exists()
        .to_owned();

    db.execute(&user_table).await?;
    db.execute(&match_table).await?;
    db.execute(&match_player_table).await?;
    db.execute(&rating_table).await?;

    let unique_participation = Index::create()
        .name("idx_match_players_match_user")
        .table(match_player::Entity)
        .col(match_player::Column::MatchId)
        .col(match_player::Column::UserId)
        .unique()
        .if_not_exists()
        .to_owned();
    db.execute(&unique_participation).await?;

    let ratings_by_user = Index::create()
        .name("idx_ratings_user")
        .table(rating::Entity)
        .col(rating::Column::UserId)
        .if_not_exists()
        .to_owned();
    db.execute(&ratings_by_user).await?;

    Ok(())
}
