use pickup_persistence_sea_orm::{create_db_pool, create_schema};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let pool = create_db_pool().await;

    create_schema(&pool)
        .await
        .expect("Failed to create database tables");

    println!("Created database tables successfully");
}
