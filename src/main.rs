use std::sync::Arc;

use log::info;
use pickup_app::build_application;
use pickup_auth_jwt::JwtAuthenticationAdapter;
use pickup_persistence_sea_orm::{
    create_db_pool, create_schema, matches::MatchRepositoryImpl, ratings::RatingRepositoryImpl,
    roster::RosterRepositoryImpl, users::UserRepositoryImpl,
};

mod logs;

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received. Preparing graceful exit...");
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    logs::init_logger();

    let db = create_db_pool().await;
    create_schema(&db)
        .await
        .expect("Failed to create database tables");

    let match_repo = Arc::new(MatchRepositoryImpl::new().await);
    let roster_repo = Arc::new(RosterRepositoryImpl::new().await);
    let rating_repo = Arc::new(RatingRepositoryImpl::new().await);
    let user_repo = Arc::new(UserRepositoryImpl::new().await);
    let authentication_service = Arc::new(JwtAuthenticationAdapter::from_env());

    let app = Arc::new(build_application(
        match_repo,
        roster_repo,
        rating_repo,
        user_repo,
    ));

    info!("Starting application");

    let http_app = tokio::spawn(async move {
        pickup_http_api::run(app, authentication_service, shutdown_signal()).await;
    });

    if let Err(e) = http_app.await {
        log::error!("HTTP API task failed: {}", e);
    }
}
