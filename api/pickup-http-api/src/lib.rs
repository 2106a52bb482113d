use std::sync::Arc;

use axum::{
    Json, Router,
    http::{HeaderValue, Method, header},
    routing::{get, patch, post},
};
use log::info;
use pickup_app::{Application, ports::authentication::AuthenticationPort};
use tower_http::cors::{AllowOrigin, CorsLayer};

mod auth;
mod extract;
mod matches;
mod users;

const LOCAL_FRONTEND_ORIGIN: &str = "http://localhost:5173";

#[derive(Clone)]
pub struct AppState {
    pub app: Arc<Application>,
    pub auth: Arc<dyn AuthenticationPort + Send + Sync + 'static>,
}

pub async fn run(
    app: Arc<Application>,
    auth: Arc<dyn AuthenticationPort + Send + Sync + 'static>,
    shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
) {
    let router = build_router(AppState { app, auth });

    let port = std::env::var("PICKUP_HTTP_PORT")
        .unwrap_or_else(|_| "4000".to_string())
        .parse::<u16>()
        .expect("PICKUP_HTTP_PORT must be a valid u16");
    let host = std::env::var("PICKUP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port))
        .await
        .expect("Failed to bind HTTP listener");

    info!("API server listening on {}:{}", host, port);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .expect("HTTP server failed");

    info!("HTTP API shut down gracefully");
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/matches", get(matches::list_matches).post(matches::create_match))
        .route("/matches/{id}", get(matches::get_match))
        .route("/matches/{id}/join", post(matches::join_match))
        .route("/matches/{id}/players", get(matches::list_players))
        .route(
            "/matches/{id}/players/{user_id}",
            patch(matches::set_player_status),
        )
        .route("/matches/{id}/rate", post(matches::rate_player))
        .route("/matches/{id}/auto-lineup", post(matches::generate_lineup))
        .route("/matches/{id}/lineup", get(matches::get_lineup))
        .route("/users/me", get(users::who_am_i))
        .route("/users/{id}/ratings", get(users::get_ratings))
        .route("/users/{id}/stats", get(users::get_stats))
        .layer(cors_layer())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    let mut origins = vec![HeaderValue::from_static(LOCAL_FRONTEND_ORIGIN)];
    if let Ok(frontend_url) = std::env::var("FRONTEND_URL") {
        match HeaderValue::from_str(frontend_url.trim()) {
            Ok(origin) => origins.push(origin),
            Err(_) => log::warn!("Ignoring invalid FRONTEND_URL: {}", frontend_url),
        }
    }
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PATCH])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}

async fn health() -> Json<MessageResponse> {
    Json(MessageResponse::new("Pickup API is running"))
}

#[derive(serde::Serialize)]
pub struct MessageResponse {
    message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Internal error: {0}")]
    Internal(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
}

impl axum::response::IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let (status, msg) = match self {
            ServiceError::NotFound(msg) => (axum::http::StatusCode::NOT_FOUND, msg),
            ServiceError::Unauthorized(msg) => (axum::http::StatusCode::UNAUTHORIZED, msg),
            ServiceError::BadRequest(msg) => (axum::http::StatusCode::BAD_REQUEST, msg),
            ServiceError::Internal(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
            ServiceError::Forbidden(msg) => (axum::http::StatusCode::FORBIDDEN, msg),
        };
        let body = serde_json::json!({ "error": msg });
        (status, axum::Json(body)).into_response()
    }
}
