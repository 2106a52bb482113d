use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use pickup_app::{build_application, domain::UserId};
use pickup_auth_jwt::JwtAuthenticationAdapter;
use pickup_http_api::{AppState, build_router};
use pickup_persistence_sea_orm::{
    create_schema, matches::MatchRepositoryImpl, ratings::RatingRepositoryImpl,
    roster::RosterRepositoryImpl, users::UserRepositoryImpl,
};
use sea_orm::{ConnectOptions, Database};
use serde_json::{Value, json};
use tower::ServiceExt;

const SECRET: &[u8] = b"route-test-secret";

struct TestServer {
    router: Router,
    tokens: JwtAuthenticationAdapter,
    users: UserRepositoryImpl,
}

impl TestServer {
    async fn new() -> Self {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).min_connections(1);
        let db = Database::connect(opt).await.unwrap();
        create_schema(&db).await.unwrap();

        let app = build_application(
            Arc::new(MatchRepositoryImpl::from_connection(db.clone())),
            Arc::new(RosterRepositoryImpl::from_connection(db.clone())),
            Arc::new(RatingRepositoryImpl::from_connection(db.clone())),
            Arc::new(UserRepositoryImpl::from_connection(db.clone())),
        );
        let router = build_router(AppState {
            app: Arc::new(app),
            auth: Arc::new(JwtAuthenticationAdapter::new(SECRET)),
        });

        Self {
            router,
            tokens: JwtAuthenticationAdapter::new(SECRET),
            users: UserRepositoryImpl::from_connection(db),
        }
    }

    async fn add_user(&self, name: &str, position: &str, level: i32) -> (UserId, String) {
        let id = self
            .users
            .create_user(name, Some(position), Some(level), None)
            .await
            .unwrap();
        let token = self
            .tokens
            .generate_jwt(id, chrono::Duration::hours(1))
            .unwrap();
        (id, token)
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        self.send_raw(method, uri, token, body.map(|b| b.to_string()))
            .await
    }

    async fn send_raw(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<String>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn create_match(&self, token: &str) -> i64 {
        let (status, body) = self
            .send(
                Method::POST,
                "/matches",
                Some(token),
                Some(json!({
                    "title": "Thursday five",
                    "location": "Riverside pitch",
                    "date": "2026-06-11",
                    "time": "19:00",
                    "max_players": 10
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_i64().unwrap()
    }
}

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::new().await;
    let (status, body) = server.send(Method::GET, "/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Pickup API is running");
}

#[tokio::test]
async fn test_protected_routes_require_valid_token() {
    let server = TestServer::new().await;
    let (status, body) = server.send(Method::GET, "/users/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());

    let (status, _) = server
        .send(Method::POST, "/matches/1/join", Some("garbage"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_join_is_idempotent() {
    let server = TestServer::new().await;
    let (_, owner) = server.add_user("owner", "MID", 5).await;
    let (_, player) = server.add_user("player", "ATT", 7).await;
    let match_id = server.create_match(&owner).await;
    let uri = format!("/matches/{}/join", match_id);

    let (status, body) = server.send(Method::POST, &uri, Some(&player), None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Join request sent");

    let (status, body) = server.send(Method::POST, &uri, Some(&player), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Already requested or joined");

    let (status, _) = server
        .send(Method::POST, "/matches/999/join", Some(&player), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_organizer_flow() {
    let server = TestServer::new().await;
    let (owner_id, owner) = server.add_user("owner", "MID", 5).await;
    let (p1, p1_token) = server.add_user("striker", "ATT", 7).await;
    let (p2, p2_token) = server.add_user("back", "DEF", 5).await;
    let (p3, p3_token) = server.add_user("keeper", "GK", 9).await;
    let match_id = server.create_match(&owner).await;

    for token in [&p1_token, &p2_token, &p3_token] {
        let uri = format!("/matches/{}/join", match_id);
        let (status, _) = server.send(Method::POST, &uri, Some(token), None).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let forbidden_uri = format!("/matches/{}/players/{}", match_id, p2.0);
    let (status, body) = server
        .send(
            Method::PATCH,
            &forbidden_uri,
            Some(&p1_token),
            Some(json!({ "status": "accepted" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Not allowed");

    for player in [p1, p2, p3] {
        let uri = format!("/matches/{}/players/{}", match_id, player.0);
        let (status, _) = server
            .send(
                Method::PATCH,
                &uri,
                Some(&owner),
                Some(json!({ "status": "accepted" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = server
        .send(
            Method::POST,
            &format!("/matches/{}/auto-lineup", match_id),
            Some(&owner),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let teams = body["teams"].as_array().unwrap();
    assert_eq!(teams.len(), 3);
    assert_eq!(teams[0]["user_id"], p3.0);
    assert_eq!(teams[0]["team"], "A");
    assert_eq!(teams[0]["position"], "gk");
    assert_eq!(teams[1]["user_id"], p1.0);
    assert_eq!(teams[1]["team"], "B");
    assert_eq!(teams[1]["position"], "st-l");
    assert_eq!(teams[2]["user_id"], p2.0);
    assert_eq!(teams[2]["position"], "df-l");

    let (status, body) = server
        .send(Method::GET, &format!("/matches/{}/lineup", match_id), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["players"].as_array().unwrap().len(), 3);

    let (status, body) = server
        .send(Method::GET, &format!("/matches/{}", match_id), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["match"]["admin_id"], owner_id.0);
    assert_eq!(body["players"].as_array().unwrap().len(), 3);

    let (status, body) = server
        .send(Method::GET, &format!("/matches/{}/players", match_id), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let statuses: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["status"].as_str().unwrap())
        .collect();
    assert_eq!(statuses, vec!["accepted", "accepted", "accepted"]);
    assert_eq!(body[0]["user_id"], p1.0);

    let (status, body) = server.send(Method::GET, "/matches", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["player_count"], 3);
    assert_eq!(body[0]["admin_name"], "owner");

    let rate_uri = format!("/matches/{}/rate", match_id);
    let (status, _) = server
        .send(
            Method::POST,
            &rate_uri,
            Some(&owner),
            Some(json!({ "userId": p1.0, "rating": 11 })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = server
        .send(
            Method::POST,
            &rate_uri,
            Some(&owner),
            Some(json!({ "userId": p1.0, "rating": 8, "comment": "great runs" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Rating saved");

    let (status, body) = server
        .send(Method::GET, &format!("/users/{}/ratings", p1.0), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["rating"], 8);
    assert_eq!(body[0]["match_title"], "Thursday five");

    let (status, body) = server
        .send(Method::GET, &format!("/users/{}/stats", p1.0), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["matches_played"], 1);
    assert_eq!(body["matches_accepted"], 1);
    assert_eq!(body["total_ratings"], 1);
    assert_eq!(body["avg_rating"], 8.0);

    let (status, body) = server
        .send(Method::GET, "/users/me", Some(&p1_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "striker");
    assert_eq!(body["position"], "ATT");
}

#[tokio::test]
async fn test_lineup_needs_two_accepted_players() {
    let server = TestServer::new().await;
    let (_, owner) = server.add_user("owner", "MID", 5).await;
    let (player, token) = server.add_user("solo", "ATT", 6).await;
    let match_id = server.create_match(&owner).await;

    server
        .send(
            Method::POST,
            &format!("/matches/{}/join", match_id),
            Some(&token),
            None,
        )
        .await;
    server
        .send(
            Method::PATCH,
            &format!("/matches/{}/players/{}", match_id, player.0),
            Some(&owner),
            Some(json!({ "status": "accepted" })),
        )
        .await;

    let (status, body) = server
        .send(
            Method::POST,
            &format!("/matches/{}/auto-lineup", match_id),
            Some(&owner),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_invalid_status_is_rejected() {
    let server = TestServer::new().await;
    let (_, owner) = server.add_user("owner", "MID", 5).await;
    let (player, token) = server.add_user("p", "DEF", 4).await;
    let match_id = server.create_match(&owner).await;
    server
        .send(
            Method::POST,
            &format!("/matches/{}/join", match_id),
            Some(&token),
            None,
        )
        .await;

    let (status, body) = server
        .send(
            Method::PATCH,
            &format!("/matches/{}/players/{}", match_id, player.0),
            Some(&owner),
            Some(json!({ "status": "maybe" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid status");

    let (status, _) = server
        .send(
            Method::PATCH,
            &format!("/matches/{}/players/{}", match_id, 4242),
            Some(&owner),
            Some(json!({ "status": "accepted" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_requests_get_json_errors() {
    let server = TestServer::new().await;
    let (_, owner) = server.add_user("owner", "MID", 5).await;

    let (status, body) = server
        .send_raw(
            Method::POST,
            "/matches",
            Some(&owner),
            Some("{\"title\": ".to_string()),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = server
        .send(
            Method::POST,
            "/matches",
            Some(&owner),
            Some(json!({
                "title": "Thursday five",
                "location": "Riverside pitch",
                "date": "2026-06-11",
                "time": "19:00",
                "max_players": "ten"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = server
        .send(Method::GET, "/matches/abc", Some(&owner), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = server
        .send(Method::GET, "/users/abc/ratings", Some(&owner), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}
