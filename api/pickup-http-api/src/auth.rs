use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use pickup_app::domain::UserId;

use crate::{AppState, ServiceError};

/// The user a bearer token was issued for.
pub struct Auth(pub UserId);

impl FromRequestParts<AppState> for Auth {
    type Rejection = ServiceError;

    async fn from_request_parts(
        parts: &mut Parts,
        app: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, app)
                .await
                .map_err(|_| ServiceError::Unauthorized("No token provided".to_string()))?;

        match app.auth.authenticate(bearer.token()) {
            Some(user_id) => Ok(Auth(user_id)),
            None => Err(ServiceError::Unauthorized("Invalid token".to_string())),
        }
    }
}
