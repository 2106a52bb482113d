use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use pickup_app::{domain::UserId, ports::authentication::AuthenticationPort};
use serde::{Deserialize, Serialize};

/// `sub` carries the numeric user id as a string.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    exp: usize,
}

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl Keys {
    fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

pub struct JwtAuthenticationAdapter {
    keys: Keys,
}

impl JwtAuthenticationAdapter {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            keys: Keys::new(secret),
        }
    }

    pub fn from_env() -> Self {
        let secret = std::env::var("PICKUP_JWT_SECRET").expect("PICKUP_JWT_SECRET must be set");
        Self::new(secret.as_bytes())
    }

    pub fn generate_jwt(
        &self,
        user_id: UserId,
        valid_for: chrono::Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims {
            sub: user_id.to_string(),
            exp: (chrono::Utc::now() + valid_for).timestamp() as usize,
        };
        encode(&Header::default(), &claims, &self.keys.encoding)
    }

    fn decode_claims(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let token_data = decode::<Claims>(token, &self.keys.decoding, &Validation::default())?;
        Ok(token_data.claims)
    }
}

impl AuthenticationPort for JwtAuthenticationAdapter {
    fn authenticate(&self, token: &str) -> Option<UserId> {
        let claims = match self.decode_claims(token) {
            Ok(claims) => claims,
            Err(e) => {
                log::debug!("Rejected token: {}", e);
                return None;
            }
        };
        match claims.sub.parse::<i64>() {
            Ok(id) => Some(UserId(id)),
            Err(_) => {
                log::warn!("Token subject is not a user id: {}", claims.sub);
                None
            }
        }
    }
}
