use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::errors::internal::TokenError;
use crate::types::db::user;
use crate::types::internal::auth::Claims;

/// Manages JWT access token generation and validation
///
/// Tokens are stateless HS256 and carry the holder's role names; there is
/// no server-side session to revoke.
pub struct TokenService {
    jwt_secret: String,
    expiration_minutes: i64,
}

impl TokenService {
    /// Create a new TokenService with the given signing secret
    pub fn new(jwt_secret: String) -> Self {
        Self {
            jwt_secret,
            expiration_minutes: 60,
        }
    }

    /// Issue an access token for the user with its current role set
    pub fn issue(&self, user: &user::Model, roles: &[String]) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();

        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            roles: roles.to_vec(),
            exp: now + self.expiration_minutes * 60,
            iat: now,
            jti: Uuid::new_v4().to_string(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| TokenError::Creation(e.to_string()))
    }

    /// Validate a token and return its claims
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid(e.to_string()),
        })
    }
}
