use actix_web::{HttpMessage, HttpRequest};
use chrono::{Duration, Utc};
use engine::types::user_types::Role;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::JwtSettings;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: u64,
    pub role: Role,
    pub jti: String,
    pub iat: usize,
    pub exp: usize,
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

pub fn create_jwt(id: u64, role: Role, settings: &JwtSettings) -> Result<String, ApiError> {
    let now = Utc::now();
    let expiration = now
        .checked_add_signed(Duration::hours(settings.ttl_hours))
        .ok_or_else(|| ApiError::Internal("token expiry out of range".into()))?
        .timestamp();

    let claims = Claims {
        sub: id,
        role,
        jti: Uuid::new_v4().to_string(),
        iat: now.timestamp() as usize,
        exp: expiration as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(settings.secret.as_ref()),
    )
    .map_err(|e| ApiError::Internal(format!("failed to sign token: {e}")))
}

pub fn verify_jwt(token: &str, settings: &JwtSettings) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(settings.secret.as_ref()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

/// Claims the auth middleware attached to this request.
pub fn extract_claims(req: &HttpRequest) -> Result<Claims, ApiError> {
    req.extensions()
        .get::<Claims>()
        .cloned()
        .ok_or(ApiError::Unauthorized("Authentication required"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(secret: &str) -> JwtSettings {
        JwtSettings {
            secret: secret.into(),
            ttl_hours: 1,
        }
    }

    #[test]
    fn signed_token_verifies_with_the_same_secret() {
        let token = create_jwt(42, Role::Admin, &settings("s3cret")).unwrap();
        let claims = verify_jwt(&token, &settings("s3cret")).unwrap();
        assert_eq!(claims.sub, 42);
        assert!(claims.is_admin());
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = create_jwt(1, Role::User, &settings("one")).unwrap();
        assert!(verify_jwt(&token, &settings("two")).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let expired = JwtSettings {
            secret: "s3cret".into(),
            ttl_hours: -2,
        };
        let token = create_jwt(1, Role::User, &expired).unwrap();
        assert!(verify_jwt(&token, &settings("s3cret")).is_err());
    }
}
