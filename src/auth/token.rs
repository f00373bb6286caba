use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::state::AppState;
use crate::utils::{error::ApiError, internal};

const TOKEN_TTL_SECS: i64 = 60 * 60 * 24;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

pub fn issue_token(user_id: Uuid, email: &str, secret: &str) -> Result<String, ApiError> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_owned(),
        iat: now,
        exp: now + TOKEN_TTL_SECS,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(internal)
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, ApiError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|err| match err.kind() {
        ErrorKind::ExpiredSignature => ApiError::Forbidden("Token expired".into()),
        _ => ApiError::Forbidden("Invalid token".into()),
    })
}

/// Caller identity resolved from the `Authorization: Bearer` header.
/// The referenced user must still exist.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        use axum_food::schema::users;

        let token = bearer_token(parts)
            .ok_or_else(|| ApiError::Unauthorized("Access token required".into()))?;

        let claims = verify_token(&token, &state.config.jwt_secret)?;
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| ApiError::Forbidden("Invalid token".into()))?;

        let mut conn = state.pool.get().await.map_err(internal)?;

        let exists: Option<Uuid> = users::table
            .find(user_id)
            .select(users::id)
            .first(&mut conn)
            .await
            .optional()?;

        match exists {
            Some(_) => Ok(AuthUser {
                id: user_id,
                email: claims.email,
            }),
            None => Err(ApiError::Unauthorized("User not found".into())),
        }
    }
}

/// Optional variant: resolves the identity when a valid token is present,
/// never rejects the request.
pub struct MaybeAuthUser(pub Option<AuthUser>);

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(Self(AuthUser::from_request_parts(parts, state).await.ok()))
    }
}

fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn issued_token_round_trips() {
        let id = Uuid::new_v4();
        let token = issue_token(id, "ada@example.com", SECRET).unwrap();
        let claims = verify_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, id.to_string());
        assert_eq!(claims.email, "ada@example.com");
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_SECS);
    }

    #[test]
    fn expired_token_is_forbidden() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            email: "ada@example.com".into(),
            iat: now - TOKEN_TTL_SECS - 600,
            exp: now - 600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        match verify_token(&token, SECRET) {
            Err(ApiError::Forbidden(msg)) => assert_eq!(msg, "Token expired"),
            other => panic!("expected Forbidden, got {other:?}"),
        }
    }

    #[test]
    fn wrong_secret_is_forbidden() {
        let token = issue_token(Uuid::new_v4(), "ada@example.com", SECRET).unwrap();
        match verify_token(&token, "other-secret") {
            Err(ApiError::Forbidden(msg)) => assert_eq!(msg, "Invalid token"),
            other => panic!("expected Forbidden, got {other:?}"),
        }
    }

    #[test]
    fn garbage_token_is_forbidden() {
        assert!(matches!(
            verify_token("not.a.jwt", SECRET),
            Err(ApiError::Forbidden(_))
        ));
    }
}
