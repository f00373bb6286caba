use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use bcrypt::{DEFAULT_COST, hash, verify};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use super::models::{AuthResponse, LoginPayload, NewUser, RegisterPayload, SafeUser, User};
use super::token::{AuthUser, issue_token};
use crate::state::AppState;
use crate::utils::{ValidatedJson, error::ApiError, internal, types::Pool};

pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterPayload>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    use axum_food::schema::users;

    let mut conn = state.pool.get().await.map_err(internal)?;

    let password_hash = hash_password(payload.password).await?;

    let user_data = NewUser {
        id: Uuid::new_v4(),
        name: payload.name,
        email: payload.email,
        password_hash,
        phone: payload.phone,
        address: payload.address,
    };

    let user = diesel::insert_into(users::table)
        .values(&user_data)
        .returning(SafeUser::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(|err| match err {
            diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                _,
            ) => ApiError::Conflict("User already exists".into()),
            err => err.into(),
        })?;

    let token = issue_token(user.id, &user.email, &state.config.jwt_secret)?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User created successfully".into(),
            token,
            user,
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginPayload>,
) -> Result<Json<AuthResponse>, ApiError> {
    use axum_food::schema::users;

    let mut conn = state.pool.get().await.map_err(internal)?;

    let user: User = users::table
        .filter(users::email.eq(&payload.email))
        .select(User::as_select())
        .first(&mut conn)
        .await
        .optional()?
        .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".into()))?;

    let valid = verify_password(payload.password, user.password_hash.clone()).await?;
    if !valid {
        return Err(ApiError::Unauthorized("Invalid credentials".into()));
    }

    let token = issue_token(user.id, &user.email, &state.config.jwt_secret)?;

    Ok(Json(AuthResponse {
        message: "Login successful".into(),
        token,
        user: user.into(),
    }))
}

pub async fn profile(
    State(pool): State<Pool>,
    user: AuthUser,
) -> Result<Json<SafeUser>, ApiError> {
    use axum_food::schema::users;

    let mut conn = pool.get().await.map_err(internal)?;

    let res = users::table
        .find(user.id)
        .select(SafeUser::as_select())
        .get_result(&mut conn)
        .await?;

    Ok(Json(res))
}

async fn hash_password(password: String) -> Result<String, ApiError> {
    tokio::task::spawn_blocking(move || hash(password, DEFAULT_COST))
        .await
        .map_err(internal)?
        .map_err(internal)
}

async fn verify_password(password: String, password_hash: String) -> Result<bool, ApiError> {
    tokio::task::spawn_blocking(move || verify(password, &password_hash))
        .await
        .map_err(internal)?
        .map_err(internal)
}
