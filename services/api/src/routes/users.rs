//! Registration and login handlers

use std::collections::BTreeMap;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use common::error::DatabaseError;
use tracing::{error, info, warn};

use crate::{
    error::{ApiError, ApiResult},
    extract::ValidatedBody,
    models::{DataResponse, LoginRequest, LoginResponse, NewUser, RegisterRequest, UserResponse},
    password::CredentialHasher,
    state::AppState,
};

/// Map a failed insert to the offending fields, leaking nothing else
fn registration_error(err: DatabaseError) -> ApiError {
    match err.violated_constraint() {
        Some(constraint) => {
            let mut fields = BTreeMap::new();
            if constraint.contains("email") {
                fields.insert("email".to_string(), "Email is already used".to_string());
            }
            if constraint.contains("username") {
                fields.insert(
                    "username".to_string(),
                    "Username is already used".to_string(),
                );
            }
            if fields.is_empty() {
                fields.insert("user".to_string(), "User already exists".to_string());
            }
            ApiError::Conflict(fields)
        }
        None => ApiError::Database(err),
    }
}

async fn hash_password(hasher: CredentialHasher, password: String) -> ApiResult<String> {
    let hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(|e| {
            error!("Password hashing task failed: {}", e);
            ApiError::InternalServerError
        })??;

    Ok(hash)
}

async fn verify_password(
    hasher: CredentialHasher,
    password: String,
    hash: Option<String>,
) -> ApiResult<bool> {
    tokio::task::spawn_blocking(move || hasher.verify_stored(&password, hash.as_deref()))
        .await
        .map_err(|e| {
            error!("Password verification task failed: {}", e);
            ApiError::InternalServerError
        })
}

/// User registration endpoint
pub async fn register(
    State(state): State<AppState>,
    ValidatedBody(payload): ValidatedBody<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    info!("Registering user: {}", payload.username);

    let password_hash = hash_password(state.hasher.clone(), payload.password).await?;

    let new_user = NewUser {
        username: payload.username,
        email: payload.email,
        age: payload.age.unwrap_or_default(),
        password_hash,
    };

    let user = state
        .user_repository
        .create(&new_user)
        .await
        .map_err(registration_error)?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(UserResponse::from(user))),
    ))
}

/// User login endpoint
pub async fn login(
    State(state): State<AppState>,
    ValidatedBody(payload): ValidatedBody<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    info!("Login attempt for user: {}", payload.email);

    let user = state.user_repository.find_by_email(&payload.email).await?;
    let stored_hash = user.as_ref().map(|u| u.password_hash.clone());
    let valid = verify_password(state.hasher.clone(), payload.password, stored_hash).await?;

    let user = match user {
        Some(user) if valid => user,
        _ => {
            warn!("Failed login attempt for user: {}", payload.email);
            return Err(ApiError::InvalidCredentials);
        }
    };

    let token = state.jwt_service.generate_token(user.id, &user.email)?;

    Ok(Json(DataResponse::new(LoginResponse { token })))
}
