use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_models::error::AppError;
use shared_utils::jwt::sign_token;

use crate::models::UserError;
use crate::services::AccountService;

fn map_user_error(err: UserError) -> AppError {
    match err {
        UserError::NotFound => AppError::NotFound("User not found".to_string()),
        UserError::Validation { message } => AppError::BadRequest(message),
        UserError::Database { message } => AppError::Database(message),
    }
}

/// Login flow: upsert the account row and hand back a fresh access token.
#[axum::debug_handler]
pub async fn upsert_user(
    State(state): State<Arc<AppConfig>>,
    Path(email): Path<String>,
) -> Result<Json<Value>, AppError> {
    debug!("Login upsert for: {}", email);

    let account = AccountService::new(&state);
    let user = account.upsert_user(&email).await.map_err(map_user_error)?;

    let token =
        sign_token(&user.email, &state.access_token_secret).map_err(AppError::Internal)?;

    Ok(Json(json!({
        "user": user,
        "token": token
    })))
}

#[axum::debug_handler]
pub async fn list_users(
    State(state): State<Arc<AppConfig>>,
) -> Result<Json<Value>, AppError> {
    let account = AccountService::new(&state);
    let users = account.list_users().await.map_err(map_user_error)?;

    Ok(Json(json!(users)))
}

#[axum::debug_handler]
pub async fn admin_status(
    State(state): State<Arc<AppConfig>>,
    Path(email): Path<String>,
) -> Result<Json<Value>, AppError> {
    let account = AccountService::new(&state);
    let admin = account.is_admin(&email).await.map_err(map_user_error)?;

    Ok(Json(json!({ "admin": admin })))
}

#[axum::debug_handler]
pub async fn grant_admin(
    State(state): State<Arc<AppConfig>>,
    Path(email): Path<String>,
) -> Result<Json<Value>, AppError> {
    let account = AccountService::new(&state);
    let user = account.grant_admin(&email).await.map_err(map_user_error)?;

    Ok(Json(json!(user)))
}
