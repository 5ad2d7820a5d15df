use std::sync::Arc;

use axum::{
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
    body::Body,
};
use reqwest::Method;
use serde_json::Value;

use shared_models::auth::AuthUser;
use shared_models::error::AppError;
use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::jwt::validate_token;

/// Bearer-token middleware. A missing header is Unauthorized; a header that
/// fails verification is Forbidden.
pub async fn auth_middleware(
    State(config): State<Arc<AppConfig>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .ok_or_else(|| AppError::Auth("Missing authorization header".to_string()))?;

    let auth_value = auth_header
        .to_str()
        .map_err(|_| AppError::Forbidden("Invalid authorization header format".to_string()))?;

    if !auth_value.starts_with("Bearer ") {
        return Err(AppError::Forbidden(
            "Invalid authorization header format".to_string(),
        ));
    }

    let token = &auth_value[7..];

    let user = validate_token(token, &config.access_token_secret).map_err(AppError::Forbidden)?;

    // Add user to request extensions
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Role gate for admin-only routes; must be layered inside `auth_middleware`.
/// Unknown users are rejected the same way as non-admins.
pub async fn admin_middleware(
    State(config): State<Arc<AppConfig>>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let user = request
        .extensions()
        .get::<AuthUser>()
        .cloned()
        .ok_or_else(|| AppError::Auth("User not found in request extensions".to_string()))?;

    let client = SupabaseClient::new(&config);
    let path = format!("/rest/v1/users?email=eq.{}&select=email,role", user.email);

    let rows: Vec<Value> = client
        .request(Method::GET, &path, None)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    let is_admin = rows
        .first()
        .and_then(|row| row["role"].as_str())
        .map(|role| role == "admin")
        .unwrap_or(false);

    if !is_admin {
        return Err(AppError::Forbidden("Forbidden access".to_string()));
    }

    Ok(next.run(request).await)
}
