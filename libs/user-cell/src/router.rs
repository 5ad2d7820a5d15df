use std::sync::Arc;

use axum::{
    Router,
    routing::{get, put},
    middleware,
};

use shared_config::AppConfig;
use shared_utils::extractor::{admin_middleware, auth_middleware};

use crate::handlers;

pub fn user_routes(state: Arc<AppConfig>) -> Router {
    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/user/{email}", put(handlers::upsert_user))
        .route("/admin/{email}", get(handlers::admin_status));

    // Protected routes (authentication required)
    let protected_routes = Router::new()
        .route("/user", get(handlers::list_users))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Admin routes (authentication + admin role required)
    let admin_routes = Router::new()
        .route("/user/admin/{email}", put(handlers::grant_admin))
        .layer(middleware::from_fn_with_state(state.clone(), admin_middleware))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(admin_routes)
        .with_state(state)
}
