use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get},
    middleware,
};

use shared_config::AppConfig;
use shared_utils::extractor::{admin_middleware, auth_middleware};

use crate::handlers;

pub fn doctor_routes(state: Arc<AppConfig>) -> Router {
    // Admin routes (authentication + admin role required)
    let admin_routes = Router::new()
        .route(
            "/doctor",
            get(handlers::list_doctors).post(handlers::create_doctor),
        )
        .route("/doctor/{email}", delete(handlers::delete_doctor))
        .layer(middleware::from_fn_with_state(state.clone(), admin_middleware))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new().merge(admin_routes).with_state(state)
}
