use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use booking_cell::router::booking_routes;
use doctor_cell::router::doctor_routes;
use payment_cell::router::payment_routes;
use shared_config::AppConfig;
use user_cell::router::user_routes;

// The portal's routes are flat, so cell routers are merged rather than
// nested under prefixes.
pub fn create_router(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(|| async { "Doctors Portal API is running!" }))
        .merge(user_routes(state.clone()))
        .merge(booking_routes(state.clone()))
        .merge(doctor_routes(state.clone()))
        .merge(payment_routes(state.clone()))
}
