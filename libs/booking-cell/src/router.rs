use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
    middleware,
};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn booking_routes(state: Arc<AppConfig>) -> Router {
    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/services", get(handlers::list_services))
        .route("/available", get(handlers::available_slots));

    // /booking mixes a public POST with a token-guarded GET, so the auth
    // layer is scoped to the GET method router before the two are merged.
    let booking_collection = Router::new().route(
        "/booking",
        post(handlers::create_booking).merge(
            get(handlers::patient_bookings)
                .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware)),
        ),
    );

    // Protected routes (authentication required)
    let protected_routes = Router::new()
        .route(
            "/booking/{id}",
            get(handlers::get_booking).patch(handlers::pay_booking),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(booking_collection)
        .merge(protected_routes)
        .with_state(state)
}
