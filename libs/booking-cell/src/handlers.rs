use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde_json::{json, Value};
use tracing::{debug, warn};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::auth::AuthUser;
use shared_models::error::AppError;

use crate::models::{
    AvailabilityQuery, Booking, BookingError, BookingOutcome, BookingQuery, CreateBookingRequest,
    RecordPaymentRequest,
};
use crate::services::{AvailabilityService, BookingService, CatalogService, EmailClient};

fn map_booking_error(err: BookingError) -> AppError {
    match err {
        BookingError::NotFound => AppError::NotFound("Booking not found".to_string()),
        BookingError::Validation { message } => AppError::BadRequest(message),
        BookingError::Database { message } => AppError::Database(message),
    }
}

#[axum::debug_handler]
pub async fn list_services(State(state): State<Arc<AppConfig>>) -> Result<Json<Value>, AppError> {
    let catalog = CatalogService::new(&state);
    let services = catalog.list_names().await.map_err(map_booking_error)?;

    Ok(Json(json!(services)))
}

#[axum::debug_handler]
pub async fn available_slots(
    State(state): State<Arc<AppConfig>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<Value>, AppError> {
    debug!("Availability requested for {}", query.date);

    let availability = AvailabilityService::new(&state);
    let services = availability
        .availability_for_date(query.date)
        .await
        .map_err(map_booking_error)?;

    Ok(Json(json!(services)))
}

/// Patients can only read their own booking list.
#[axum::debug_handler]
pub async fn patient_bookings(
    State(state): State<Arc<AppConfig>>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<BookingQuery>,
) -> Result<Json<Value>, AppError> {
    if query.patient != auth_user.email {
        warn!(
            "Token for {} attempted to read bookings of {}",
            auth_user.email, query.patient
        );
        return Err(AppError::Forbidden("Forbidden access".to_string()));
    }

    let bookings = BookingService::new(&state)
        .bookings_for_patient(&query.patient)
        .await
        .map_err(map_booking_error)?;

    Ok(Json(json!(bookings)))
}

#[axum::debug_handler]
pub async fn get_booking(
    State(state): State<Arc<AppConfig>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let booking = BookingService::new(&state)
        .get_booking(id)
        .await
        .map_err(map_booking_error)?;

    Ok(Json(json!(booking)))
}

#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<Json<Value>, AppError> {
    let outcome = BookingService::new(&state)
        .create_booking(&request)
        .await
        .map_err(map_booking_error)?;

    match outcome {
        BookingOutcome::Created(booking) => {
            send_confirmation(&state, &booking).await;
            Ok(Json(json!({ "success": true, "booking": booking })))
        }
        BookingOutcome::Duplicate(existing) => {
            Ok(Json(json!({ "success": false, "booking": existing })))
        }
    }
}

#[axum::debug_handler]
pub async fn pay_booking(
    State(state): State<Arc<AppConfig>>,
    Path(id): Path<Uuid>,
    Json(request): Json<RecordPaymentRequest>,
) -> Result<Json<Value>, AppError> {
    let booking = BookingService::new(&state)
        .mark_paid(id, &request.transaction_id, request.amount)
        .await
        .map_err(map_booking_error)?;

    send_receipt(&state, &booking, request.amount).await;

    Ok(Json(json!(booking)))
}

/// Delivery problems are logged and swallowed; the booking flow never fails
/// on a mail hiccup.
async fn send_confirmation(state: &AppConfig, booking: &Booking) {
    if !state.is_email_configured() {
        debug!("Email not configured, skipping booking confirmation");
        return;
    }

    if let Err(err) = EmailClient::new(state)
        .send_booking_confirmation(booking)
        .await
    {
        warn!("Failed to send booking confirmation: {}", err);
    }
}

async fn send_receipt(state: &AppConfig, booking: &Booking, amount: i64) {
    if !state.is_email_configured() {
        debug!("Email not configured, skipping payment receipt");
        return;
    }

    if let Err(err) = EmailClient::new(state)
        .send_payment_receipt(booking, amount)
        .await
    {
        warn!("Failed to send payment receipt: {}", err);
    }
}
