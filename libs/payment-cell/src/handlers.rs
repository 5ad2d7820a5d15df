use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{CreatePaymentIntentRequest, PaymentError};
use crate::services::StripeClient;

fn map_payment_error(err: PaymentError) -> AppError {
    match err {
        PaymentError::NotConfigured => {
            AppError::Internal("Payment gateway is not configured".to_string())
        }
        PaymentError::Gateway { message } => AppError::ExternalService(message),
    }
}

/// Clients submit the treatment price in major units; the gateway is paid
/// in cents.
#[axum::debug_handler]
pub async fn create_payment_intent(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<CreatePaymentIntentRequest>,
) -> Result<Json<Value>, AppError> {
    if !request.price.is_finite() || request.price <= 0.0 {
        return Err(AppError::BadRequest(format!(
            "Price must be positive, got {}",
            request.price
        )));
    }

    let amount_cents = (request.price * 100.0).round() as i64;
    debug!("Creating payment intent for {} cents", amount_cents);

    let gateway = StripeClient::new(&state).map_err(map_payment_error)?;
    let intent = gateway
        .create_payment_intent(amount_cents)
        .await
        .map_err(map_payment_error)?;

    Ok(Json(json!({ "client_secret": intent.client_secret })))
}
