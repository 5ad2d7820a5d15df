use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A bookable treatment. `slots` holds the full daily slot template; the
/// availability endpoint serves a copy with the day's booked slots removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    pub slots: Vec<String>,
}

/// Name-only projection served by the catalog listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceSummary {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub treatment: String,
    pub date: NaiveDate,
    pub slot: String,
    pub patient: String,
    pub patient_name: String,
    #[serde(default)]
    pub paid: bool,
    #[serde(default)]
    pub transaction_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub treatment: String,
    pub date: NaiveDate,
    pub slot: String,
    pub patient: String,
    pub patient_name: String,
}

/// Body of the payment PATCH. `amount` is in cents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordPaymentRequest {
    pub transaction_id: String,
    pub amount: i64,
}

/// Append-only payment record keyed to its booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub booking_id: Uuid,
    pub transaction_id: String,
    pub amount: i64,
}

/// Slot usage of one day, as read back for the availability calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookedSlot {
    pub treatment: String,
    pub slot: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityQuery {
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookingQuery {
    pub patient: String,
}

/// Outcome of a create attempt: either the insert went through, or the store
/// ignored it in favor of an existing booking for the same triple.
#[derive(Debug, Clone)]
pub enum BookingOutcome {
    Created(Booking),
    Duplicate(Booking),
}

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("Booking not found")]
    NotFound,

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl From<anyhow::Error> for BookingError {
    fn from(err: anyhow::Error) -> Self {
        BookingError::Database {
            message: err.to_string(),
        }
    }
}
