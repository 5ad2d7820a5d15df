use reqwest::Method;
use serde_json::json;
use tracing::{debug, info};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{Booking, BookingError, BookingOutcome, CreateBookingRequest, Payment};

pub struct BookingService {
    supabase: SupabaseClient,
}

impl BookingService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    pub async fn bookings_for_patient(&self, patient: &str) -> Result<Vec<Booking>, BookingError> {
        debug!("Listing bookings for patient: {}", patient);

        let path = format!("/rest/v1/bookings?patient=eq.{}&order=date.asc", patient);
        let bookings: Vec<Booking> = self.supabase.request(Method::GET, &path, None).await?;

        Ok(bookings)
    }

    pub async fn get_booking(&self, id: Uuid) -> Result<Booking, BookingError> {
        debug!("Fetching booking: {}", id);

        let path = format!("/rest/v1/bookings?id=eq.{}", id);
        let result: Vec<Booking> = self.supabase.request(Method::GET, &path, None).await?;

        result.into_iter().next().ok_or(BookingError::NotFound)
    }

    /// Insert guarded by the unique (treatment, date, patient) constraint.
    /// A repeat submission for the same triple is ignored by the store; the
    /// empty representation tells us to fetch and return the existing row.
    pub async fn create_booking(
        &self,
        request: &CreateBookingRequest,
    ) -> Result<BookingOutcome, BookingError> {
        validate_booking_request(request)?;

        debug!(
            "Creating booking: {} on {} at {} for {}",
            request.treatment, request.date, request.slot, request.patient
        );

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "Prefer",
            reqwest::header::HeaderValue::from_static(
                "resolution=ignore-duplicates,return=representation",
            ),
        );

        let inserted: Vec<Booking> = self
            .supabase
            .request_with_headers(
                Method::POST,
                "/rest/v1/bookings?on_conflict=treatment,date,patient",
                Some(json!({
                    "treatment": request.treatment,
                    "date": request.date,
                    "slot": request.slot,
                    "patient": request.patient,
                    "patient_name": request.patient_name,
                    "paid": false,
                })),
                Some(headers),
            )
            .await?;

        if let Some(booking) = inserted.into_iter().next() {
            info!("Created booking {} for {}", booking.id, booking.patient);
            return Ok(BookingOutcome::Created(booking));
        }

        let existing = self.find_existing(request).await?;
        Ok(BookingOutcome::Duplicate(existing))
    }

    async fn find_existing(&self, request: &CreateBookingRequest) -> Result<Booking, BookingError> {
        let path = format!(
            "/rest/v1/bookings?treatment=eq.{}&date=eq.{}&patient=eq.{}",
            request.treatment, request.date, request.patient
        );
        let result: Vec<Booking> = self.supabase.request(Method::GET, &path, None).await?;

        result.into_iter().next().ok_or(BookingError::NotFound)
    }

    /// Flip the paid flag, store the transaction id, and append the payment
    /// record. The booking row is the source of truth for the paid state;
    /// the payments table is the audit trail.
    pub async fn mark_paid(
        &self,
        id: Uuid,
        transaction_id: &str,
        amount: i64,
    ) -> Result<Booking, BookingError> {
        if transaction_id.trim().is_empty() {
            return Err(BookingError::Validation {
                message: "Transaction id must not be empty".to_string(),
            });
        }
        if amount <= 0 {
            return Err(BookingError::Validation {
                message: format!("Payment amount must be positive, got {}", amount),
            });
        }

        let path = format!("/rest/v1/bookings?id=eq.{}", id);
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "Prefer",
            reqwest::header::HeaderValue::from_static("return=representation"),
        );

        let updated: Vec<Booking> = self
            .supabase
            .request_with_headers(
                Method::PATCH,
                &path,
                Some(json!({
                    "paid": true,
                    "transaction_id": transaction_id,
                })),
                Some(headers),
            )
            .await?;

        let booking = updated.into_iter().next().ok_or(BookingError::NotFound)?;

        let payment = Payment {
            booking_id: booking.id,
            transaction_id: transaction_id.to_string(),
            amount,
        };

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "Prefer",
            reqwest::header::HeaderValue::from_static("return=representation"),
        );

        let _recorded: Vec<Payment> = self
            .supabase
            .request_with_headers(
                Method::POST,
                "/rest/v1/payments",
                Some(json!(payment)),
                Some(headers),
            )
            .await?;

        info!(
            "Recorded payment {} ({} cents) for booking {}",
            transaction_id, amount, booking.id
        );

        Ok(booking)
    }
}

fn validate_booking_request(request: &CreateBookingRequest) -> Result<(), BookingError> {
    if request.treatment.trim().is_empty() {
        return Err(BookingError::Validation {
            message: "Treatment must not be empty".to_string(),
        });
    }
    if request.slot.trim().is_empty() {
        return Err(BookingError::Validation {
            message: "Slot must not be empty".to_string(),
        });
    }
    if request.patient.trim().is_empty() || !request.patient.contains('@') {
        return Err(BookingError::Validation {
            message: format!("Invalid patient email: {}", request.patient),
        });
    }
    if request.patient_name.trim().is_empty() {
        return Err(BookingError::Validation {
            message: "Patient name must not be empty".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn request() -> CreateBookingRequest {
        CreateBookingRequest {
            treatment: "Teeth Cleaning".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 5, 14).unwrap(),
            slot: "10.00 AM".to_string(),
            patient: "patient@example.com".to_string(),
            patient_name: "Pat Example".to_string(),
        }
    }

    #[test]
    fn a_complete_request_passes_validation() {
        assert!(validate_booking_request(&request()).is_ok());
    }

    #[test]
    fn blank_treatment_is_rejected() {
        let mut req = request();
        req.treatment = "  ".to_string();

        assert!(matches!(
            validate_booking_request(&req),
            Err(BookingError::Validation { .. })
        ));
    }

    #[test]
    fn patient_without_at_sign_is_rejected() {
        let mut req = request();
        req.patient = "not-an-email".to_string();

        assert!(matches!(
            validate_booking_request(&req),
            Err(BookingError::Validation { .. })
        ));
    }

    #[test]
    fn blank_patient_name_is_rejected() {
        let mut req = request();
        req.patient_name = String::new();

        assert!(matches!(
            validate_booking_request(&req),
            Err(BookingError::Validation { .. })
        ));
    }
}
