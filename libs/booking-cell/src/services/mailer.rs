use anyhow::Result;
use reqwest::Client;
use serde_json::json;
use tracing::{debug, error};

use shared_config::AppConfig;

use crate::models::Booking;

const BOOKING_CONFIRMATION_TEMPLATE: &str =
    include_str!("../../templates/booking_confirmation.html");
const PAYMENT_RECEIPT_TEMPLATE: &str = include_str!("../../templates/payment_receipt.html");

/// Transactional-email client speaking the Resend dialect:
/// POST {base}/emails with a bearer key and a JSON message body.
pub struct EmailClient {
    client: Client,
    api_base: String,
    api_key: String,
    from: String,
}

impl EmailClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            api_base: config.email_api_base.clone(),
            api_key: config.email_api_key.clone(),
            from: config.email_from.clone(),
        }
    }

    pub async fn send(&self, to: &str, subject: &str, html: &str) -> Result<()> {
        let url = format!("{}/emails", self.api_base);

        debug!("Sending email to {}: {}", to, subject);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&json!({
                "from": self.from,
                "to": [to],
                "subject": subject,
                "html": html,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Email provider rejected message: {} - {}", status, body);
            anyhow::bail!("Email provider returned {}", status);
        }

        Ok(())
    }

    pub async fn send_booking_confirmation(&self, booking: &Booking) -> Result<()> {
        let subject = format!(
            "Your booking for {} on {} is confirmed",
            booking.treatment, booking.date
        );
        let html = render_booking_confirmation(booking);

        self.send(&booking.patient, &subject, &html).await
    }

    pub async fn send_payment_receipt(&self, booking: &Booking, amount: i64) -> Result<()> {
        let subject = format!(
            "We received your payment for {} on {}",
            booking.treatment, booking.date
        );
        let html = render_payment_receipt(booking, amount);

        self.send(&booking.patient, &subject, &html).await
    }
}

fn render_booking_confirmation(booking: &Booking) -> String {
    BOOKING_CONFIRMATION_TEMPLATE
        .replace("{{PATIENT_NAME}}", &booking.patient_name)
        .replace("{{TREATMENT}}", &booking.treatment)
        .replace("{{DATE}}", &booking.date.to_string())
        .replace("{{SLOT}}", &booking.slot)
}

fn render_payment_receipt(booking: &Booking, amount: i64) -> String {
    PAYMENT_RECEIPT_TEMPLATE
        .replace("{{PATIENT_NAME}}", &booking.patient_name)
        .replace("{{TREATMENT}}", &booking.treatment)
        .replace("{{DATE}}", &booking.date.to_string())
        .replace("{{SLOT}}", &booking.slot)
        .replace("{{AMOUNT}}", &format_amount(amount))
        .replace(
            "{{TRANSACTION_ID}}",
            booking.transaction_id.as_deref().unwrap_or(""),
        )
}

/// Cent amount rendered as dollars, e.g. 30000 -> "$300.00".
fn format_amount(cents: i64) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}
