use serde::{Deserialize, Serialize};

/// Body of the payment-intent request. `price` is in major units; the
/// gateway is paid in cents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePaymentIntentRequest {
    pub price: f64,
}

/// The gateway's payment-intent object, trimmed to the fields the portal
/// reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
    pub amount: i64,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("Payment gateway is not configured")]
    NotConfigured,

    #[error("Gateway error: {message}")]
    Gateway { message: String },
}

impl From<reqwest::Error> for PaymentError {
    fn from(err: reqwest::Error) -> Self {
        PaymentError::Gateway {
            message: err.to_string(),
        }
    }
}
