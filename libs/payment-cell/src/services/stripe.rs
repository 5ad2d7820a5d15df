use reqwest::Client;
use tracing::{debug, error, info};

use shared_config::AppConfig;

use crate::models::{PaymentError, PaymentIntent};

/// Payment gateway client (Stripe dialect): form-encoded POST
/// /v1/payment_intents with a bearer secret key.
pub struct StripeClient {
    client: Client,
    api_base: String,
    secret_key: String,
}

impl StripeClient {
    pub fn new(config: &AppConfig) -> Result<Self, PaymentError> {
        if !config.is_payments_configured() {
            return Err(PaymentError::NotConfigured);
        }

        Ok(Self {
            client: Client::new(),
            api_base: config.stripe_api_base.clone(),
            secret_key: config.stripe_secret_key.clone(),
        })
    }

    /// Create a card payment intent for the given cent amount.
    pub async fn create_payment_intent(
        &self,
        amount_cents: i64,
    ) -> Result<PaymentIntent, PaymentError> {
        let url = format!("{}/v1/payment_intents", self.api_base);
        let params = [
            ("amount", amount_cents.to_string()),
            ("currency", "usd".to_string()),
            ("payment_method_types[]", "card".to_string()),
        ];

        debug!("Sending payment intent request to: {}", url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.secret_key))
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            error!(
                "Payment intent creation failed: {} - {}",
                status, response_text
            );
            return Err(PaymentError::Gateway {
                message: format!("HTTP {}: {}", status, response_text),
            });
        }

        let intent: PaymentIntent =
            serde_json::from_str(&response_text).map_err(|e| PaymentError::Gateway {
                message: format!("Failed to parse payment intent response: {}", e),
            })?;

        info!(
            "Created payment intent {} for {} cents",
            intent.id, intent.amount
        );
        Ok(intent)
    }
}
