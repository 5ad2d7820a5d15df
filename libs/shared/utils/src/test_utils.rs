use std::sync::Arc;
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use base64::{Engine as _, engine::general_purpose};
use serde_json::json;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::auth::AuthUser;

pub struct TestConfig {
    pub jwt_secret: String,
    pub supabase_url: String,
    pub supabase_anon_key: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "test-secret-key-for-token-signing-must-be-long-enough".to_string(),
            supabase_url: "http://localhost:54321".to_string(),
            supabase_anon_key: "test-anon-key".to_string(),
        }
    }
}

impl TestConfig {
    /// Full config with payments configured against a placeholder gateway and
    /// email disabled, so handlers that send mail skip delivery.
    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            supabase_url: self.supabase_url.clone(),
            supabase_anon_key: self.supabase_anon_key.clone(),
            access_token_secret: self.jwt_secret.clone(),
            stripe_secret_key: "sk_test_abc123".to_string(),
            stripe_api_base: "http://localhost:12111".to_string(),
            email_api_key: String::new(),
            email_api_base: "http://localhost:8025".to_string(),
            email_from: "Doctors Portal <noreply@doctorsportal.example>".to_string(),
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

pub struct TestUser {
    pub email: String,
    pub role: Option<String>,
}

impl Default for TestUser {
    fn default() -> Self {
        Self {
            email: "test@example.com".to_string(),
            role: None,
        }
    }
}

impl TestUser {
    pub fn new(email: &str) -> Self {
        Self {
            email: email.to_string(),
            role: None,
        }
    }

    pub fn admin(email: &str) -> Self {
        Self {
            email: email.to_string(),
            role: Some("admin".to_string()),
        }
    }

    pub fn to_auth_user(&self) -> AuthUser {
        AuthUser {
            email: self.email.clone(),
        }
    }

    /// The user's row as the store would return it.
    pub fn to_row(&self) -> serde_json::Value {
        json!({
            "email": self.email,
            "role": self.role,
        })
    }
}

pub struct JwtTestUtils;

impl JwtTestUtils {
    pub fn create_test_token(email: &str, secret: &str, exp_hours: Option<i64>) -> String {
        let now = Utc::now();
        let exp = now + Duration::hours(exp_hours.unwrap_or(1));

        let header = json!({
            "alg": "HS256",
            "typ": "JWT"
        });

        let payload = json!({
            "email": email,
            "iat": now.timestamp(),
            "exp": exp.timestamp()
        });

        let header_encoded = general_purpose::URL_SAFE_NO_PAD.encode(header.to_string());
        let payload_encoded = general_purpose::URL_SAFE_NO_PAD.encode(payload.to_string());

        let signing_input = format!("{}.{}", header_encoded, payload_encoded);

        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(signing_input.as_bytes());
        let signature = mac.finalize().into_bytes();
        let signature_encoded = general_purpose::URL_SAFE_NO_PAD.encode(signature);

        format!("{}.{}", signing_input, signature_encoded)
    }

    pub fn create_expired_token(email: &str, secret: &str) -> String {
        Self::create_test_token(email, secret, Some(-1))
    }

    pub fn create_invalid_signature_token(email: &str) -> String {
        Self::create_test_token(email, "wrong-secret", Some(1))
    }

    pub fn create_malformed_token() -> String {
        "invalid.token.format".to_string()
    }
}

pub struct MockSupabaseResponses;

impl MockSupabaseResponses {
    pub fn service_row(name: &str, slots: &[&str]) -> serde_json::Value {
        json!({
            "id": Uuid::new_v4(),
            "name": name,
            "slots": slots,
        })
    }

    pub fn booking_row(
        id: Uuid,
        treatment: &str,
        date: &str,
        slot: &str,
        patient: &str,
        patient_name: &str,
    ) -> serde_json::Value {
        json!({
            "id": id,
            "treatment": treatment,
            "date": date,
            "slot": slot,
            "patient": patient,
            "patient_name": patient_name,
            "paid": false,
            "transaction_id": null,
        })
    }

    pub fn paid_booking_row(
        id: Uuid,
        treatment: &str,
        date: &str,
        slot: &str,
        patient: &str,
        patient_name: &str,
        transaction_id: &str,
    ) -> serde_json::Value {
        json!({
            "id": id,
            "treatment": treatment,
            "date": date,
            "slot": slot,
            "patient": patient,
            "patient_name": patient_name,
            "paid": true,
            "transaction_id": transaction_id,
        })
    }

    pub fn user_row(email: &str, role: Option<&str>) -> serde_json::Value {
        json!({
            "email": email,
            "role": role,
        })
    }

    pub fn doctor_row(id: Uuid, name: &str, email: &str, specialty: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "email": email,
            "specialty": specialty,
        })
    }

    pub fn payment_intent_response(id: &str, client_secret: &str, amount: i64) -> serde_json::Value {
        json!({
            "id": id,
            "object": "payment_intent",
            "amount": amount,
            "currency": "usd",
            "client_secret": client_secret,
            "status": "requires_payment_method",
        })
    }

    pub fn email_sent_response() -> serde_json::Value {
        json!({
            "id": Uuid::new_v4(),
        })
    }

    pub fn error_response(message: &str, code: &str) -> serde_json::Value {
        json!({
            "error": {
                "message": message,
                "code": code
            }
        })
    }
}
