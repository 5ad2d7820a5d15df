use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub access_token_secret: String,
    pub stripe_secret_key: String,
    pub stripe_api_base: String,
    pub email_api_key: String,
    pub email_api_base: String,
    pub email_from: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            supabase_url: env::var("SUPABASE_URL")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_URL not set, using empty value");
                    String::new()
                }),
            supabase_anon_key: env::var("SUPABASE_ANON_PUBLIC_KEY")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_ANON_PUBLIC_KEY not set, using empty value");
                    String::new()
                }),
            access_token_secret: env::var("ACCESS_TOKEN_SECRET")
                .unwrap_or_else(|_| {
                    warn!("ACCESS_TOKEN_SECRET not set, using empty value");
                    String::new()
                }),
            stripe_secret_key: env::var("STRIPE_SECRET_KEY")
                .unwrap_or_else(|_| {
                    warn!("STRIPE_SECRET_KEY not set, using empty value");
                    String::new()
                }),
            stripe_api_base: env::var("STRIPE_API_BASE")
                .unwrap_or_else(|_| "https://api.stripe.com".to_string()),
            email_api_key: env::var("EMAIL_API_KEY")
                .unwrap_or_else(|_| {
                    warn!("EMAIL_API_KEY not set, email notifications disabled");
                    String::new()
                }),
            email_api_base: env::var("EMAIL_API_BASE")
                .unwrap_or_else(|_| "https://api.resend.com".to_string()),
            email_from: env::var("EMAIL_FROM")
                .unwrap_or_else(|_| "Doctors Portal <noreply@doctorsportal.example>".to_string()),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.supabase_url.is_empty()
            && !self.supabase_anon_key.is_empty()
            && !self.access_token_secret.is_empty()
    }

    pub fn is_payments_configured(&self) -> bool {
        !self.stripe_secret_key.is_empty() && !self.stripe_api_base.is_empty()
    }

    pub fn is_email_configured(&self) -> bool {
        !self.email_api_key.is_empty()
            && !self.email_api_base.is_empty()
            && !self.email_from.is_empty()
    }
}
