use reqwest::Method;
use serde_json::json;
use tracing::debug;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{PortalUser, UserError};

pub struct AccountService {
    supabase: SupabaseClient,
}

impl AccountService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    /// Create the user row if it does not exist yet. The merge upsert leaves
    /// an existing role untouched, so logging in never demotes an admin.
    pub async fn upsert_user(&self, email: &str) -> Result<PortalUser, UserError> {
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(UserError::Validation {
                message: format!("Invalid email address: {}", email),
            });
        }

        debug!("Upserting user: {}", email);

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "Prefer",
            reqwest::header::HeaderValue::from_static(
                "resolution=merge-duplicates,return=representation",
            ),
        );

        let result: Vec<PortalUser> = self
            .supabase
            .request_with_headers(
                Method::POST,
                "/rest/v1/users?on_conflict=email",
                Some(json!({ "email": email })),
                Some(headers),
            )
            .await?;

        result
            .into_iter()
            .next()
            .ok_or_else(|| UserError::Database {
                message: "Upsert returned no user row".to_string(),
            })
    }

    pub async fn list_users(&self) -> Result<Vec<PortalUser>, UserError> {
        debug!("Listing all users");

        let users: Vec<PortalUser> = self
            .supabase
            .request(Method::GET, "/rest/v1/users?select=email,role", None)
            .await?;

        Ok(users)
    }

    pub async fn find_user(&self, email: &str) -> Result<Option<PortalUser>, UserError> {
        debug!("Fetching user: {}", email);

        let path = format!("/rest/v1/users?email=eq.{}&select=email,role", email);
        let result: Vec<PortalUser> = self.supabase.request(Method::GET, &path, None).await?;

        Ok(result.into_iter().next())
    }

    /// Admin flag for the given email. Unknown users are reported as
    /// non-admin rather than an error.
    pub async fn is_admin(&self, email: &str) -> Result<bool, UserError> {
        let user = self.find_user(email).await?;
        Ok(user.map(|u| u.is_admin()).unwrap_or(false))
    }

    pub async fn grant_admin(&self, email: &str) -> Result<PortalUser, UserError> {
        debug!("Granting admin role to: {}", email);

        let path = format!("/rest/v1/users?email=eq.{}", email);
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "Prefer",
            reqwest::header::HeaderValue::from_static("return=representation"),
        );

        let result: Vec<PortalUser> = self
            .supabase
            .request_with_headers(
                Method::PATCH,
                &path,
                Some(json!({ "role": "admin" })),
                Some(headers),
            )
            .await?;

        result.into_iter().next().ok_or(UserError::NotFound)
    }
}
