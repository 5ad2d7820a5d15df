use reqwest::Method;
use tracing::debug;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{BookingError, Service, ServiceSummary};

pub struct CatalogService {
    supabase: SupabaseClient,
}

impl CatalogService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    /// Name-only listing for the treatment picker.
    pub async fn list_names(&self) -> Result<Vec<ServiceSummary>, BookingError> {
        debug!("Listing service names");

        let services: Vec<ServiceSummary> = self
            .supabase
            .request(
                Method::GET,
                "/rest/v1/services?select=name&order=name.asc",
                None,
            )
            .await?;

        Ok(services)
    }

    /// Full service rows including the daily slot templates.
    pub async fn list_with_slots(&self) -> Result<Vec<Service>, BookingError> {
        debug!("Listing services with slot templates");

        let services: Vec<Service> = self
            .supabase
            .request(
                Method::GET,
                "/rest/v1/services?select=name,slots&order=name.asc",
                None,
            )
            .await?;

        Ok(services)
    }
}
