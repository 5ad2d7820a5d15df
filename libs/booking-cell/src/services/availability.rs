use chrono::NaiveDate;
use reqwest::Method;
use tracing::debug;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{BookedSlot, BookingError, Service};
use crate::services::CatalogService;

/// Slots of `template` not claimed by `taken`, original order preserved.
pub fn remaining_slots(template: &[String], taken: &[String]) -> Vec<String> {
    template
        .iter()
        .filter(|slot| !taken.contains(slot))
        .cloned()
        .collect()
}

/// Replace each service's slot template with the slots still open given the
/// day's booked slots. Bookings for treatments outside the catalog are
/// ignored.
pub fn open_services(services: Vec<Service>, booked: &[BookedSlot]) -> Vec<Service> {
    services
        .into_iter()
        .map(|mut service| {
            let taken: Vec<String> = booked
                .iter()
                .filter(|entry| entry.treatment == service.name)
                .map(|entry| entry.slot.clone())
                .collect();
            service.slots = remaining_slots(&service.slots, &taken);
            service
        })
        .collect()
}

pub struct AvailabilityService {
    supabase: SupabaseClient,
    catalog: CatalogService,
}

impl AvailabilityService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
            catalog: CatalogService::new(config),
        }
    }

    /// All services with the slots still open on the given date.
    pub async fn availability_for_date(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<Service>, BookingError> {
        debug!("Computing availability for {}", date);

        let services = self.catalog.list_with_slots().await?;

        let path = format!("/rest/v1/bookings?date=eq.{}&select=treatment,slot", date);
        let booked: Vec<BookedSlot> = self.supabase.request(Method::GET, &path, None).await?;

        Ok(open_services(services, &booked))
    }
}
