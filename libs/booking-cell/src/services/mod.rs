pub mod availability;
pub mod booking;
pub mod catalog;
pub mod mailer;

pub use availability::AvailabilityService;
pub use booking::BookingService;
pub use catalog::CatalogService;
pub use mailer::EmailClient;
