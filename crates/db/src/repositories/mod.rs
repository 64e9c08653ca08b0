//! One repository per table. Repositories take `&Database` and acquire the
//! store lock exactly once per call.

pub mod activity_repo;
pub mod alert_repo;
pub mod analytics_repo;
pub mod booking_repo;
pub mod catalog_repo;
pub mod notification_repo;
pub mod presence_repo;
pub mod session_repo;
pub mod user_repo;

pub use activity_repo::ActivityRepo;
pub use alert_repo::AlertRepo;
pub use analytics_repo::AnalyticsRepo;
pub use booking_repo::BookingRepo;
pub use catalog_repo::CatalogRepo;
pub use notification_repo::NotificationRepo;
pub use presence_repo::PresenceRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
