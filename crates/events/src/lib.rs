//! OfficeHub event bus and activity log.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`OfficeEvent`]: the domain event envelope published by handlers after
//!   a unit of work commits.
//! - [`EventPersistence`]: background task that appends every known event
//!   to the activity log.

pub mod bus;
pub mod event_types;
pub mod persistence;

pub use bus::{EventBus, OfficeEvent};
pub use persistence::EventPersistence;
