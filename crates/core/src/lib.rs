//! OfficeHub domain logic.
//!
//! This crate has zero internal dependencies: it holds the booking conflict
//! rules, the attendance state machine, the mask compliance policy and the
//! analytics aggregations so that the repository layer, the API and any
//! future tooling share one definition of each rule.

pub mod alert;
pub mod analytics;
pub mod attendance;
pub mod booking;
pub mod catalog;
pub mod compliance;
pub mod error;
pub mod notification;
pub mod roles;
pub mod types;
