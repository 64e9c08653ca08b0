pub mod admin;
pub mod alert;
pub mod analytics;
pub mod attendance;
pub mod auth;
pub mod booking;
pub mod catalog;
pub mod notification;
