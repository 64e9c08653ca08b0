pub mod activity;
pub mod alert;
pub mod booking;
pub mod catalog;
pub mod notification;
pub mod presence;
pub mod session;
pub mod user;
