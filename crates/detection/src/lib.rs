//! Client for the external face-mask detection service.
//!
//! The service is reached through the [`MaskDetector`] trait so handlers and
//! tests can swap in other implementations. [`detect_with_timeout`] turns
//! the optional image and optional detector of a check-in into a
//! [`DetectionOutcome`](officehub_core::compliance::DetectionOutcome).

pub mod client;
pub mod detector;

pub use client::{DetectionClient, DetectionError, DetectorHealth};
pub use detector::{detect_with_timeout, MaskDetector};
