//! Shared report vocabulary
//!
//! Every validator emits the same violation shape and grades detections on
//! the same confidence scale, so callers can merge reports across languages
//! without per-language glue.

mod types;

pub use types::{Confidence, Location, Severity, Violation};
