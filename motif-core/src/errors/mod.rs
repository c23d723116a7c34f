//! Error types for configuration loading and the service surface.
//!
//! Parse failures inside a validation call are not represented here: a unit
//! that fails to parse produces a sentinel `parse-error` violation in the
//! report, because the broken thing is the input, not the call.

mod config_error;
mod service_error;

pub use config_error::ConfigError;
pub use service_error::ServiceError;
