//! Logging initialization.

mod setup;

pub use setup::init_logging;
