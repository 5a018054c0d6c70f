//! Utility modules for plugin-registry

pub mod logging;

pub use logging::{init_logging, parse_level, LoggingConfig};
