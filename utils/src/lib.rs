//! Shared utilities for the identity registry.

pub mod logging;

pub use logging::{init_logging, LogFormat};
