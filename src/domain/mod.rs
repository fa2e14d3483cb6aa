//! Domain layer for development network configuration
//!
//! This module contains the typed configuration document and its error
//! taxonomy. Nothing here performs I/O.

pub mod error;
pub mod models;

// Re-export error types for convenient access
pub use error::{ConfigError, ConfigResult, ConfigWarning};
