//! Infrastructure layer module
//!
//! This module contains the I/O-facing adapters:
//! - Configuration loading and validation
//! - Logging infrastructure

pub mod config;
pub mod logging;
