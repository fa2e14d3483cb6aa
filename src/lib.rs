//! devnet-config - development network configuration
//!
//! Loads, validates and serves the connection and compiler parameters a
//! smart-contract toolchain uses against a local development network.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): the typed document and error taxonomy
//! - **Infrastructure Layer** (`infrastructure`): loading, validation, tool
//!   settings and logging
//! - **Service Layer** (`services`): read-only accessor and the process-wide
//!   document
//! - **CLI Layer** (`cli`): `check`, `show` and `export` commands
//!
//! # Example
//!
//! ```ignore
//! use devnet_config::{ConfigAccessor, ConfigLoader};
//!
//! let accessor = ConfigAccessor::new(ConfigLoader::load_file("devnet.yaml")?);
//! let test = accessor.network("test")?;
//! println!("deploying to {}", test.rpc_url());
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    Address, CompilerProfile, ConfigDocument, NetworkId, NetworkProfile, OptimizerSettings,
    RpcEndpoint,
};
pub use domain::{ConfigError, ConfigResult, ConfigWarning};
pub use infrastructure::config::{ConfigLoader, SourceFormat, Validated};
pub use services::{global, ConfigAccessor};
