//! Configuration management infrastructure
//!
//! - Loading and validating development network documents
//! - Tool settings with figment (defaults, file, environment)

pub mod loader;
pub mod settings;
pub mod validation;

pub use loader::{ConfigLoader, SourceFormat};
pub use settings::{Settings, SettingsError, SettingsLoader};
pub use validation::{validate_document, Validated};
