//! Process-wide configuration document.
//!
//! Installed once at startup and read-only for the rest of the process.

use std::path::Path;
use std::sync::{Arc, OnceLock};

use super::accessor::ConfigAccessor;
use crate::domain::error::{ConfigError, ConfigResult};
use crate::domain::models::ConfigDocument;
use crate::infrastructure::config::ConfigLoader;

/// Global configuration document singleton
static DOCUMENT: OnceLock<Arc<ConfigDocument>> = OnceLock::new();

/// Install the document. Fails with `AlreadyInitialized` on a second call.
pub fn init(document: ConfigDocument) -> ConfigResult<ConfigAccessor> {
    DOCUMENT
        .set(Arc::new(document))
        .map_err(|_| ConfigError::AlreadyInitialized)?;
    accessor()
}

/// Load a file and install the result.
pub fn init_from_file(path: impl AsRef<Path>) -> ConfigResult<ConfigAccessor> {
    if DOCUMENT.get().is_some() {
        return Err(ConfigError::AlreadyInitialized);
    }
    init(ConfigLoader::load_file(path)?)
}

/// Get the global document (after initialization)
pub fn get() -> Option<&'static ConfigDocument> {
    DOCUMENT.get().map(Arc::as_ref)
}

/// Accessor over the global document, or `NotInitialized`.
pub fn accessor() -> ConfigResult<ConfigAccessor> {
    DOCUMENT
        .get()
        .cloned()
        .map(ConfigAccessor::from_shared)
        .ok_or(ConfigError::NotInitialized)
}
