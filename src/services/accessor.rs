//! Read-only lookup over a loaded configuration document.

use std::sync::Arc;
use tracing::debug;

use crate::domain::error::ConfigResult;
use crate::domain::models::{CompilerProfile, ConfigDocument, NetworkProfile, RpcEndpoint};

/// Shared handle used by deployment and compiler tooling.
///
/// Cloning is cheap and the handle can be sent to other threads or tasks;
/// the underlying document is immutable so no locking is involved.
#[derive(Debug, Clone)]
pub struct ConfigAccessor {
    document: Arc<ConfigDocument>,
}

impl ConfigAccessor {
    pub fn new(document: ConfigDocument) -> Self {
        Self {
            document: Arc::new(document),
        }
    }

    pub const fn from_shared(document: Arc<ConfigDocument>) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &ConfigDocument {
        &self.document
    }

    pub fn rpc_endpoint(&self) -> &RpcEndpoint {
        self.document.rpc_endpoint()
    }

    /// Profile for `name`, or `UnknownNetwork`.
    pub fn network(&self, name: &str) -> ConfigResult<&NetworkProfile> {
        self.document.network(name).inspect_err(|_| {
            debug!(network = %name, "lookup of unknown network");
        })
    }

    /// Profile for compiler `id`, or `UnknownCompiler`.
    pub fn compiler(&self, id: &str) -> ConfigResult<&CompilerProfile> {
        self.document.compiler(id).inspect_err(|_| {
            debug!(compiler = %id, "lookup of unknown compiler");
        })
    }

    pub fn network_names(&self) -> Vec<&str> {
        self.document.network_names().collect()
    }

    pub fn compiler_ids(&self) -> Vec<&str> {
        self.document.compiler_ids().collect()
    }
}

impl From<ConfigDocument> for ConfigAccessor {
    fn from(document: ConfigDocument) -> Self {
        Self::new(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::ConfigError;
    use crate::infrastructure::config::ConfigLoader;
    use serde_json::json;
    use std::thread;

    fn accessor() -> ConfigAccessor {
        let raw = json!({
            "rpc": { "host": "127.0.0.1", "port": 8543 },
            "networks": {
                "test": { "host": "127.0.0.1", "port": 8543, "network_id": "*" },
                "ganache": { "host": "localhost", "port": 7545, "network_id": 5777 }
            },
            "compilers": {
                "solc": { "settings": { "optimizer": { "enabled": false } } }
            }
        });
        ConfigLoader::load_value(&raw).unwrap().into()
    }

    #[test]
    fn test_rpc_endpoint() {
        let accessor = accessor();
        assert_eq!(accessor.rpc_endpoint().host, "127.0.0.1");
        assert_eq!(accessor.rpc_endpoint().port, 8543);
    }

    #[test]
    fn test_unknown_lookups() {
        let accessor = accessor();
        assert!(matches!(
            accessor.network("nonexistent"),
            Err(ConfigError::UnknownNetwork(name)) if name == "nonexistent"
        ));
        assert!(matches!(
            accessor.compiler("vyper"),
            Err(ConfigError::UnknownCompiler(id)) if id == "vyper"
        ));
        // Recoverable: retry with a valid name.
        assert_eq!(accessor.network("ganache").unwrap().port, 7545);
    }

    #[test]
    fn test_names_sorted() {
        let accessor = accessor();
        assert_eq!(accessor.network_names(), vec!["ganache", "test"]);
        assert_eq!(accessor.compiler_ids(), vec!["solc"]);
    }

    #[test]
    fn test_shared_across_threads() {
        let accessor = accessor();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let accessor = accessor.clone();
                thread::spawn(move || accessor.network("test").map(|n| n.port).ok())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), Some(8543));
        }
    }
}
