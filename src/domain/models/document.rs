//! Typed development network configuration and its lookups.

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::net::Ipv6Addr;

use super::address::Address;
use crate::domain::error::{ConfigError, ConfigResult};

/// Highest gas limit a profile may request (2^44 - 1).
pub const MAX_GAS_LIMIT: u64 = (1 << 44) - 1;

/// Validated development network configuration.
///
/// Built once by the loader and never mutated afterwards. Maps are keyed by
/// profile name / compiler id and iterate in key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigDocument {
    /// Default RPC listener of the local node
    pub rpc: RpcEndpoint,

    /// Named deployment/test targets
    pub networks: BTreeMap<String, NetworkProfile>,

    /// Compiler profiles keyed by compiler id (e.g. `solc`)
    pub compilers: BTreeMap<String, CompilerProfile>,
}

impl ConfigDocument {
    pub const fn rpc_endpoint(&self) -> &RpcEndpoint {
        &self.rpc
    }

    pub fn network(&self, name: &str) -> ConfigResult<&NetworkProfile> {
        self.networks
            .get(name)
            .ok_or_else(|| ConfigError::UnknownNetwork(name.to_string()))
    }

    pub fn compiler(&self, id: &str) -> ConfigResult<&CompilerProfile> {
        self.compilers
            .get(id)
            .ok_or_else(|| ConfigError::UnknownCompiler(id.to_string()))
    }

    pub fn network_names(&self) -> impl Iterator<Item = &str> {
        self.networks.keys().map(String::as_str)
    }

    pub fn compiler_ids(&self) -> impl Iterator<Item = &str> {
        self.compilers.keys().map(String::as_str)
    }
}

/// Host and port where a node accepts RPC calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RpcEndpoint {
    pub host: String,
    pub port: u16,
}

impl RpcEndpoint {
    /// HTTP URL for the endpoint. IPv6 literals are bracketed.
    pub fn url(&self) -> String {
        http_url(&self.host, self.port)
    }
}

fn http_url(host: &str, port: u16) -> String {
    if host.parse::<Ipv6Addr>().is_ok() {
        format!("http://[{host}]:{port}")
    } else {
        format!("http://{host}:{port}")
    }
}

/// Network identifier a profile accepts.
///
/// Only the `"*"` wildcard and numeric ids are representable. Node network
/// ids are integers, so a non-numeric string such as `"devnet"` is rejected
/// at load time rather than carried as an opaque identifier. Numeric strings
/// (`"1337"`) are accepted and normalized to [`NetworkId::Id`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetworkId {
    /// `"*"`: match whatever id the node reports
    Any,
    Id(u64),
}

impl NetworkId {
    pub const fn matches(self, reported: u64) -> bool {
        match self {
            Self::Any => true,
            Self::Id(id) => id == reported,
        }
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("*"),
            Self::Id(id) => write!(f, "{id}"),
        }
    }
}

impl Serialize for NetworkId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Any => serializer.serialize_str("*"),
            Self::Id(id) => serializer.serialize_u64(*id),
        }
    }
}

/// One named deployment/test target.
///
/// `gas_limit` and `gas_price` are either set on every profile of a document
/// or on none of them. The trailing optional knobs are passed through to the
/// deployment runner untouched; `None` means the runner's own default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkProfile {
    /// Key of this profile in the document
    #[serde(skip)]
    pub name: String,

    pub host: String,

    pub port: u16,

    #[serde(rename = "network_id")]
    pub network_id: NetworkId,

    /// Account transactions are sent from
    #[serde(rename = "from", skip_serializing_if = "Option::is_none")]
    pub from_address: Option<Address>,

    #[serde(rename = "gas", skip_serializing_if = "Option::is_none")]
    pub gas_limit: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<u64>,

    /// Blocks to wait between deployments
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmations: Option<u64>,

    /// Blocks before a deployment times out
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_blocks: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_dry_run: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub websockets: Option<bool>,
}

impl NetworkProfile {
    pub fn rpc_url(&self) -> String {
        http_url(&self.host, self.port)
    }

    pub const fn matches_network_id(&self, reported: u64) -> bool {
        self.network_id.matches(reported)
    }
}

/// Compiler optimizer switch and its `runs` hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OptimizerSettings {
    pub enabled: bool,

    /// Required when enabled; may be omitted otherwise
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runs: Option<u32>,
}

impl OptimizerSettings {
    /// `runs` as the compiler will see it: only when the optimizer is on.
    pub const fn effective_runs(&self) -> Option<u32> {
        if self.enabled {
            self.runs
        } else {
            None
        }
    }

    /// Command-line flags for `solc`.
    pub fn solc_args(&self) -> Vec<String> {
        match self.effective_runs() {
            Some(runs) => vec![
                "--optimize".to_string(),
                "--optimize-runs".to_string(),
                runs.to_string(),
            ],
            None if self.enabled => vec!["--optimize".to_string()],
            None => Vec::new(),
        }
    }
}

/// Compiler identity and optimization settings.
///
/// Serialized in the nested `settings.optimizer` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerProfile {
    /// Key of this profile in the document
    pub id: String,

    /// Pinned compiler version, if any
    pub version: Option<String>,

    pub optimizer: OptimizerSettings,

    pub evm_version: Option<String>,
}

impl CompilerProfile {
    /// `settings` object of a solc standard-JSON input.
    pub fn standard_json_settings(&self) -> serde_json::Value {
        let mut optimizer = serde_json::Map::new();
        optimizer.insert("enabled".to_string(), self.optimizer.enabled.into());
        if let Some(runs) = self.optimizer.runs {
            optimizer.insert("runs".to_string(), runs.into());
        }

        let mut settings = serde_json::Map::new();
        settings.insert("optimizer".to_string(), optimizer.into());
        if let Some(evm_version) = &self.evm_version {
            settings.insert("evmVersion".to_string(), evm_version.clone().into());
        }
        settings.into()
    }
}

impl Serialize for CompilerProfile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Settings<'a> {
            optimizer: &'a OptimizerSettings,
            #[serde(skip_serializing_if = "Option::is_none")]
            evm_version: Option<&'a str>,
        }

        #[derive(Serialize)]
        struct Wire<'a> {
            #[serde(skip_serializing_if = "Option::is_none")]
            version: Option<&'a str>,
            settings: Settings<'a>,
        }

        Wire {
            version: self.version.as_deref(),
            settings: Settings {
                optimizer: &self.optimizer,
                evm_version: self.evm_version.as_deref(),
            },
        }
        .serialize(serializer)
    }
}
