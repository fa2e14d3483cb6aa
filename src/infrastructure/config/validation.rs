//! Schema validation of a raw configuration document.
//!
//! Walks an untyped `serde_json::Value` and builds a [`ConfigDocument`].
//! Checks run in a fixed order and the first failure aborts the load:
//!
//! 1. required top-level keys
//! 2. field types and ranges, then gas consistency across profiles
//! 3. account address encoding
//! 4. non-empty `networks` and `compilers`

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::net::IpAddr;
use tracing::debug;

use crate::domain::error::{ConfigError, ConfigResult, ConfigWarning, ROOT_PATH};
use crate::domain::models::{
    Address, CompilerProfile, ConfigDocument, NetworkId, NetworkProfile, OptimizerSettings,
    RpcEndpoint, MAX_GAS_LIMIT,
};

const TOP_LEVEL_KEYS: &[&str] = &["rpc", "networks", "compilers"];
const RPC_KEYS: &[&str] = &["host", "port"];
const NETWORK_KEYS: &[&str] = &[
    "host",
    "port",
    "network_id",
    "from",
    "gas",
    "gasPrice",
    "confirmations",
    "timeoutBlocks",
    "skipDryRun",
    "websockets",
];
const COMPILER_KEYS: &[&str] = &["version", "settings", "optimizer"];
const SETTINGS_KEYS: &[&str] = &["optimizer", "evmVersion"];
const OPTIMIZER_KEYS: &[&str] = &["enabled", "runs"];

const MIN_PORT: u64 = 1;
const MAX_PORT: u64 = u16::MAX as u64;
const MAX_RUNS: u64 = u32::MAX as u64;
const MAX_HOSTNAME_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// A validated document plus the non-fatal findings made while building it.
#[derive(Debug, Clone)]
pub struct Validated {
    pub document: ConfigDocument,
    pub warnings: Vec<ConfigWarning>,
}

/// Network profile whose `from` field has been type-checked but not decoded.
struct PendingNetwork<'a> {
    profile: NetworkProfile,
    from: Option<(String, &'a str)>,
}

/// Validate a raw document and build the typed configuration.
pub fn validate_document(raw: &Value) -> ConfigResult<Validated> {
    let mut warnings = Vec::new();
    let root = object(raw, ROOT_PATH)?;

    for key in TOP_LEVEL_KEYS {
        required(root, "", key)?;
    }
    collect_unknown_keys(root, "", TOP_LEVEL_KEYS, &mut warnings);

    let rpc = parse_rpc(&root["rpc"], &mut warnings)?;

    let raw_networks = object(&root["networks"], "networks")?;
    let mut pending = Vec::with_capacity(raw_networks.len());
    for (name, value) in raw_networks {
        pending.push(parse_network(name, value, &mut warnings)?);
    }

    let raw_compilers = object(&root["compilers"], "compilers")?;
    let mut compilers = BTreeMap::new();
    for (id, value) in raw_compilers {
        let compiler = parse_compiler(id, value, &mut warnings)?;
        compilers.insert(id.clone(), compiler);
    }

    require_consistent(&pending, "gas", |p| p.gas_limit.is_some())?;
    require_consistent(&pending, "gasPrice", |p| p.gas_price.is_some())?;

    let mut networks = BTreeMap::new();
    for PendingNetwork { mut profile, from } in pending {
        if let Some((path, encoded)) = from {
            let address = encoded
                .parse::<Address>()
                .map_err(|e| ConfigError::InvalidAddress {
                    path,
                    reason: e.to_string(),
                })?;
            profile.from_address = Some(address);
        }
        networks.insert(profile.name.clone(), profile);
    }

    if networks.is_empty() {
        return Err(ConfigError::EmptyConfiguration {
            path: "networks".to_string(),
        });
    }
    if compilers.is_empty() {
        return Err(ConfigError::EmptyConfiguration {
            path: "compilers".to_string(),
        });
    }

    Ok(Validated {
        document: ConfigDocument {
            rpc,
            networks,
            compilers,
        },
        warnings,
    })
}

fn parse_rpc(value: &Value, warnings: &mut Vec<ConfigWarning>) -> ConfigResult<RpcEndpoint> {
    let path = "rpc";
    let map = object(value, path)?;
    collect_unknown_keys(map, path, RPC_KEYS, warnings);

    Ok(RpcEndpoint {
        host: host(required(map, path, "host")?, &join(path, "host"))?,
        port: port(required(map, path, "port")?, &join(path, "port"))?,
    })
}

fn parse_network<'a>(
    name: &str,
    value: &'a Value,
    warnings: &mut Vec<ConfigWarning>,
) -> ConfigResult<PendingNetwork<'a>> {
    if name.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            path: "networks".to_string(),
            reason: "network profile name cannot be empty".to_string(),
        });
    }

    let path = join("networks", name);
    let map = object(value, &path)?;
    collect_unknown_keys(map, &path, NETWORK_KEYS, warnings);

    let field = |key: &str| join(&path, key);

    let from = optional(map, "from")
        .map(|v| string(v, &field("from")).map(|s| (field("from"), s)))
        .transpose()?;

    let profile = NetworkProfile {
        name: name.to_string(),
        host: host(required(map, &path, "host")?, &field("host"))?,
        port: port(required(map, &path, "port")?, &field("port"))?,
        network_id: network_id(required(map, &path, "network_id")?, &field("network_id"))?,
        from_address: None,
        gas_limit: optional(map, "gas")
            .map(|v| integer(v, &field("gas"), 1, MAX_GAS_LIMIT))
            .transpose()?,
        gas_price: optional(map, "gasPrice")
            .map(|v| integer(v, &field("gasPrice"), 0, u64::MAX))
            .transpose()?,
        confirmations: optional(map, "confirmations")
            .map(|v| integer(v, &field("confirmations"), 0, u64::MAX))
            .transpose()?,
        timeout_blocks: optional(map, "timeoutBlocks")
            .map(|v| integer(v, &field("timeoutBlocks"), 1, u64::MAX))
            .transpose()?,
        skip_dry_run: optional(map, "skipDryRun")
            .map(|v| boolean(v, &field("skipDryRun")))
            .transpose()?,
        websockets: optional(map, "websockets")
            .map(|v| boolean(v, &field("websockets")))
            .transpose()?,
    };

    debug!(network = %name, url = %profile.rpc_url(), "parsed network profile");
    Ok(PendingNetwork { profile, from })
}

fn parse_compiler(
    id: &str,
    value: &Value,
    warnings: &mut Vec<ConfigWarning>,
) -> ConfigResult<CompilerProfile> {
    if id.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            path: "compilers".to_string(),
            reason: "compiler id cannot be empty".to_string(),
        });
    }

    let path = join("compilers", id);
    let map = object(value, &path)?;
    collect_unknown_keys(map, &path, COMPILER_KEYS, warnings);

    let version = optional(map, "version")
        .map(|v| string(v, &join(&path, "version")).map(str::to_string))
        .transpose()?;

    let settings_path = join(&path, "settings");
    let settings = optional(map, "settings")
        .map(|v| object(v, &settings_path))
        .transpose()?;

    let mut evm_version = None;
    let mut nested_optimizer = None;
    if let Some(settings) = settings {
        collect_unknown_keys(settings, &settings_path, SETTINGS_KEYS, warnings);
        evm_version = optional(settings, "evmVersion")
            .map(|v| string(v, &join(&settings_path, "evmVersion")).map(str::to_string))
            .transpose()?;
        nested_optimizer = optional(settings, "optimizer");
    }

    let (optimizer_value, optimizer_path) = match (nested_optimizer, optional(map, "optimizer")) {
        (Some(_), Some(_)) => {
            return Err(ConfigError::InvalidValue {
                path: join(&path, "optimizer"),
                reason: "optimizer is given both here and under settings".to_string(),
            });
        }
        (Some(nested), None) => (nested, join(&settings_path, "optimizer")),
        (None, Some(flat)) => (flat, join(&path, "optimizer")),
        (None, None) => {
            return Err(ConfigError::MissingField {
                path: join(&settings_path, "optimizer"),
            });
        }
    };

    let optimizer = parse_optimizer(optimizer_value, &optimizer_path, warnings)?;

    debug!(compiler = %id, optimizer_enabled = optimizer.enabled, "parsed compiler profile");
    Ok(CompilerProfile {
        id: id.to_string(),
        version,
        optimizer,
        evm_version,
    })
}

fn parse_optimizer(
    value: &Value,
    path: &str,
    warnings: &mut Vec<ConfigWarning>,
) -> ConfigResult<OptimizerSettings> {
    let map = object(value, path)?;
    collect_unknown_keys(map, path, OPTIMIZER_KEYS, warnings);

    let enabled = boolean(required(map, path, "enabled")?, &join(path, "enabled"))?;
    let runs_path = join(path, "runs");
    let runs = optional(map, "runs")
        .map(|v| {
            let runs = integer(v, &runs_path, 0, MAX_RUNS)?;
            u32::try_from(runs).map_err(|_| ConfigError::OutOfRange {
                path: runs_path.clone(),
                value: i128::from(runs),
                min: 0,
                max: MAX_RUNS,
            })
        })
        .transpose()?;

    match (enabled, runs) {
        (true, None) => return Err(ConfigError::MissingField { path: runs_path }),
        (false, Some(_)) => {
            warnings.push(ConfigWarning::OptimizerRunsIgnored { path: runs_path });
        }
        _ => {}
    }

    Ok(OptimizerSettings { enabled, runs })
}

/// Gas fields are all-or-nothing across profiles. The first profile (in key
/// order) missing a field that another profile sets is reported.
fn require_consistent(
    pending: &[PendingNetwork<'_>],
    key: &str,
    has: impl Fn(&NetworkProfile) -> bool,
) -> ConfigResult<()> {
    if !pending.iter().any(|p| has(&p.profile)) {
        return Ok(());
    }

    match pending.iter().find(|p| !has(&p.profile)) {
        Some(missing) => Err(ConfigError::MissingField {
            path: join(&join("networks", &missing.profile.name), key),
        }),
        None => Ok(()),
    }
}

fn collect_unknown_keys(
    map: &Map<String, Value>,
    path: &str,
    known: &[&str],
    warnings: &mut Vec<ConfigWarning>,
) {
    for key in map.keys().filter(|k| !known.contains(&k.as_str())) {
        let key_path = join(path, key);
        debug!(path = %key_path, "ignoring unrecognized configuration key");
        warnings.push(ConfigWarning::UnknownKey { path: key_path });
    }
}

fn join(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn mismatch(path: &str, expected: &'static str, value: &Value) -> ConfigError {
    ConfigError::TypeMismatch {
        path: path.to_string(),
        expected,
        found: kind(value),
    }
}

/// A present, non-null field. `null` counts as missing.
fn required<'a>(map: &'a Map<String, Value>, parent: &str, key: &str) -> ConfigResult<&'a Value> {
    optional(map, key).ok_or_else(|| ConfigError::MissingField {
        path: join(parent, key),
    })
}

fn optional<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|v| !v.is_null())
}

fn object<'a>(value: &'a Value, path: &str) -> ConfigResult<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| mismatch(path, "object", value))
}

fn string<'a>(value: &'a Value, path: &str) -> ConfigResult<&'a str> {
    value.as_str().ok_or_else(|| mismatch(path, "string", value))
}

fn boolean(value: &Value, path: &str) -> ConfigResult<bool> {
    value.as_bool().ok_or_else(|| mismatch(path, "boolean", value))
}

fn integer(value: &Value, path: &str, min: u64, max: u64) -> ConfigResult<u64> {
    let out_of_range = |value: i128| ConfigError::OutOfRange {
        path: path.to_string(),
        value,
        min,
        max,
    };

    if let Some(n) = value.as_u64() {
        if (min..=max).contains(&n) {
            Ok(n)
        } else {
            Err(out_of_range(i128::from(n)))
        }
    } else if let Some(n) = value.as_i64() {
        Err(out_of_range(i128::from(n)))
    } else if let Some(n) = value.as_f64().filter(|&n| is_wide_integer(n)) {
        Err(out_of_range(saturate(n)))
    } else {
        Err(mismatch(path, "integer", value))
    }
}

/// Integer literals beyond 64 bits arrive as floats. Every finite float
/// that large is integral.
#[allow(clippy::cast_precision_loss)]
fn is_wide_integer(n: f64) -> bool {
    n.is_finite() && (n >= u64::MAX as f64 || n < i64::MIN as f64)
}

/// Float-to-int casts saturate at the `i128` bounds.
#[allow(clippy::cast_possible_truncation)]
fn saturate(n: f64) -> i128 {
    n as i128
}

fn port(value: &Value, path: &str) -> ConfigResult<u16> {
    let port = integer(value, path, MIN_PORT, MAX_PORT)?;
    u16::try_from(port).map_err(|_| ConfigError::OutOfRange {
        path: path.to_string(),
        value: i128::from(port),
        min: MIN_PORT,
        max: MAX_PORT,
    })
}

fn host(value: &Value, path: &str) -> ConfigResult<String> {
    let host = string(value, path)?;
    let invalid = |reason: String| ConfigError::InvalidValue {
        path: path.to_string(),
        reason,
    };

    if host.trim().is_empty() {
        return Err(invalid("host cannot be empty".to_string()));
    }
    if host.parse::<IpAddr>().is_ok() || is_hostname(host) {
        Ok(host.to_string())
    } else {
        Err(invalid(format!("'{host}' is not a valid hostname or IP address")))
    }
}

/// RFC 1123 hostname. A name made only of numeric labels is a malformed
/// IPv4 address, not a hostname.
fn is_hostname(host: &str) -> bool {
    let host = host.strip_suffix('.').unwrap_or(host);
    let all_numeric = host
        .split('.')
        .all(|label| label.bytes().all(|b| b.is_ascii_digit()));

    host.len() <= MAX_HOSTNAME_LEN
        && !all_numeric
        && host.split('.').all(|label| {
            !label.is_empty()
                && label.len() <= MAX_LABEL_LEN
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}

fn network_id(value: &Value, path: &str) -> ConfigResult<NetworkId> {
    match value {
        Value::String(s) if s == "*" => Ok(NetworkId::Any),
        Value::String(s) => s.parse::<u64>().map(NetworkId::Id).map_err(|_| {
            ConfigError::InvalidValue {
                path: path.to_string(),
                reason: format!("'{s}' is neither \"*\" nor a numeric network id"),
            }
        }),
        Value::Number(_) => integer(value, path, 0, u64::MAX).map(NetworkId::Id),
        _ => Err(mismatch(path, "\"*\" or integer network id", value)),
    }
}
