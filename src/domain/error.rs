//! Errors and warnings produced while loading and querying a configuration
//! document.

use std::fmt;
use thiserror::Error;

/// Path reported for problems with the document root itself.
pub const ROOT_PATH: &str = "(root)";

/// Configuration error types
///
/// Every load-time variant carries the dotted path of the offending field,
/// e.g. `networks.test.port`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {path}")]
    MissingField { path: String },

    #[error("Type mismatch at {path}: expected {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Value out of range at {path}: {value}. Must be between {min} and {max}")]
    OutOfRange {
        path: String,
        value: i128,
        min: u64,
        max: u64,
    },

    #[error("Invalid address at {path}: {reason}")]
    InvalidAddress { path: String, reason: String },

    #[error("Invalid value at {path}: {reason}")]
    InvalidValue { path: String, reason: String },

    #[error("Configuration has no entries in {path}")]
    EmptyConfiguration { path: String },

    #[error("Unknown network: {0}")]
    UnknownNetwork(String),

    #[error("Unknown compiler: {0}")]
    UnknownCompiler(String),

    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} from '{source_name}': {message}")]
    Parse {
        source_name: String,
        format: &'static str,
        message: String,
    },

    #[error("Configuration document already initialized")]
    AlreadyInitialized,

    #[error("Configuration document not initialized")]
    NotInitialized,
}

impl ConfigError {
    /// Field path of a load-time error, if the error has one.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::MissingField { path }
            | Self::TypeMismatch { path, .. }
            | Self::OutOfRange { path, .. }
            | Self::InvalidAddress { path, .. }
            | Self::InvalidValue { path, .. }
            | Self::EmptyConfiguration { path }
            | Self::Io { path, .. } => Some(path.as_str()),
            _ => None,
        }
    }

    /// Lookup failures are recoverable at the call site; everything else
    /// aborts the load.
    pub const fn is_lookup(&self) -> bool {
        matches!(self, Self::UnknownNetwork(_) | Self::UnknownCompiler(_))
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Non-fatal findings reported alongside a successfully loaded document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// `runs` is set on an optimizer that is disabled.
    OptimizerRunsIgnored { path: String },

    /// A key the schema does not recognize. It is ignored.
    UnknownKey { path: String },
}

impl ConfigWarning {
    pub fn path(&self) -> &str {
        match self {
            Self::OptimizerRunsIgnored { path } | Self::UnknownKey { path } => path,
        }
    }
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OptimizerRunsIgnored { path } => {
                write!(f, "{path} is set but the optimizer is disabled; it has no effect")
            }
            Self::UnknownKey { path } => write!(f, "unrecognized key {path} is ignored"),
        }
    }
}
