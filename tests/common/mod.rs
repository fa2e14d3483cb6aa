//! Common test utilities for integration tests
//!
//! Shared fixtures used across multiple integration test files.

#![allow(dead_code)]

use serde_json::{json, Value};
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// Path of the reference geth development network configuration.
pub fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/truffle-geth.yaml")
}

/// The reference document as an injected value.
pub fn reference_value() -> Value {
    json!({
        "rpc": { "host": "127.0.0.1", "port": 8543 },
        "networks": {
            "test": {
                "host": "127.0.0.1",
                "port": 8543,
                "network_id": "*",
                "from": "854c55d65bf425569263d5fae98d01bd7a96fd3c",
                "gas": 17_592_186_044_415_u64,
                "gasPrice": 1
            }
        },
        "compilers": {
            "solc": { "settings": { "optimizer": { "enabled": true, "runs": 200 } } }
        }
    })
}

/// Write `content` to a temporary file with the given suffix.
pub fn temp_config(content: &str, suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp config");
    file.flush().expect("Failed to flush temp config");
    file
}
