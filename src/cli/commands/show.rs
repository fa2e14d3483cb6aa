//! Implementation of the `devnet-config show` command.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::cli::display::{output, CommandOutput, DetailView};
use crate::domain::models::{CompilerProfile, NetworkProfile, RpcEndpoint};
use crate::infrastructure::config::ConfigLoader;
use crate::services::ConfigAccessor;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Configuration file to read
    pub path: PathBuf,

    /// Network profile to show
    #[arg(short, long, conflicts_with = "compiler")]
    pub network: Option<String>,

    /// Compiler profile to show
    #[arg(short, long)]
    pub compiler: Option<String>,
}

#[derive(Debug, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShowOutput {
    Rpc {
        url: String,
        endpoint: RpcEndpoint,
    },
    Network {
        name: String,
        url: String,
        profile: NetworkProfile,
    },
    Compiler {
        id: String,
        solc_args: Vec<String>,
        profile: CompilerProfile,
    },
}

impl ShowOutput {
    pub fn resolve(accessor: &ConfigAccessor, args: &ShowArgs) -> Result<Self> {
        if let Some(name) = &args.network {
            let profile = accessor.network(name)?;
            return Ok(Self::Network {
                name: name.clone(),
                url: profile.rpc_url(),
                profile: profile.clone(),
            });
        }

        if let Some(id) = &args.compiler {
            let profile = accessor.compiler(id)?;
            return Ok(Self::Compiler {
                id: id.clone(),
                solc_args: profile.optimizer.solc_args(),
                profile: profile.clone(),
            });
        }

        let endpoint = accessor.rpc_endpoint();
        Ok(Self::Rpc {
            url: endpoint.url(),
            endpoint: endpoint.clone(),
        })
    }
}

impl CommandOutput for ShowOutput {
    fn to_human(&self) -> String {
        match self {
            Self::Rpc { url, endpoint } => DetailView::new("RPC endpoint")
                .field("Host", &endpoint.host)
                .field("Port", &endpoint.port.to_string())
                .field("URL", url)
                .render(),
            Self::Network { name, url, profile } => DetailView::new(&format!("Network {name}"))
                .field("URL", url)
                .field("Network ID", &profile.network_id.to_string())
                .field_opt("From", profile.from_address.map(|a| a.to_string()))
                .field_opt("Confirmations", profile.confirmations.map(|c| c.to_string()))
                .field_opt("Timeout blocks", profile.timeout_blocks.map(|t| t.to_string()))
                .field_opt("Skip dry run", profile.skip_dry_run.map(|s| s.to_string()))
                .field_opt("Websockets", profile.websockets.map(|w| w.to_string()))
                .section("Gas")
                .field_opt("Limit", profile.gas_limit.map(|g| g.to_string()))
                .field_opt("Price", profile.gas_price.map(|p| p.to_string()))
                .render(),
            Self::Compiler {
                id,
                solc_args,
                profile,
            } => DetailView::new(&format!("Compiler {id}"))
                .field_opt("Version", profile.version.clone())
                .field_opt("EVM version", profile.evm_version.clone())
                .section("Optimizer")
                .field("Enabled", &profile.optimizer.enabled.to_string())
                .field_opt("Runs", profile.optimizer.runs.map(|r| r.to_string()))
                .field("solc flags", &solc_args.join(" "))
                .render(),
        }
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(args: &ShowArgs, json_mode: bool) -> Result<()> {
    let accessor = ConfigAccessor::new(ConfigLoader::load_file(&args.path)?);
    let output_data = ShowOutput::resolve(&accessor, args)?;
    output(&output_data, json_mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::ConfigError;
    use serde_json::json;

    fn accessor() -> ConfigAccessor {
        let raw = json!({
            "rpc": { "host": "127.0.0.1", "port": 8543 },
            "networks": { "test": { "host": "127.0.0.1", "port": 8543, "network_id": "*", "gasPrice": 1 } },
            "compilers": { "solc": { "settings": { "optimizer": { "enabled": true, "runs": 200 } } } }
        });
        ConfigLoader::load_value(&raw).unwrap().into()
    }

    fn args(network: Option<&str>, compiler: Option<&str>) -> ShowArgs {
        ShowArgs {
            path: PathBuf::from("devnet.yaml"),
            network: network.map(str::to_string),
            compiler: compiler.map(str::to_string),
        }
    }

    #[test]
    fn test_show_rpc_by_default() {
        let shown = ShowOutput::resolve(&accessor(), &args(None, None)).unwrap();
        let value = shown.to_json();
        assert_eq!(value["kind"], json!("rpc"));
        assert_eq!(value["url"], json!("http://127.0.0.1:8543"));
        assert_eq!(value["endpoint"]["port"], json!(8543));
    }

    #[test]
    fn test_show_network() {
        let shown = ShowOutput::resolve(&accessor(), &args(Some("test"), None)).unwrap();
        let value = shown.to_json();
        assert_eq!(value["kind"], json!("network"));
        assert_eq!(value["profile"]["gasPrice"], json!(1));
        assert_eq!(value["profile"]["network_id"], json!("*"));
    }

    #[test]
    fn test_show_compiler_flags() {
        let shown = ShowOutput::resolve(&accessor(), &args(None, Some("solc"))).unwrap();
        match shown {
            ShowOutput::Compiler { solc_args, .. } => {
                assert_eq!(solc_args, vec!["--optimize", "--optimize-runs", "200"]);
            }
            other => panic!("Expected compiler output, got {other:?}"),
        }
    }

    #[test]
    fn test_show_unknown_network() {
        let err = ShowOutput::resolve(&accessor(), &args(Some("mainnet"), None)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::UnknownNetwork(name)) if name == "mainnet"
        ));
    }
}
