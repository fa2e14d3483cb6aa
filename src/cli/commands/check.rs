//! Implementation of the `devnet-config check` command.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use crate::cli::display::{
    action_success, action_warning, list_table, output, render_list, CommandOutput,
};
use crate::domain::models::ConfigDocument;
use crate::infrastructure::config::ConfigLoader;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Configuration file to validate
    pub path: PathBuf,

    /// Treat warnings as errors
    #[arg(long)]
    pub deny_warnings: bool,
}

#[derive(Debug, serde::Serialize)]
pub struct NetworkSummary {
    pub name: String,
    pub url: String,
    pub network_id: String,
    pub from: Option<String>,
    pub gas: Option<u64>,
    pub gas_price: Option<u64>,
}

#[derive(Debug, serde::Serialize)]
pub struct CompilerSummary {
    pub id: String,
    pub version: Option<String>,
    pub optimizer_enabled: bool,
    pub runs: Option<u32>,
}

#[derive(Debug, serde::Serialize)]
pub struct CheckOutput {
    pub valid: bool,
    pub path: PathBuf,
    pub rpc_url: String,
    pub networks: Vec<NetworkSummary>,
    pub compilers: Vec<CompilerSummary>,
    pub warnings: Vec<String>,
}

impl CheckOutput {
    pub fn from_document(path: PathBuf, document: &ConfigDocument, warnings: Vec<String>) -> Self {
        let networks = document
            .networks
            .values()
            .map(|n| NetworkSummary {
                name: n.name.clone(),
                url: n.rpc_url(),
                network_id: n.network_id.to_string(),
                from: n.from_address.map(|a| a.to_string()),
                gas: n.gas_limit,
                gas_price: n.gas_price,
            })
            .collect();

        let compilers = document
            .compilers
            .values()
            .map(|c| CompilerSummary {
                id: c.id.clone(),
                version: c.version.clone(),
                optimizer_enabled: c.optimizer.enabled,
                runs: c.optimizer.effective_runs(),
            })
            .collect();

        Self {
            valid: true,
            path,
            rpc_url: document.rpc.url(),
            networks,
            compilers,
            warnings,
        }
    }
}

fn dash(value: Option<impl ToString>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

impl CommandOutput for CheckOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![action_success(&format!(
            "{} is valid (rpc {})",
            self.path.display(),
            self.rpc_url
        ))];

        let mut networks = list_table(&["name", "url", "network id", "from", "gas", "gas price"]);
        for n in &self.networks {
            networks.add_row(vec![
                n.name.clone(),
                n.url.clone(),
                n.network_id.clone(),
                dash(n.from.as_ref()),
                dash(n.gas),
                dash(n.gas_price),
            ]);
        }
        lines.push(String::new());
        lines.push(render_list("network", &networks, self.networks.len()));

        let mut compilers = list_table(&["id", "version", "optimizer", "runs"]);
        for c in &self.compilers {
            compilers.add_row(vec![
                c.id.clone(),
                dash(c.version.as_ref()),
                if c.optimizer_enabled { "on" } else { "off" }.to_string(),
                dash(c.runs),
            ]);
        }
        lines.push(String::new());
        lines.push(render_list("compiler", &compilers, self.compilers.len()));

        if !self.warnings.is_empty() {
            lines.push(String::new());
            lines.extend(self.warnings.iter().map(|w| action_warning(w)));
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(args: &CheckArgs, json_mode: bool) -> Result<()> {
    let validated = ConfigLoader::load_file_with_warnings(&args.path)
        .with_context(|| format!("Configuration check failed for {}", args.path.display()))?;

    if args.deny_warnings && !validated.warnings.is_empty() {
        anyhow::bail!(
            "{} warning(s) in {}: {}",
            validated.warnings.len(),
            args.path.display(),
            validated
                .warnings
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ")
        );
    }

    let warnings = validated.warnings.iter().map(ToString::to_string).collect();
    let output_data = CheckOutput::from_document(args.path.clone(), &validated.document, warnings);
    output(&output_data, json_mode);
    Ok(())
}
