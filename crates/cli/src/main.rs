//! `talentpo`: replay a script of purchase order form commands.
//!
//! ```text
//! TALENTPO_CATALOG=clients.json talentpo script.json
//! ```
//!
//! Prints the final mode, error report, per-step events and form state as JSON.

mod config;
mod replay;

use anyhow::Context;

use talentpo_catalog::StaticCatalog;
use talentpo_purchasing::FormCommand;

use crate::config::CliConfig;

fn main() -> anyhow::Result<()> {
    talentpo_observability::init();

    let config = CliConfig::from_process()?;

    let catalog_json = std::fs::read_to_string(&config.catalog_path)
        .with_context(|| format!("reading catalog {}", config.catalog_path.display()))?;
    let catalog = StaticCatalog::from_json(&catalog_json)
        .with_context(|| format!("parsing catalog {}", config.catalog_path.display()))?;
    tracing::info!(clients = catalog.len(), path = %config.catalog_path.display(), "catalog loaded");

    let script_json = std::fs::read_to_string(&config.script_path)
        .with_context(|| format!("reading script {}", config.script_path.display()))?;
    let commands: Vec<FormCommand> = serde_json::from_str(&script_json)
        .with_context(|| format!("parsing script {}", config.script_path.display()))?;

    let report = replay::replay(catalog, commands);
    tracing::info!(mode = %report.mode, errors = report.errors.len(), "replay finished");

    let output = if config.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{output}");

    Ok(())
}
