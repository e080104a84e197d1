//! Command-line configuration: environment variables plus positional args.

use std::path::PathBuf;

use anyhow::{Context, bail};

pub const CATALOG_VAR: &str = "TALENTPO_CATALOG";
pub const PRETTY_VAR: &str = "TALENTPO_PRETTY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// JSON client list (`[{id, name, reqs}]`).
    pub catalog_path: PathBuf,
    /// JSON array of form commands to replay.
    pub script_path: PathBuf,
    pub pretty: bool,
}

impl CliConfig {
    pub fn from_process() -> anyhow::Result<Self> {
        Self::resolve(|name| std::env::var(name).ok(), std::env::args().skip(1))
    }

    /// Build the config from a variable lookup and the arguments after the
    /// program name.
    pub fn resolve(
        var: impl Fn(&str) -> Option<String>,
        args: impl IntoIterator<Item = String>,
    ) -> anyhow::Result<Self> {
        let catalog_path = var(CATALOG_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .with_context(|| format!("{CATALOG_VAR} must point to the catalog JSON file"))?;

        let mut args = args.into_iter();
        let Some(script) = args.next() else {
            bail!("usage: talentpo <script.json>");
        };
        if let Some(extra) = args.next() {
            bail!("unexpected argument `{extra}`");
        }

        let pretty = var(PRETTY_VAR).is_some_and(|v| matches!(v.trim(), "1" | "true" | "yes"));

        Ok(Self {
            catalog_path,
            script_path: PathBuf::from(script),
            pretty,
        })
    }
}
