use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use taskshare_store::StoreConfig;

use crate::cli::Cli;

/// CLI configuration, loaded from TOML.
///
/// ```toml
/// log_filter = "taskshare_lists=debug,info"
///
/// [store]
/// data_path = "/var/lib/taskshare/lists.json"
/// pretty = false
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
    pub store: StoreConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: "info".into(),
            store: StoreConfig::default(),
        }
    }
}

impl Config {
    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        toml::from_str(text).context("invalid configuration")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml_str(&text)
    }

    /// Configuration for this invocation: the `--config` file (or defaults)
    /// with `--data` applied on top.
    pub fn resolve(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Some(data) = &cli.data {
            config.store.data_path = data.clone();
        }
        Ok(config)
    }
}
