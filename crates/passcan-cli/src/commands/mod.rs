//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod extract;
mod output;

use std::path::Path;

use passcan_core::PasscanConfig;

/// Load the configuration named on the command line, or the defaults.
pub(crate) fn load_config(config_path: Option<&str>) -> anyhow::Result<PasscanConfig> {
    match config_path {
        Some(path) => PasscanConfig::from_file(Path::new(path))
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {}", path, e)),
        None => Ok(PasscanConfig::default()),
    }
}
