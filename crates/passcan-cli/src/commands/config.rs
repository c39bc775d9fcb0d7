//! Config command - manage configuration.

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;

use passcan_core::PasscanConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Initialize a new configuration file
    Init {
        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },

    /// Get a specific configuration value
    Get {
        /// Configuration key (e.g., "extraction.reference_year")
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// New value, parsed as JSON when possible
        value: String,
    },

    /// Show configuration file path
    Path,
}

/// Runs against the `--config` file when given, else the per-user file.
pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let path = config_path.map(PathBuf::from).unwrap_or_else(default_config_path);

    match args.command {
        ConfigCommand::Show => {
            let config = load_or_default(&path)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigCommand::Init { force } => {
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            save(&path, &PasscanConfig::default()).await?;
            eprintln!("{} Created configuration file at {}", style("✓").green(), path.display());
        }
        ConfigCommand::Get { key } => {
            let json = serde_json::to_value(load_or_default(&path)?)?;
            println!("{}", serde_json::to_string_pretty(lookup(&json, &key)?)?);
        }
        ConfigCommand::Set { key, value } => {
            let value = parse_value(&value);
            let config = assign(&load_or_default(&path)?, &key, value.clone())?;
            save(&path, &config).await?;
            eprintln!("{} Set {} = {}", style("✓").green(), key, value);
        }
        ConfigCommand::Path => {
            println!("Configuration file: {}", path.display());
            if path.exists() {
                println!("Status: {}", style("exists").green());
            } else {
                println!("Status: {}", style("not created").yellow());
                println!();
                println!("Run 'passcan config init' to create a configuration file.");
            }
        }
    }

    Ok(())
}

fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("passcan")
        .join("config.json")
}

fn load_or_default(path: &Path) -> anyhow::Result<PasscanConfig> {
    if path.exists() {
        Ok(PasscanConfig::from_file(path)?)
    } else {
        Ok(PasscanConfig::default())
    }
}

async fn save(path: &Path, config: &PasscanConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    config.save(path)?;
    Ok(())
}

/// Values that are not valid JSON are taken as plain strings.
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Resolve a dotted key inside the serialized configuration.
fn lookup<'a>(json: &'a Value, key: &str) -> anyhow::Result<&'a Value> {
    key.split('.').try_fold(json, |current, part| {
        current
            .get(part)
            .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))
    })
}

/// Return a copy of `config` with the dotted `key` set to `value`.
///
/// Only existing keys can be set, and the result must still be a valid
/// configuration.
fn assign(config: &PasscanConfig, key: &str, value: Value) -> anyhow::Result<PasscanConfig> {
    let mut json = serde_json::to_value(config)?;

    let (parent, leaf) = match key.rsplit_once('.') {
        Some((parent, leaf)) => (Some(parent), leaf),
        None => (None, key),
    };

    let mut target = &mut json;
    for part in parent.into_iter().flat_map(|p| p.split('.')) {
        target = target
            .get_mut(part)
            .ok_or_else(|| anyhow::anyhow!("Configuration path not found: {}", key))?;
    }

    let slot = target
        .as_object_mut()
        .and_then(|obj| obj.get_mut(leaf))
        .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;
    *slot = value;

    serde_json::from_value(json).map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("true"), Value::Bool(true));
        assert_eq!(parse_value("1990"), serde_json::json!(1990));
        assert_eq!(parse_value("null"), Value::Null);
        assert_eq!(parse_value("abc"), Value::String("abc".to_string()));
    }

    #[test]
    fn test_lookup_nested_key() {
        let json = serde_json::to_value(PasscanConfig::default()).unwrap();

        assert_eq!(lookup(&json, "extraction.round_confidence").unwrap(), &Value::Bool(true));
        assert_eq!(lookup(&json, "extraction.reference_year").unwrap(), &Value::Null);
        assert!(lookup(&json, "extraction.missing").is_err());
    }

    #[test]
    fn test_assign_updates_config() {
        let config = assign(&PasscanConfig::default(), "extraction.reference_year", serde_json::json!(2030)).unwrap();
        assert_eq!(config.extraction.reference_year, Some(2030));

        let config = assign(&config, "pipeline.parallel", Value::Bool(true)).unwrap();
        assert!(config.pipeline.parallel);
        assert_eq!(config.extraction.reference_year, Some(2030));
    }

    #[test]
    fn test_assign_rejects_unknown_key() {
        assert!(assign(&PasscanConfig::default(), "pipeline.workers", serde_json::json!(4)).is_err());
        assert!(assign(&PasscanConfig::default(), "nope", serde_json::json!(4)).is_err());
    }

    #[test]
    fn test_assign_rejects_wrong_type() {
        let err = assign(&PasscanConfig::default(), "pipeline.parallel", Value::String("yes".to_string()));
        assert!(err.is_err());
    }
}
