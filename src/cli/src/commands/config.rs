//! Configuration management commands.
//!
//! Stores CLI configuration in `~/.orderdesk/config.toml`. The `role` key
//! supplies the acting role when `--role` and `ORDERDESK_ROLE` are absent.

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use orderdesk_core::rbac::Role;

use crate::output::{self, OutputFormat};

/// Key holding the default acting role.
pub const ROLE_KEY: &str = "role";

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Set a configuration value
    Set {
        /// Configuration key (e.g., role)
        key: String,
        /// Value to set
        value: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },

    /// Show all configuration
    Show,

    /// Reset configuration to defaults
    Reset {
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Persistent CLI configuration stored on disk.
#[derive(Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub values: BTreeMap<String, String>,
}

/// Return the path to the configuration file (`~/.orderdesk/config.toml`).
fn config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".orderdesk").join("config.toml"))
}

/// Load the CLI configuration at `path`, returning defaults if the file does
/// not exist.
fn load_config_from(path: &Path) -> Result<CliConfig> {
    if !path.exists() {
        return Ok(CliConfig::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let cfg: CliConfig =
        toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    Ok(cfg)
}

/// Save the CLI configuration to `path`, creating the directory if needed.
fn save_config_to(path: &Path, cfg: &CliConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let content = toml::to_string_pretty(cfg).context("Failed to serialize config")?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

fn load_config() -> Result<CliConfig> {
    load_config_from(&config_path()?)
}

fn lookup<'a>(cfg: &'a CliConfig, key: &str) -> Result<&'a str> {
    match cfg.values.get(key) {
        Some(value) => Ok(value.as_str()),
        None => bail!("Key '{}' not found", key),
    }
}

/// Reject values the query commands could not use later.
fn validate(key: &str, value: &str) -> Result<()> {
    if key == ROLE_KEY {
        value.parse::<Role>()?;
    }
    Ok(())
}

fn default_role_from(path: &Path) -> Result<Option<String>> {
    Ok(load_config_from(path)?.values.remove(ROLE_KEY))
}

/// Load the default role from the config file, if set. A file that exists
/// but cannot be read or parsed is an error.
pub fn load_default_role() -> Result<Option<String>> {
    default_role_from(&config_path()?)
}

pub fn execute(cmd: ConfigCommands, format: OutputFormat) -> Result<()> {
    match cmd {
        ConfigCommands::Set { key, value } => {
            validate(&key, &value)?;
            let path = config_path()?;
            let mut cfg = load_config_from(&path)?;
            cfg.values.insert(key.clone(), value.clone());
            save_config_to(&path, &cfg)?;

            match format {
                OutputFormat::Table => {
                    output::print_success(&format!("{} = {}", key, value));
                }
                _ => {
                    output::print_item(&serde_json::json!({ "key": key, "value": value }), format)?;
                }
            }
        }

        ConfigCommands::Get { key } => {
            let cfg = load_config()?;
            let value = lookup(&cfg, &key)?;
            match format {
                OutputFormat::Table => println!("{}", value),
                _ => {
                    output::print_item(
                        &serde_json::json!({ "key": key, "value": value }),
                        format,
                    )?;
                }
            }
        }

        ConfigCommands::Show => {
            let cfg = load_config()?;

            if cfg.values.is_empty() {
                output::print_info("No configuration values set.");
                return Ok(());
            }

            match format {
                OutputFormat::Table => {
                    output::print_header("Configuration");
                    for (k, v) in &cfg.values {
                        output::print_detail(k, v);
                    }
                }
                _ => output::print_item(&cfg.values, format)?,
            }
        }

        ConfigCommands::Reset { force } => {
            if !force {
                output::print_info(
                    "This will reset all CLI configuration. Use --force to confirm.",
                );
                return Ok(());
            }

            let path = config_path()?;
            if path.exists() {
                std::fs::remove_file(&path)
                    .with_context(|| format!("Failed to remove {}", path.display()))?;
            }

            output::print_success("Configuration reset to defaults");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(cfg, CliConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = CliConfig::default();
        cfg.values.insert(ROLE_KEY.to_string(), "deposito".to_string());
        save_config_to(&path, &cfg).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.values.get(ROLE_KEY).map(String::as_str), Some("deposito"));
    }

    #[test]
    fn test_validate_role_value() {
        assert!(validate(ROLE_KEY, "warehouse").is_ok());
        assert!(validate(ROLE_KEY, "ventas").is_ok());
        assert!(validate(ROLE_KEY, "intern").is_err());
        assert!(validate("color", "anything").is_ok());
    }

    #[test]
    fn test_default_role_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert_eq!(default_role_from(&path).unwrap(), None);

        std::fs::write(&path, "[values]\nrole = \"ventas\"\n").unwrap();
        assert_eq!(default_role_from(&path).unwrap().as_deref(), Some("ventas"));
    }

    #[test]
    fn test_default_role_from_corrupt_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "values = [").unwrap();
        let err = default_role_from(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse config file"));
    }

    #[test]
    fn test_lookup_missing_key_is_error() {
        let mut cfg = CliConfig::default();
        cfg.values.insert(ROLE_KEY.to_string(), "admin".to_string());
        assert_eq!(lookup(&cfg, ROLE_KEY).unwrap(), "admin");

        let err = lookup(&cfg, "colour").unwrap_err();
        assert_eq!(err.to_string(), "Key 'colour' not found");
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "values = 3").unwrap();
        assert!(load_config_from(&path).is_err());
    }
}
