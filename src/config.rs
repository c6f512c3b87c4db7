//! Configuration loading and parsing for `issue-creator.toml` files.
use color_eyre::eyre::WrapErr;
use log::*;
use serde::Deserialize;
use std::path::Path;

use crate::result::Result;

/// Default configuration filename.
pub const DEFAULT_CONFIG_FILE: &str = "issue-creator.toml";

/// Defaults for the `create` command. Command line flags win over these.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)] // Use default for missing fields
pub struct Config {
    /// Close the last ticket after creating the new one (default: false)
    pub close_last_issue: bool,
    /// Shell script that must exit 0 before a ticket is created
    pub check_before_create_issue: Option<String>,
}

impl Config {
    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        let config = toml::from_str(content)
            .wrap_err("failed to parse issue-creator configuration")?;
        Ok(config)
    }

    /// Load `path`, or [`DEFAULT_CONFIG_FILE`] when it exists and no path is
    /// given. A missing default file yields the default configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if !default_path.exists() {
                    debug!("no {DEFAULT_CONFIG_FILE} found: using defaults");
                    return Ok(Config::default());
                }
                default_path
            }
        };

        info!("loading configuration from {}", path.display());

        let content = std::fs::read_to_string(path).wrap_err_with(|| {
            format!("failed to read configuration file {}", path.display())
        })?;

        Self::parse(&content)
    }
}
