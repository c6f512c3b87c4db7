//! CLI argument parsing and GitHub connection configuration.
use clap::{Parser, Subcommand};
use color_eyre::eyre::eyre;
use secrecy::SecretString;
use std::{env, path::PathBuf};

use crate::{
    config::Config,
    repository::config::{DEFAULT_API_URL, GithubConfig},
    result::Result,
};

/// Global CLI arguments for GitHub access and debugging.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, default_value = "", global = true)]
    /// GitHub personal access token. Falls back to GITHUB_TOKEN env var.
    pub github_token: String,

    #[arg(long, default_value = DEFAULT_API_URL, global = true)]
    /// GitHub API base URL. Change for GitHub Enterprise.
    pub api_url: String,

    #[arg(long, global = true)]
    /// Path to a TOML config file. Defaults to ./issue-creator.toml if present.
    pub config: Option<PathBuf>,

    #[arg(long, default_value_t = false, global = true)]
    /// Enable debug logging.
    pub debug: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Ticket operation subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Render a template and create the resulting issue or discussion.
    Create {
        /// URL of the template issue or discussion.
        template_url: String,

        #[arg(long, default_value_t = false)]
        /// Close the last issue sharing the template's labels.
        close_last_issue: bool,

        #[arg(long)]
        /// Shell script that must exit 0 before anything is created.
        check_before_create_issue: Option<String>,

        #[arg(long, default_value_t = false)]
        /// Log what would be created and closed without writing.
        dry_run: bool,
    },

    /// Render a template and print the resulting ticket as JSON.
    Render {
        /// URL of the template issue or discussion.
        template_url: String,
    },
}

/// Effective options of the `create` command after merging the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateOptions {
    pub close_last_issue: bool,
    pub check_before_create_issue: Option<String>,
    pub dry_run: bool,
}

impl CreateOptions {
    /// Merge command line flags over `config`.
    pub fn merge(
        config: Config,
        close_last_issue: bool,
        check_before_create_issue: Option<String>,
        dry_run: bool,
    ) -> Self {
        Self {
            close_last_issue: close_last_issue || config.close_last_issue,
            check_before_create_issue: check_before_create_issue
                .or(config.check_before_create_issue),
            dry_run,
        }
    }
}

impl Args {
    /// Configure the GitHub connection from CLI arguments.
    pub fn get_github_config(&self) -> Result<GithubConfig> {
        let mut token = self.github_token.clone();

        if token.is_empty()
            && let Ok(env_var_token) = env::var("GITHUB_TOKEN")
        {
            token = env_var_token;
        }

        if token.is_empty() {
            return Err(eyre!("must set github token"));
        }

        url::Url::parse(&self.api_url)
            .map_err(|err| eyre!("invalid api url {}: {err}", self.api_url))?;

        Ok(GithubConfig {
            api_url: self.api_url.clone(),
            token: SecretString::from(token),
        })
    }

    /// Load the config file named by `--config`, or the default one.
    pub fn load_config(&self) -> Result<Config> {
        Config::load(self.config.as_deref())
    }
}
