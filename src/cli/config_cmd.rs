//! Config command for Pamoja.
//!
//! Prints the effective configuration and where it was looked up.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::{pamoja_home, project_config_path, Config};
use crate::error::Result;

/// Options for the config command.
#[derive(Debug, Clone, Default)]
pub struct ConfigOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// Output format for the config command.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_config: Option<PathBuf>,
    pub project_config: PathBuf,
    pub config: Config,
    /// The same configuration rendered as TOML.
    #[serde(skip)]
    pub toml: String,
}

/// The config command implementation.
pub struct ConfigCommand {
    config: Config,
}

impl ConfigCommand {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn run(&self, cwd: &Path) -> Result<ConfigOutput> {
        Ok(ConfigOutput {
            user_config: pamoja_home().map(|home| home.join("config.toml")),
            project_config: project_config_path(cwd),
            config: self.config.clone(),
            toml: self.config.to_toml()?,
        })
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &ConfigOutput, options: &ConfigOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else {
            self.format_human_readable(output)
        }
    }

    fn format_human_readable(&self, output: &ConfigOutput) -> String {
        let mut text = String::new();
        if let Some(user) = &output.user_config {
            text.push_str(&format!("# user config:    {}\n", user.display()));
        }
        text.push_str(&format!(
            "# project config: {}\n\n",
            output.project_config.display()
        ));
        text.push_str(&output.toml);
        text
    }
}
