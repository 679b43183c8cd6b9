//! Front-end settings
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! settings file, then `NIFTY_SENTIMENT_*` environment variables.

use crate::config::{load_config, RuleConfig, RuleSet};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default settings file looked up in the working directory
pub const DEFAULT_SETTINGS_FILE: &str = "nifty-sentiment.toml";

const ENV_PREFIX: &str = "NIFTY_SENTIMENT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Built-in rule set, used unless `rules_file` is set
    #[serde(default)]
    pub ruleset: RuleSet,

    /// Custom rule configuration (TOML)
    #[serde(default)]
    pub rules_file: Option<String>,

    #[serde(default)]
    pub format: OutputFormat,

    /// tracing max level: error, warn, info, debug, trace
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ruleset: RuleSet::default(),
            rules_file: None,
            format: OutputFormat::default(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from an optional file plus the environment.
    ///
    /// A missing file is not an error when `path` is `None`; an explicitly
    /// named file must exist.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let file = match path {
            Some(p) => ::config::File::from(p).required(true),
            None => ::config::File::with_name(DEFAULT_SETTINGS_FILE).required(false),
        };

        let settings = ::config::Config::builder()
            .set_default("ruleset", RuleSet::default().name())?
            .set_default("format", "text")?
            .set_default("log_level", default_log_level())?
            .add_source(file)
            .add_source(::config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .context("building settings")?;

        settings
            .try_deserialize()
            .context("invalid settings")
    }

    /// The rule configuration these settings select
    pub fn rule_config(&self) -> anyhow::Result<RuleConfig> {
        match &self.rules_file {
            Some(path) => load_config(path),
            None => Ok(self.ruleset.config()),
        }
    }
}
