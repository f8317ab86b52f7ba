//! Configuration types.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Resolved asdf configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root of plugins, downloads and installs.
    pub data_dir: PathBuf,
    /// Query for `latest-stable` when none is given.
    pub default_latest_query: String,
    /// Hook commands keyed by event name.
    pub hooks: BTreeMap<String, String>,
    /// Logging settings.
    pub logging: LoggingSection,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("~/.asdf"),
            default_latest_query: "[0-9]".to_owned(),
            hooks: BTreeMap::new(),
            logging: LoggingSection::default(),
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Level or filter directive.
    pub level: String,
    /// `pretty`, `compact` or `json`.
    pub format: String,
    /// Whether log lines carry timestamps.
    pub timestamps: bool,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "warn".to_owned(),
            format: "compact".to_owned(),
            timestamps: true,
        }
    }
}
