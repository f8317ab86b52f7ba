//! Installed plugins.

use std::path::PathBuf;
use std::sync::LazyLock;

use asdf_core::DataDir;
use regex::Regex;

use crate::error::{PluginError, PluginResult};

/// Directory inside a plugin holding its callbacks.
const CALLBACK_DIR: &str = "bin";

static VALID_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_-]+$").expect("invalid regex"));

/// Check that a plugin name contains only lowercase letters, digits, `_`
/// and `-`.
///
/// # Errors
///
/// Returns [`PluginError::InvalidName`] otherwise.
pub fn validate_name(name: &str) -> PluginResult<()> {
    if VALID_NAME.is_match(name) {
        Ok(())
    } else {
        Err(PluginError::InvalidName(name.to_string()))
    }
}

/// A plugin and the directory of its checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plugin {
    /// Plugin name.
    pub name: String,
    /// Checkout directory.
    pub dir: PathBuf,
    /// Remote URL, when listed with URLs.
    pub url: Option<String>,
    /// Commit hash of `HEAD`, when listed with refs.
    pub git_ref: Option<String>,
}

impl Plugin {
    /// The plugin named `name` in `data_dir`. The checkout may not exist.
    #[must_use]
    pub fn new(data_dir: &DataDir, name: &str) -> Self {
        Self {
            name: name.to_string(),
            dir: data_dir.plugin_dir(name),
            url: None,
            git_ref: None,
        }
    }

    /// Whether the checkout directory exists.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.dir.is_dir()
    }

    /// Fail with [`PluginError::NotFound`] unless the checkout exists.
    ///
    /// # Errors
    ///
    /// See above.
    pub fn ensure_exists(&self) -> PluginResult<()> {
        if self.exists() {
            Ok(())
        } else {
            Err(PluginError::NotFound(self.name.clone()))
        }
    }

    /// Path of a callback executable, e.g. `<dir>/bin/install`.
    #[must_use]
    pub fn callback_path(&self, callback: &str) -> PathBuf {
        self.dir.join(CALLBACK_DIR).join(callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_names() {
        for name in ["lua", "nodejs", "plugin_name", "plugin-name", "python3"] {
            assert!(validate_name(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn invalid_names() {
        for name in ["plugin^name", "plugin name", "PLUGIN_NAME", "", "../lua"] {
            assert!(
                matches!(validate_name(name), Err(PluginError::InvalidName(_))),
                "{name}"
            );
        }
    }

    #[test]
    fn existence() {
        let tmp = tempfile::tempdir().unwrap();
        let data = DataDir::from_path(tmp.path());
        let plugin = Plugin::new(&data, "lua");
        assert_eq!(plugin.dir, tmp.path().join("plugins").join("lua"));
        assert!(!plugin.exists());
        assert!(matches!(plugin.ensure_exists(), Err(PluginError::NotFound(n)) if n == "lua"));

        std::fs::create_dir_all(&plugin.dir).unwrap();
        assert!(plugin.ensure_exists().is_ok());
        assert_eq!(
            plugin.callback_path("list-all"),
            plugin.dir.join("bin").join("list-all")
        );
    }
}
