//! Directory layout for the asdf data directory.
//!
//! # Layout
//!
//! ```text
//! <data_dir>/                     (DataDir)
//! ├── plugins/
//! │   └── <plugin>/               (git checkout of the plugin)
//! ├── downloads/
//! │   └── <plugin>/<version>/     (scratch area for the download callback)
//! ├── installs/
//! │   └── <plugin>/<version>/     (final install target)
//! └── locks/
//!     └── <plugin>-<version>.lock (advisory install locks)
//! ```
//!
//! Version directory names are expected to be filesystem-formatted already
//! (`ref-<sha>` for git refs). Leading separators are stripped before
//! joining so a `path:` version always nests under its plugin directory.

use std::io;
use std::path::{Path, PathBuf};

const PLUGINS: &str = "plugins";
const DOWNLOADS: &str = "downloads";
const INSTALLS: &str = "installs";
const LOCKS: &str = "locks";

/// Root of the asdf data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    /// Create from an explicit path.
    #[must_use]
    pub fn from_path(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory path.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding every plugin checkout (`<data>/plugins/`).
    #[must_use]
    pub fn plugins_dir(&self) -> PathBuf {
        self.root.join(PLUGINS)
    }

    /// Checkout directory of one plugin (`<data>/plugins/<name>/`).
    #[must_use]
    pub fn plugin_dir(&self, name: &str) -> PathBuf {
        self.plugins_dir().join(name)
    }

    /// Download scratch directory for a plugin version.
    #[must_use]
    pub fn download_dir(&self, plugin: &str, fs_version: &str) -> PathBuf {
        self.root.join(DOWNLOADS).join(plugin).join(nested(fs_version))
    }

    /// Install target directory for a plugin version.
    #[must_use]
    pub fn install_dir(&self, plugin: &str, fs_version: &str) -> PathBuf {
        self.root.join(INSTALLS).join(plugin).join(nested(fs_version))
    }

    /// Directory holding advisory lock files.
    #[must_use]
    pub fn locks_dir(&self) -> PathBuf {
        self.root.join(LOCKS)
    }

    /// Lock file guarding installs of one plugin version.
    ///
    /// Path separators in the version are flattened to `_` so every lock
    /// lives directly in [`DataDir::locks_dir`].
    #[must_use]
    pub fn install_lock_path(&self, plugin: &str, fs_version: &str) -> PathBuf {
        let flat: String = fs_version
            .chars()
            .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
            .collect();
        self.locks_dir().join(format!("{plugin}-{flat}.lock"))
    }

    /// Ensure the plugins directory exists.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory cannot be created.
    pub fn ensure(&self) -> io::Result<()> {
        std::fs::create_dir_all(self.plugins_dir())
    }
}

/// Strip leading separators so joining never replaces the base path.
fn nested(component: &str) -> &str {
    component.trim_start_matches(['/', '\\'])
}
