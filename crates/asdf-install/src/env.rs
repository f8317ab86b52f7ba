//! Environment handed to install callbacks.

use std::collections::BTreeMap;
use std::path::Path;

use asdf_versions::VersionSpec;

/// The `ASDF_*` variables describing one install attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallEnvironment {
    /// `ASDF_INSTALL_TYPE`: `version`, `ref` or `path`.
    pub install_type: String,
    /// `ASDF_INSTALL_VERSION`: the version value without its prefix.
    pub install_version: String,
    /// `ASDF_INSTALL_PATH`: the install directory.
    pub install_path: String,
    /// `ASDF_DOWNLOAD_PATH`: the download directory.
    pub download_path: String,
}

impl InstallEnvironment {
    /// Build the environment for installing `spec` into the given
    /// directories.
    #[must_use]
    pub fn new(spec: &VersionSpec, install_dir: &Path, download_dir: &Path) -> Self {
        Self {
            install_type: spec.install_type().to_string(),
            install_version: spec.value().to_string(),
            install_path: install_dir.to_string_lossy().into_owned(),
            download_path: download_dir.to_string_lossy().into_owned(),
        }
    }

    /// The variables as a name to value map.
    #[must_use]
    pub fn to_env(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("ASDF_INSTALL_TYPE".to_string(), self.install_type.clone()),
            ("ASDF_INSTALL_VERSION".to_string(), self.install_version.clone()),
            ("ASDF_INSTALL_PATH".to_string(), self.install_path.clone()),
            ("ASDF_DOWNLOAD_PATH".to_string(), self.download_path.clone()),
        ])
    }
}
