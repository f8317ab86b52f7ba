//! Install error types.

use std::path::PathBuf;

/// Errors from the install pipeline.
#[derive(Debug, thiserror::Error)]
pub enum InstallError {
    /// The plugin name is malformed.
    #[error(transparent)]
    InvalidPluginName(#[from] asdf_plugins::PluginError),

    /// The plugin is not installed.
    #[error("no such plugin: {0}")]
    PluginNotFound(String),

    /// `system` refers to a tool installed outside asdf.
    #[error("uninstallable version: system")]
    UninstallableVersion,

    /// The requested operation is not available yet.
    #[error("not implemented")]
    NotImplemented,

    /// The install directory already exists.
    #[error("version {version} of {plugin} is already installed")]
    AlreadyInstalled {
        /// Plugin name.
        plugin: String,
        /// Version value, without any `ref:` prefix.
        version: String,
    },

    /// A download or install directory could not be created.
    #[error("unable to create {kind} dir: {source}")]
    CreateDir {
        /// `download` or `install`.
        kind: &'static str,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A hook failed.
    #[error("failed to run {stage} hook: {detail}")]
    Hook {
        /// `pre-download`, `pre-install` or `post-install`.
        stage: &'static str,
        /// Failure reported by the hook runner.
        detail: String,
    },

    /// A plugin callback failed or a required one is missing.
    #[error("failed to run {stage} callback: {detail}")]
    Callback {
        /// Callback name.
        stage: &'static str,
        /// Failure reported by the callback runner.
        detail: String,
    },

    /// The install lock could not be acquired.
    #[error("unable to lock {}: {source}", path.display())]
    Lock {
        /// Lock file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type for install operations.
pub type InstallResult<T> = Result<T, InstallError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            InstallError::UninstallableVersion.to_string(),
            "uninstallable version: system"
        );
        assert_eq!(InstallError::NotImplemented.to_string(), "not implemented");
        assert_eq!(
            InstallError::AlreadyInstalled {
                plugin: "lua".into(),
                version: "5.4.6".into()
            }
            .to_string(),
            "version 5.4.6 of lua is already installed"
        );
        assert_eq!(
            InstallError::Hook {
                stage: "pre-install",
                detail: "exit 1".into()
            }
            .to_string(),
            "failed to run pre-install hook: exit 1"
        );
        assert_eq!(
            InstallError::Callback {
                stage: "install",
                detail: "exit 2".into()
            }
            .to_string(),
            "failed to run install callback: exit 2"
        );
    }
}
