//! Plugin and git error types.

use std::path::PathBuf;

/// Errors from git operations on a plugin checkout.
#[derive(Debug, thiserror::Error)]
pub enum GitError {
    /// The `git` executable could not be located.
    #[error("git executable not found: {0}")]
    GitNotFound(String),

    /// The directory is not a git checkout.
    #[error("not a git repository: {}", path.display())]
    NotARepository {
        /// Directory that was expected to hold a checkout.
        path: PathBuf,
    },

    /// `git` could not be started.
    #[error("failed to run git {command}: {source}")]
    Spawn {
        /// Git subcommand.
        command: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Cloning failed. Holds git's own message.
    #[error("unable to clone plugin: {0}")]
    Clone(String),

    /// A git command exited unsuccessfully.
    #[error("git {command} failed: {stderr}")]
    Command {
        /// Git subcommand.
        command: String,
        /// Trimmed stderr of the command.
        stderr: String,
    },

    /// An update without a ref was requested on a detached checkout.
    #[error("unable to update plugin: not on a branch")]
    NotOnBranch,

    /// The named remote is not configured.
    #[error("remote {0} is not configured")]
    NoRemote(String),

    /// A ref or URL that git would parse as an option.
    #[error("invalid {kind} {value:?}: must not start with '-'")]
    OptionLike {
        /// What the value was used as, `ref` or `url`.
        kind: &'static str,
        /// The rejected value.
        value: String,
    },

    /// The remote advertises no branches to track.
    #[error("remote {0} has no branches")]
    NoBranches(String),
}

/// Errors from plugin management.
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    /// The plugin name contains disallowed characters.
    #[error(
        "'{0:?}' is invalid. Name may only contain lowercase letters, numbers, '_', and '-'"
    )]
    InvalidName(String),

    /// A plugin with this name is already installed.
    #[error("plugin named {0:?} already added")]
    AlreadyExists(String),

    /// No plugin with this name is installed.
    #[error("no such plugin: {0}")]
    NotFound(String),

    /// Filesystem access to the plugins directory failed.
    #[error("unable to access {}: {source}", path.display())]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A git operation failed.
    #[error(transparent)]
    Git(#[from] GitError),
}

/// Result type for git operations.
pub type GitResult<T> = Result<T, GitError>;

/// Result type for plugin operations.
pub type PluginResult<T> = Result<T, PluginError>;
