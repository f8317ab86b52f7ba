//! The install orchestrator.

use std::io::Write;
use std::path::Path;

use asdf_core::DataDir;
use asdf_hooks::{HookEvent, HookOutcome, HookRunner};
use asdf_plugins::{CallbackOutcome, CallbackRunner, Plugin, validate_name};
use asdf_versions::VersionSpec;
use tracing::{debug, info, warn};

use crate::env::InstallEnvironment;
use crate::error::{InstallError, InstallResult};
use crate::lock::acquire_install_lock;

/// Query passed to `latest-stable` when none is given.
pub const DEFAULT_LATEST_QUERY: &str = "[0-9]";

const SYSTEM_VERSION: &str = "system";
const LATEST_VERSION: &str = "latest";

const DOWNLOAD_CALLBACK: &str = "download";
const INSTALL_CALLBACK: &str = "install";
const LIST_ALL_CALLBACK: &str = "list-all";
const LATEST_STABLE_CALLBACK: &str = "latest-stable";

/// Installs plugin versions into a data directory.
pub struct Installer<'a> {
    data_dir: DataDir,
    default_latest_query: String,
    hooks: &'a dyn HookRunner,
    callbacks: &'a dyn CallbackRunner,
}

impl<'a> Installer<'a> {
    /// Create an installer using [`DEFAULT_LATEST_QUERY`].
    #[must_use]
    pub fn new(
        data_dir: DataDir,
        hooks: &'a dyn HookRunner,
        callbacks: &'a dyn CallbackRunner,
    ) -> Self {
        Self {
            data_dir,
            default_latest_query: DEFAULT_LATEST_QUERY.to_string(),
            hooks,
            callbacks,
        }
    }

    /// Use a different query when [`Installer::latest`] gets none.
    #[must_use]
    pub fn with_default_latest_query(mut self, query: impl Into<String>) -> Self {
        self.default_latest_query = query.into();
        self
    }

    /// Install one version of a plugin's tool.
    ///
    /// Hook and callback output goes to `stdout` and `stderr`.
    ///
    /// # Errors
    ///
    /// Fails at the first step that fails; see [`InstallError`]. Directories
    /// created before the failure are left in place.
    pub fn install_one_version(
        &self,
        plugin_name: &str,
        version: &str,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> InstallResult<()> {
        let plugin = self.existing_plugin(plugin_name)?;

        if version == SYSTEM_VERSION {
            return Err(InstallError::UninstallableVersion);
        }
        if version == LATEST_VERSION {
            return Err(InstallError::NotImplemented);
        }

        let spec = VersionSpec::parse(version);
        let fs_version = spec.to_filesystem_name();
        let download_dir = self.data_dir.download_dir(plugin_name, &fs_version);
        let install_dir = self.data_dir.install_dir(plugin_name, &fs_version);

        let _lock = acquire_install_lock(&self.data_dir.install_lock_path(plugin_name, &fs_version))?;

        if install_dir.exists() {
            return Err(InstallError::AlreadyInstalled {
                plugin: plugin_name.to_string(),
                version: spec.value().to_string(),
            });
        }

        info!(plugin = %plugin_name, version = %spec, "Installing");
        let env = InstallEnvironment::new(&spec, &install_dir, &download_dir).to_env();
        let hook_args = [spec.value().to_string()];

        create_dir(&download_dir, "download")?;

        self.run_hook(HookEvent::PreDownload, &plugin, &hook_args, stdout, stderr)?;

        match self
            .callbacks
            .run(&plugin, DOWNLOAD_CALLBACK, &[], &env, stdout, stderr)
        {
            CallbackOutcome::Completed => {},
            CallbackOutcome::Missing => {
                debug!(plugin = %plugin_name, "No download callback, skipping");
            },
            CallbackOutcome::Failed { detail } => {
                return Err(InstallError::Callback {
                    stage: DOWNLOAD_CALLBACK,
                    detail,
                });
            },
        }

        self.run_hook(HookEvent::PreInstall, &plugin, &hook_args, stdout, stderr)?;

        create_dir(&install_dir, "install")?;

        match self
            .callbacks
            .run(&plugin, INSTALL_CALLBACK, &[], &env, stdout, stderr)
        {
            CallbackOutcome::Completed => {},
            CallbackOutcome::Missing => {
                return Err(InstallError::Callback {
                    stage: INSTALL_CALLBACK,
                    detail: format!("plugin {plugin_name} has no {INSTALL_CALLBACK} callback"),
                });
            },
            CallbackOutcome::Failed { detail } => {
                return Err(InstallError::Callback {
                    stage: INSTALL_CALLBACK,
                    detail,
                });
            },
        }

        self.run_hook(HookEvent::PostInstall, &plugin, &hook_args, stdout, stderr)?;

        info!(plugin = %plugin_name, version = %spec, path = %install_dir.display(), "Installed");
        Ok(())
    }

    /// Every version the plugin can install, in the order it lists them.
    ///
    /// A plugin without a `list-all` callback lists nothing.
    ///
    /// # Errors
    ///
    /// Fails if the plugin is not installed or the callback fails.
    pub fn list_all(&self, plugin_name: &str) -> InstallResult<Vec<String>> {
        let plugin = self.existing_plugin(plugin_name)?;
        self.versions_from(&plugin, LIST_ALL_CALLBACK, &[])
    }

    /// The newest stable versions matching `query`, or the default query
    /// when `query` is empty.
    ///
    /// A plugin without a `latest-stable` callback yields nothing.
    ///
    /// # Errors
    ///
    /// Fails if the plugin is not installed or the callback fails.
    pub fn latest(&self, plugin_name: &str, query: &str) -> InstallResult<Vec<String>> {
        let plugin = self.existing_plugin(plugin_name)?;
        let query = if query.is_empty() {
            self.default_latest_query.as_str()
        } else {
            query
        };
        // TODO: fall back to filtering `list-all` output when the plugin has
        // no `latest-stable` callback.
        self.versions_from(&plugin, LATEST_STABLE_CALLBACK, &[query.to_string()])
    }

    fn existing_plugin(&self, name: &str) -> InstallResult<Plugin> {
        validate_name(name)?;
        let plugin = Plugin::new(&self.data_dir, name);
        if plugin.exists() {
            Ok(plugin)
        } else {
            Err(InstallError::PluginNotFound(name.to_string()))
        }
    }

    fn run_hook(
        &self,
        event: HookEvent,
        plugin: &Plugin,
        args: &[String],
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> InstallResult<()> {
        let name = event.hook_name(&plugin.name);
        match self.hooks.run(&name, args, stdout, stderr) {
            HookOutcome::Ran | HookOutcome::NotConfigured => Ok(()),
            HookOutcome::Failed { detail } => Err(InstallError::Hook {
                stage: hook_stage(event),
                detail,
            }),
        }
    }

    /// Run a listing callback and split its stdout on whitespace.
    fn versions_from(
        &self,
        plugin: &Plugin,
        callback: &'static str,
        args: &[String],
    ) -> InstallResult<Vec<String>> {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let env = std::collections::BTreeMap::new();

        match self
            .callbacks
            .run(plugin, callback, args, &env, &mut out, &mut err)
        {
            CallbackOutcome::Completed => {
                let versions: Vec<String> = String::from_utf8_lossy(&out)
                    .split_whitespace()
                    .map(ToString::to_string)
                    .collect();
                debug!(plugin = %plugin.name, callback, count = versions.len(), "Listed versions");
                Ok(versions)
            },
            CallbackOutcome::Missing => {
                warn!(plugin = %plugin.name, callback, "Plugin has no such callback");
                Ok(Vec::new())
            },
            CallbackOutcome::Failed { detail } => Err(InstallError::Callback {
                stage: callback,
                detail,
            }),
        }
    }
}

fn hook_stage(event: HookEvent) -> &'static str {
    match event {
        HookEvent::PreDownload => "pre-download",
        HookEvent::PreInstall => "pre-install",
        HookEvent::PostInstall => "post-install",
    }
}

/// Create a directory tree with mode `0777` (before umask).
fn create_dir(path: &Path, kind: &'static str) -> InstallResult<()> {
    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o777);
    }
    builder
        .create(path)
        .map_err(|source| InstallError::CreateDir { kind, source })
}
