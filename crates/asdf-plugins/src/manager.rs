//! Adding, removing, listing and updating installed plugins.

use std::io::ErrorKind;

use asdf_core::DataDir;
use tracing::info;

use crate::error::{PluginError, PluginResult};
use crate::git::{PluginGit, ShellGit};
use crate::plugin::{Plugin, validate_name};

/// Clone `url` as plugin `name`.
///
/// # Errors
///
/// Fails on an invalid name, when the plugin is already added, or when
/// cloning fails.
pub fn add(data_dir: &DataDir, name: &str, url: &str) -> PluginResult<Plugin> {
    validate_name(name)?;
    let plugin = Plugin::new(data_dir, name);
    if plugin.exists() {
        return Err(PluginError::AlreadyExists(name.to_string()));
    }

    data_dir.ensure().map_err(|source| PluginError::Io {
        path: data_dir.plugins_dir(),
        source,
    })?;
    ShellGit::new(&plugin.dir)?.clone_from(url)?;

    info!(plugin = %name, url, "Added plugin");
    Ok(plugin)
}

/// Delete the checkout of plugin `name`.
///
/// # Errors
///
/// Fails on an invalid name, an unknown plugin, or if removal fails.
pub fn remove(data_dir: &DataDir, name: &str) -> PluginResult<()> {
    validate_name(name)?;
    let plugin = Plugin::new(data_dir, name);
    plugin.ensure_exists()?;

    std::fs::remove_dir_all(&plugin.dir).map_err(|source| PluginError::Io {
        path: plugin.dir.clone(),
        source,
    })?;

    info!(plugin = %name, "Removed plugin");
    Ok(())
}

/// One [`Plugin`] per checkout directory, sorted by name.
///
/// `urls` and `refs` fill in [`Plugin::url`] and [`Plugin::git_ref`]. A
/// missing plugins directory lists nothing.
///
/// # Errors
///
/// Fails if the plugins directory cannot be read, or if a requested URL or
/// ref cannot be read from a checkout.
pub fn list(data_dir: &DataDir, urls: bool, refs: bool) -> PluginResult<Vec<Plugin>> {
    let plugins_dir = data_dir.plugins_dir();
    let entries = match std::fs::read_dir(&plugins_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(PluginError::Io {
                path: plugins_dir,
                source,
            });
        },
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| PluginError::Io {
            path: plugins_dir.clone(),
            source,
        })?;
        if entry.path().is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();

    let mut plugins = Vec::with_capacity(names.len());
    for name in names {
        let mut plugin = Plugin::new(data_dir, &name);
        if urls || refs {
            let git = ShellGit::new(&plugin.dir)?;
            if urls {
                plugin.url = Some(git.remote_url()?);
            }
            if refs {
                plugin.git_ref = Some(git.head()?);
            }
        }
        plugins.push(plugin);
    }
    Ok(plugins)
}

/// Update plugin `name` to `git_ref`, or to the tip of its branch.
///
/// Returns the commit hash checked out.
///
/// # Errors
///
/// Fails for an invalid or unknown plugin, or when the git update fails.
pub fn update(data_dir: &DataDir, name: &str, git_ref: Option<&str>) -> PluginResult<String> {
    validate_name(name)?;
    let plugin = Plugin::new(data_dir, name);
    plugin.ensure_exists()?;
    update_with(&ShellGit::new(&plugin.dir)?, name, git_ref)
}

/// Update through an arbitrary [`PluginGit`] backend.
///
/// # Errors
///
/// Returns the backend's error.
pub fn update_with(git: &dyn PluginGit, name: &str, git_ref: Option<&str>) -> PluginResult<String> {
    let head = git.update(git_ref)?;
    info!(plugin = %name, git_ref = ?git_ref, head = %head, "Updated plugin");
    Ok(head)
}
