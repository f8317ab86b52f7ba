//! Plugin management commands.

use anyhow::Result;
use asdf_core::DataDir;
use asdf_plugins::manager;

/// Clone a plugin repository.
pub(crate) fn add_plugin(data_dir: &DataDir, name: &str, url: &str) -> Result<()> {
    manager::add(data_dir, name, url)?;
    Ok(())
}

/// Print installed plugins, one per line.
pub(crate) fn list_plugins(data_dir: &DataDir, urls: bool, refs: bool) -> Result<()> {
    let plugins = manager::list(data_dir, urls, refs)?;
    if plugins.is_empty() {
        eprintln!("No plugins installed");
        return Ok(());
    }

    for plugin in &plugins {
        let mut line = plugin.name.clone();
        if let Some(url) = &plugin.url {
            line.push_str("  ");
            line.push_str(url);
        }
        if let Some(git_ref) = &plugin.git_ref {
            line.push_str("  ");
            line.push_str(git_ref);
        }
        println!("{line}");
    }
    Ok(())
}

/// Remove a plugin checkout.
pub(crate) fn remove_plugin(data_dir: &DataDir, name: &str) -> Result<()> {
    manager::remove(data_dir, name)?;
    Ok(())
}

/// Update a plugin and report the commit it landed on.
pub(crate) fn update_plugin(data_dir: &DataDir, name: &str, git_ref: Option<&str>) -> Result<()> {
    let head = manager::update(data_dir, name, git_ref)?;
    println!("Updated {name} to {head}");
    Ok(())
}
