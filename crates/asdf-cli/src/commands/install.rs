//! Install and version listing commands.

use anyhow::{Result, bail};
use asdf_config::Config;
use asdf_core::DataDir;
use asdf_install::Installer;
use asdf_plugins::ScriptCallbackRunner;
use asdf_versions::VersionSpec;
use tracing::debug;

use crate::config_bridge;

/// Install `version` of `plugin`, resolving `latest[:filter]` first.
pub(crate) fn install(config: &Config, data_dir: DataDir, plugin: &str, version: &str) -> Result<()> {
    let hooks = config_bridge::to_hook_runner(config);
    let callbacks = ScriptCallbackRunner::new();
    let installer = Installer::new(data_dir, &hooks, &callbacks)
        .with_default_latest_query(&config.default_latest_query);

    let version = resolve_version(&installer, plugin, version)?;
    installer.install_one_version(
        plugin,
        &version,
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    )?;
    Ok(())
}

/// Print every installable version of `plugin`.
pub(crate) fn list_all(config: &Config, data_dir: DataDir, plugin: &str) -> Result<()> {
    let hooks = config_bridge::to_hook_runner(config);
    let callbacks = ScriptCallbackRunner::new();
    let installer = Installer::new(data_dir, &hooks, &callbacks);

    for version in installer.list_all(plugin)? {
        println!("{version}");
    }
    Ok(())
}

/// Print the newest stable version of `plugin` matching `query`.
pub(crate) fn latest(config: &Config, data_dir: DataDir, plugin: &str, query: &str) -> Result<()> {
    let hooks = config_bridge::to_hook_runner(config);
    let callbacks = ScriptCallbackRunner::new();
    let installer = Installer::new(data_dir, &hooks, &callbacks)
        .with_default_latest_query(&config.default_latest_query);

    match installer.latest(plugin, query)?.last() {
        Some(version) => {
            println!("{version}");
            Ok(())
        },
        None => bail!("no stable version of {plugin} matches {query:?}"),
    }
}

/// Turn a command-line version into one the installer accepts.
///
/// `latest` and `latest:<filter>` become the last version `latest-stable`
/// reports; anything else passes through unchanged.
fn resolve_version(installer: &Installer<'_>, plugin: &str, version: &str) -> Result<String> {
    let spec = VersionSpec::parse_argument(version);
    if !spec.is_latest() {
        return Ok(version.to_string());
    }

    let query = spec.value();
    let Some(resolved) = installer.latest(plugin, query)?.pop() else {
        bail!("no stable version of {plugin} matches {query:?}");
    };
    debug!(plugin, query, version = %resolved, "Resolved latest version");
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use asdf_test::{RecordingHookRunner, ScriptedCallbackRunner, install_dummy_plugin};

    use super::*;

    fn setup() -> (tempfile::TempDir, DataDir) {
        let tmp = tempfile::tempdir().unwrap();
        let data_dir = DataDir::from_path(tmp.path().join("data"));
        install_dummy_plugin(&data_dir, "lua").unwrap();
        (tmp, data_dir)
    }

    #[test]
    fn plain_versions_pass_through() {
        let (_tmp, data_dir) = setup();
        let hooks = RecordingHookRunner::new();
        let callbacks = ScriptedCallbackRunner::new();
        let installer = Installer::new(data_dir, &hooks, &callbacks);

        assert_eq!(resolve_version(&installer, "lua", "5.4.6").unwrap(), "5.4.6");
        assert_eq!(resolve_version(&installer, "lua", "ref:v5.4").unwrap(), "ref:v5.4");
        assert!(callbacks.calls().is_empty());
    }

    #[test]
    fn latest_takes_last_reported_version() {
        let (_tmp, data_dir) = setup();
        let hooks = RecordingHookRunner::new();
        let callbacks = ScriptedCallbackRunner::new().completing("latest-stable", "5.3.6\n5.4.6\n");
        let installer = Installer::new(data_dir, &hooks, &callbacks);

        assert_eq!(resolve_version(&installer, "lua", "latest").unwrap(), "5.4.6");
        assert_eq!(callbacks.calls()[0].args, vec!["[0-9]".to_string()]);
    }

    #[test]
    fn latest_filter_becomes_query() {
        let (_tmp, data_dir) = setup();
        let hooks = RecordingHookRunner::new();
        let callbacks = ScriptedCallbackRunner::new().completing("latest-stable", "5.3.6");
        let installer = Installer::new(data_dir, &hooks, &callbacks);

        assert_eq!(resolve_version(&installer, "lua", "latest:5.3").unwrap(), "5.3.6");
        assert_eq!(callbacks.calls()[0].args, vec!["5.3".to_string()]);
    }

    #[test]
    fn latest_without_match_fails() {
        let (_tmp, data_dir) = setup();
        let hooks = RecordingHookRunner::new();
        let callbacks = ScriptedCallbackRunner::new().completing("latest-stable", "");
        let installer = Installer::new(data_dir, &hooks, &callbacks);

        let err = resolve_version(&installer, "lua", "latest:9").unwrap_err();
        assert!(err.to_string().contains("no stable version of lua"));
    }
}
