//! Bridge from `asdf_config::Config` to the types other crates take.

use std::io::IsTerminal;

use asdf_config::Config;
use asdf_core::DataDir;
use asdf_hooks::CommandHookRunner;
use asdf_telemetry::{LogConfig, LogFormat};

/// Targets of every asdf crate start with `asdf`.
const VERBOSE_DIRECTIVE: &str = "asdf=debug";

/// Convert the `[logging]` section to a [`LogConfig`].
///
/// `verbose` adds a `debug` directive for every asdf crate. Colors are
/// only used when stderr is a terminal.
pub(crate) fn to_log_config(cfg: &Config, verbose: bool) -> LogConfig {
    let format = cfg
        .logging
        .format
        .parse::<LogFormat>()
        .unwrap_or_default();
    let mut log_config = LogConfig::new(&cfg.logging.level).with_format(format);

    if verbose {
        log_config = log_config.with_directive(VERBOSE_DIRECTIVE);
    }
    if !cfg.logging.timestamps {
        log_config = log_config.without_timestamps();
    }
    if !std::io::stderr().is_terminal() {
        log_config = log_config.without_ansi();
    }
    log_config
}

pub(crate) fn to_data_dir(cfg: &Config) -> DataDir {
    DataDir::from_path(&cfg.data_dir)
}

/// Hook runner for the `[hooks]` table.
pub(crate) fn to_hook_runner(cfg: &Config) -> CommandHookRunner {
    CommandHookRunner::new(cfg.hooks.clone())
}
