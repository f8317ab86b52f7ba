//! Environment variable overrides.
//!
//! Unlike file layers, environment variables always win: a set
//! `ASDF_DATA_DIR` replaces whatever the config file says.

use std::collections::HashMap;

use tracing::debug;

/// Mapping from environment variable name to config field path.
struct EnvMapping {
    var_name: &'static str,
    field_path: &'static str,
}

/// Supported `ASDF_*` variables.
const ENV_MAPPINGS: &[EnvMapping] = &[
    EnvMapping {
        var_name: "ASDF_DATA_DIR",
        field_path: "data_dir",
    },
    EnvMapping {
        var_name: "ASDF_DEFAULT_LATEST_QUERY",
        field_path: "default_latest_query",
    },
    EnvMapping {
        var_name: "ASDF_LOG",
        field_path: "logging.level",
    },
];

/// Variable naming an alternative user config file.
pub const CONFIG_FILE_VAR: &str = "ASDF_CONFIG_FILE";

/// Apply environment overrides to the merged tree.
///
/// Empty values are ignored. Returns the number of overrides applied.
pub fn apply_env_overrides<S: ::std::hash::BuildHasher>(
    merged: &mut toml::Value,
    env_vars: &HashMap<String, String, S>,
) -> usize {
    let mut count: usize = 0;

    for mapping in ENV_MAPPINGS {
        let Some(val) = env_vars.get(mapping.var_name).filter(|v| !v.is_empty()) else {
            continue;
        };
        debug!(
            var = mapping.var_name,
            field = mapping.field_path,
            "applying env var override"
        );
        set_field(merged, mapping.field_path, val);
        count = count.saturating_add(1);
    }

    count
}

/// Set a dotted string field, creating intermediate tables.
fn set_field(root: &mut toml::Value, path: &str, val: &str) {
    let (parents, leaf) = match path.rsplit_once('.') {
        Some((parents, leaf)) => (Some(parents), leaf),
        None => (None, path),
    };

    let mut current = root;
    for segment in parents.into_iter().flat_map(|p| p.split('.')) {
        let Some(table) = current.as_table_mut() else {
            return;
        };
        current = table
            .entry(segment.to_owned())
            .or_insert(toml::Value::Table(toml::map::Map::new()));
    }

    if let Some(table) = current.as_table_mut() {
        table.insert(leaf.to_owned(), toml::Value::String(val.to_owned()));
    }
}

/// Snapshot the process environment.
#[must_use]
pub fn collect_env_vars() -> HashMap<String, String> {
    std::env::vars().collect()
}
