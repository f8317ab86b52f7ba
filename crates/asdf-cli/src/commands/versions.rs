//! Version resolution for the current directory.

use anyhow::{Context, Result, bail};
use asdf_versions::{TOOL_VERSIONS_FILE, scope};

/// Print the versions selected for `tool` and the file that selects them.
pub(crate) fn current(tool: &str) -> Result<()> {
    let cwd = std::env::current_dir().context("unable to determine current directory")?;
    let home = directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf());

    let files = scope::declaration_files(&cwd, home.as_deref(), TOOL_VERSIONS_FILE);
    match scope::resolve_tool(&files, tool)? {
        Some(resolved) => {
            println!(
                "{tool} {} {}",
                resolved.versions.join(" "),
                resolved.source.display()
            );
            Ok(())
        },
        None => bail!("no version is set for {tool}"),
    }
}
