//! Declaration file discovery.
//!
//! Files are searched from the working directory up to the filesystem root,
//! nearest first. The home directory file is consulted last, after every
//! ancestor, unless the walk already passed through it.

use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::VersionsResult;
use crate::set_ops::unique;
use crate::tool_versions::{ToolVersions, find_tool_versions, parse_file};

/// Default declaration file name.
pub const TOOL_VERSIONS_FILE: &str = ".tool-versions";

/// Versions resolved for a tool and the file that declared them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVersions {
    /// Versions in declaration order.
    pub versions: Vec<String>,
    /// The declaration file they came from.
    pub source: PathBuf,
}

/// Collect existing declaration files, nearest first.
#[must_use]
pub fn declaration_files(start_dir: &Path, home_dir: Option<&Path>, file_name: &str) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = start_dir
        .ancestors()
        .map(|dir| dir.join(file_name))
        .filter(|candidate| candidate.is_file())
        .collect();

    if let Some(home) = home_dir {
        let candidate = home.join(file_name);
        if candidate.is_file() && !files.contains(&candidate) {
            files.push(candidate);
        }
    }

    trace!(start = %start_dir.display(), found = files.len(), "Discovered declaration files");
    files
}

/// Find the nearest file declaring `tool`.
///
/// Returns `Ok(None)` when no file declares it.
///
/// # Errors
///
/// Returns an error if one of the files cannot be read.
pub fn resolve_tool(files: &[PathBuf], tool: &str) -> VersionsResult<Option<ResolvedVersions>> {
    for file in files {
        if let Some(versions) = find_tool_versions(file, tool)? {
            debug!(tool, source = %file.display(), "Resolved tool versions");
            return Ok(Some(ResolvedVersions {
                versions,
                source: file.clone(),
            }));
        }
    }
    Ok(None)
}

/// Parse every file and merge the declarations with [`unique`].
///
/// # Errors
///
/// Returns an error if one of the files cannot be read.
pub fn merged_declarations(files: &[PathBuf]) -> VersionsResult<Vec<ToolVersions>> {
    let mut all = Vec::new();
    for file in files {
        all.extend(parse_file(file)?);
    }
    Ok(unique(all))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(path: &Path, content: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn nearest_file_first() {
        let tmp = tempfile::tempdir().unwrap();
        let project = tmp.path().join("project");
        let nested = project.join("src").join("deep");
        std::fs::create_dir_all(&nested).unwrap();
        write(&project.join(TOOL_VERSIONS_FILE), "lua 5.4.6\n");
        write(&project.join("src").join(TOOL_VERSIONS_FILE), "lua 5.3.6\n");

        let files = declaration_files(&nested, None, TOOL_VERSIONS_FILE);
        assert_eq!(
            files,
            vec![
                project.join("src").join(TOOL_VERSIONS_FILE),
                project.join(TOOL_VERSIONS_FILE),
            ]
        );
    }

    #[test]
    fn home_file_appended_once() {
        let tmp = tempfile::tempdir().unwrap();
        let home = tmp.path().join("home");
        let work = home.join("work");
        std::fs::create_dir_all(&work).unwrap();
        write(&home.join(TOOL_VERSIONS_FILE), "ruby 3.3.0\n");

        // Walk passes through home: listed once.
        let files = declaration_files(&work, Some(&home), TOOL_VERSIONS_FILE);
        assert_eq!(files, vec![home.join(TOOL_VERSIONS_FILE)]);

        // Unrelated directory: home comes last.
        let elsewhere = tmp.path().join("elsewhere");
        write(&elsewhere.join(TOOL_VERSIONS_FILE), "lua 5.4.6\n");
        let files = declaration_files(&elsewhere, Some(&home), TOOL_VERSIONS_FILE);
        assert_eq!(
            files,
            vec![elsewhere.join(TOOL_VERSIONS_FILE), home.join(TOOL_VERSIONS_FILE)]
        );
    }

    #[test]
    fn resolve_picks_nearest_declaring_file() {
        let tmp = tempfile::tempdir().unwrap();
        let outer = tmp.path().join(TOOL_VERSIONS_FILE);
        let inner = tmp.path().join("app").join(TOOL_VERSIONS_FILE);
        write(&outer, "lua 5.1\nruby 3.3.0\n");
        write(&inner, "lua 5.4.6 system\n");

        let files = vec![inner.clone(), outer.clone()];
        let lua = resolve_tool(&files, "lua").unwrap().unwrap();
        assert_eq!(lua.versions, vec!["5.4.6".to_string(), "system".to_string()]);
        assert_eq!(lua.source, inner);

        let ruby = resolve_tool(&files, "ruby").unwrap().unwrap();
        assert_eq!(ruby.source, outer);

        assert!(resolve_tool(&files, "python").unwrap().is_none());
    }

    #[test]
    fn merged_declarations_apply_unique() {
        let tmp = tempfile::tempdir().unwrap();
        let a = tmp.path().join("a");
        let b = tmp.path().join("b");
        write(&a, "x 1 2\n");
        write(&b, "x 2 3\ny 9\n");

        let merged = merged_declarations(&[a, b]).unwrap();
        assert_eq!(
            merged,
            vec![
                ToolVersions::new("x", vec!["1".into(), "2".into(), "3".into()]),
                ToolVersions::new("y", vec!["9".into()]),
            ]
        );
    }
}
