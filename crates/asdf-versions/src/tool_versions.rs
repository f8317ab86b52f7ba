//! The `.tool-versions` declaration file model.
//!
//! Parsing is line oriented and never fails: comments are dropped, blank
//! lines are skipped, and a line with only a tool name yields an empty
//! version list. A file may declare the same tool more than once; entries
//! are kept as written and merged later with [`unique`](crate::unique).

use std::fmt;
use std::path::Path;

use tracing::debug;

use crate::error::{VersionsError, VersionsResult};

/// A tool and the versions declared for it on one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolVersions {
    /// Tool (plugin) name.
    pub name: String,
    /// Versions in declaration order.
    pub versions: Vec<String>,
}

impl ToolVersions {
    /// Create a new entry.
    #[must_use]
    pub fn new(name: impl Into<String>, versions: Vec<String>) -> Self {
        Self {
            name: name.into(),
            versions,
        }
    }
}

impl fmt::Display for ToolVersions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for version in &self.versions {
            write!(f, " {version}")?;
        }
        Ok(())
    }
}

/// Parse the content of a declaration file.
#[must_use]
pub fn parse_content(content: &str) -> Vec<ToolVersions> {
    significant_lines(content)
        .filter_map(|line| {
            let mut tokens = tokenize(line);
            let name = tokens.next()?;
            Some(ToolVersions::new(name, tokens.map(ToString::to_string).collect()))
        })
        .collect()
}

/// Read and parse a declaration file.
///
/// # Errors
///
/// Returns [`VersionsError::Read`] if the file cannot be read.
pub fn parse_file(path: &Path) -> VersionsResult<Vec<ToolVersions>> {
    let content = std::fs::read_to_string(path).map_err(|source| VersionsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let entries = parse_content(&content);
    debug!(path = %path.display(), entries = entries.len(), "Parsed declaration file");
    Ok(entries)
}

/// Look up the versions declared for `tool` in a declaration file.
///
/// Only the first line naming the tool is used; later lines for the same
/// tool are ignored. Returns `Ok(None)` when the tool is not declared.
///
/// # Errors
///
/// Returns [`VersionsError::Read`] if the file cannot be read.
pub fn find_tool_versions(path: &Path, tool: &str) -> VersionsResult<Option<Vec<String>>> {
    Ok(parse_file(path)?
        .into_iter()
        .find(|entry| entry.name == tool)
        .map(|entry| entry.versions))
}

/// Serialize entries as declaration file content, one line each.
#[must_use]
pub fn render(entries: &[ToolVersions]) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str(&entry.to_string());
        out.push('\n');
    }
    out
}

/// Set the versions of `tool` in a declaration file.
///
/// The first line declaring the tool is replaced; every other line,
/// comments included, is kept verbatim. When the tool is not declared a new
/// line is appended. A missing file is created.
///
/// # Errors
///
/// Returns [`VersionsError::Read`] or [`VersionsError::Write`] on I/O failure.
pub fn set_tool_versions(path: &Path, tool: &str, versions: &[String]) -> VersionsResult<()> {
    let existing = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(source) => {
            return Err(VersionsError::Read {
                path: path.to_path_buf(),
                source,
            });
        },
    };

    let replacement = ToolVersions::new(tool, versions.to_vec()).to_string();
    let mut replaced = false;
    let mut lines: Vec<String> = existing
        .lines()
        .map(|line| {
            if !replaced && tokenize(strip_comment(line)).next() == Some(tool) {
                replaced = true;
                replacement.clone()
            } else {
                line.to_string()
            }
        })
        .collect();
    if !replaced {
        lines.push(replacement);
    }

    let mut content = lines.join("\n");
    content.push('\n');
    std::fs::write(path, content).map_err(|source| VersionsError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), tool, "Updated declaration file");
    Ok(())
}

/// Lines with comments removed, trimmed, and blank ones skipped.
fn significant_lines(content: &str) -> impl Iterator<Item = &str> {
    content
        .split('\n')
        .map(|line| strip_comment(line).trim())
        .filter(|line| !line.is_empty())
}

/// Everything before the first `#`.
fn strip_comment(line: &str) -> &str {
    line.split_once('#').map_or(line, |(before, _)| before)
}

/// Split on single spaces, dropping the empty tokens runs of spaces leave.
fn tokenize(line: &str) -> impl Iterator<Item = &str> {
    line.split(' ').map(str::trim).filter(|token| !token.is_empty())
}
