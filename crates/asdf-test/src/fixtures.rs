//! Plugin fixtures.
//!
//! The dummy plugin provides every callback the installer knows about:
//!
//! | callback        | behaviour                                                   |
//! |-----------------|-------------------------------------------------------------|
//! | `list-all`      | prints `1.0.0 1.1.0 2.0.0`                                  |
//! | `latest-stable` | prints `1.1.0` for queries starting with `1`, else `2.0.0`  |
//! | `download`      | writes `$ASDF_DOWNLOAD_PATH/source`                         |
//! | `install`       | writes the `ASDF_*` environment to `$ASDF_INSTALL_PATH/env` |

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use asdf_core::DataDir;
use asdf_plugins::Plugin;
use tracing::debug;

const LIST_ALL: &str = "echo \"1.0.0 1.1.0 2.0.0\"";
const LATEST_STABLE: &str = "case \"$1\" in\n  1*) echo 1.1.0 ;;\n  *) echo 2.0.0 ;;\nesac";
const DOWNLOAD: &str = "echo \"downloaded $ASDF_INSTALL_VERSION\" > \"$ASDF_DOWNLOAD_PATH/source\"";
const INSTALL: &str = "mkdir -p \"$ASDF_INSTALL_PATH/bin\"\n\
env | grep '^ASDF_' | sort > \"$ASDF_INSTALL_PATH/env\"\n\
echo \"installed $ASDF_INSTALL_VERSION\"";

/// Callbacks of the dummy plugin.
pub const DUMMY_CALLBACKS: &[&str] = &["download", "install", "latest-stable", "list-all"];

/// Write the dummy plugin's files into `dir`.
///
/// # Errors
///
/// Returns any I/O error.
pub fn write_dummy_plugin(dir: &Path) -> io::Result<()> {
    std::fs::create_dir_all(dir.join("bin"))?;
    std::fs::write(dir.join("LICENSE"), "MIT\n")?;
    for (name, body) in [
        ("list-all", LIST_ALL),
        ("latest-stable", LATEST_STABLE),
        ("download", DOWNLOAD),
        ("install", INSTALL),
    ] {
        write_callback(dir, name, body)?;
    }
    Ok(())
}

/// Write an executable `bin/<name>` shell script into a plugin directory.
///
/// # Errors
///
/// Returns any I/O error.
pub fn write_callback(plugin_dir: &Path, name: &str, body: &str) -> io::Result<()> {
    let path = plugin_dir.join("bin").join(name);
    std::fs::create_dir_all(plugin_dir.join("bin"))?;
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n"))?;
    make_executable(&path)
}

#[cfg(unix)]
fn make_executable(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> io::Result<()> {
    Ok(())
}

/// Place the dummy plugin directly in `data_dir` without git.
///
/// # Errors
///
/// Returns any I/O error.
pub fn install_dummy_plugin(data_dir: &DataDir, name: &str) -> io::Result<Plugin> {
    let plugin = Plugin::new(data_dir, name);
    write_dummy_plugin(&plugin.dir)?;
    Ok(plugin)
}

/// Create a git repository holding the dummy plugin at `<dir>/repo-<name>`.
///
/// The repository is on `master` with two commits; the second adds
/// `README.md`. Its `origin` points at itself so clones and the repository
/// can both fetch from a valid remote.
///
/// # Errors
///
/// Returns an error if writing files or any git command fails.
pub fn install_mock_plugin_repo(dir: &Path, name: &str) -> io::Result<PathBuf> {
    let location = dir.join(format!("repo-{name}"));
    write_dummy_plugin(&location)?;

    git(&location, &["-c", "init.defaultBranch=master", "init", "-q"])?;
    git(&location, &["symbolic-ref", "HEAD", "refs/heads/master"])?;
    git(&location, &["config", "user.name", "Test"])?;
    git(&location, &["config", "user.email", "test@example.com"])?;
    git(&location, &["config", "commit.gpgsign", "false"])?;
    git(&location, &["add", "-A"])?;
    git(&location, &["commit", "-q", "-m", &format!("asdf {name} plugin init")])?;

    std::fs::write(location.join("README.md"), "")?;
    git(&location, &["add", "-A"])?;
    git(&location, &["commit", "-q", "-m", &format!("asdf {name} plugin readme")])?;

    let origin = location.to_string_lossy().into_owned();
    git(&location, &["remote", "add", "origin", &origin])?;

    debug!(repo = %location.display(), "Created mock plugin repository");
    Ok(location)
}

/// Run git inside `repo` and return its trimmed stdout.
///
/// # Errors
///
/// Returns an error if git cannot be started or exits unsuccessfully.
pub fn git(repo: &Path, args: &[&str]) -> io::Result<String> {
    let output = Command::new("git").arg("-C").arg(repo).args(args).output()?;
    if !output.status.success() {
        return Err(io::Error::other(format!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
