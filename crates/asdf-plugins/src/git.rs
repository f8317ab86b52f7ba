//! Git synchronization of plugin checkouts.
//!
//! [`ShellGit`] drives the `git` binary. Every invocation runs with the
//! inherited environment cleared down to `PATH` and `HOME`, system config
//! ignored, terminal prompts disabled and stdin closed, so an update that
//! needs credentials fails instead of hanging.

use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tracing::debug;

use crate::error::{GitError, GitResult};

/// Remote every plugin checkout tracks.
pub const REMOTE: &str = "origin";

/// Git operations on one plugin checkout.
///
/// Accessors re-read the repository on every call.
pub trait PluginGit {
    /// Directory of the checkout.
    fn directory(&self) -> &Path;

    /// Clone `url` into the checkout directory.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::Clone`] carrying git's message on failure.
    fn clone_from(&self, url: &str) -> GitResult<()>;

    /// Commit hash of `HEAD`.
    ///
    /// # Errors
    ///
    /// Fails if the directory is not a repository or has no commits.
    fn head(&self) -> GitResult<String>;

    /// First URL configured for `origin`.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::NoRemote`] when `origin` is not configured.
    fn remote_url(&self) -> GitResult<String>;

    /// Fetch from `origin` and check out `git_ref`, or the current branch
    /// when `None`. Returns the commit hash of `HEAD` afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::NotOnBranch`] for `None` on a detached checkout,
    /// without fetching. Any fetch or checkout failure is returned.
    fn update(&self, git_ref: Option<&str>) -> GitResult<String>;

    /// Branch to track when none is pinned.
    ///
    /// Walks the branches `origin` advertises in listing order and keeps
    /// the last path segment of each, so the last one listed wins.
    ///
    /// # Errors
    ///
    /// Fails if `origin` is not configured or advertises no branches.
    fn default_branch(&self) -> GitResult<String>;
}

/// [`PluginGit`] backed by the `git` executable.
#[derive(Debug, Clone)]
pub struct ShellGit {
    directory: PathBuf,
    git: PathBuf,
}

impl ShellGit {
    /// Create a handle for the checkout at `directory`.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::GitNotFound`] if `git` is not on `PATH`.
    pub fn new(directory: impl Into<PathBuf>) -> GitResult<Self> {
        let git = which::which("git").map_err(|e| GitError::GitNotFound(e.to_string()))?;
        Ok(Self {
            directory: directory.into(),
            git,
        })
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.git);
        cmd.env_clear();
        if let Ok(path) = std::env::var("PATH") {
            cmd.env("PATH", path);
        }
        if let Ok(home) = std::env::var("HOME") {
            cmd.env("HOME", home);
        }
        cmd.env("GIT_CONFIG_NOSYSTEM", "1");
        cmd.env("GIT_TERMINAL_PROMPT", "0");
        cmd.env("GIT_SSH_COMMAND", "ssh -o BatchMode=yes");
        cmd.stdin(Stdio::null());
        cmd
    }

    /// Run a git subcommand inside the checkout.
    fn output(&self, args: &[&str]) -> GitResult<Output> {
        if !self.directory.join(".git").exists() {
            return Err(GitError::NotARepository {
                path: self.directory.clone(),
            });
        }
        debug!(dir = %self.directory.display(), args = ?args, "Running git");
        self.command()
            .arg("-C")
            .arg(&self.directory)
            .args(args)
            .output()
            .map_err(|source| GitError::Spawn {
                command: args.join(" "),
                source,
            })
    }

    /// Run a git subcommand and return its trimmed stdout.
    fn run(&self, args: &[&str]) -> GitResult<String> {
        let output = self.output(args)?;
        if !output.status.success() {
            return Err(GitError::Command {
                command: args.join(" "),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Branch `HEAD` points at, or `None` when detached.
    fn current_branch(&self) -> GitResult<Option<String>> {
        let output = self.output(&["symbolic-ref", "-q", "--short", "HEAD"])?;
        if !output.status.success() {
            return Ok(None);
        }
        let branch = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok((!branch.is_empty()).then_some(branch))
    }

    /// Whether `HEAD` resolves to a commit.
    fn has_commits(&self) -> GitResult<bool> {
        Ok(self
            .output(&["rev-parse", "--verify", "-q", "HEAD"])?
            .status
            .success())
    }

    fn fetch_and_checkout_branch(&self, branch: &str) -> GitResult<()> {
        let refspec = format!("{branch}:{branch}");
        self.run(&["fetch", "--force", "--update-head-ok", REMOTE, &refspec])?;
        self.run(&["checkout", "--force", branch])?;
        Ok(())
    }
}

impl PluginGit for ShellGit {
    fn directory(&self) -> &Path {
        &self.directory
    }

    fn clone_from(&self, url: &str) -> GitResult<()> {
        reject_option_like("url", url)?;
        debug!(url, dir = %self.directory.display(), "Cloning plugin");
        let output = self
            .command()
            .arg("clone")
            .arg("-q")
            .arg("--")
            .arg(url)
            .arg(&self.directory)
            .stdout(Stdio::null())
            .output()
            .map_err(|source| GitError::Spawn {
                command: "clone".to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(GitError::Clone(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }
        Ok(())
    }

    fn head(&self) -> GitResult<String> {
        self.run(&["rev-parse", "HEAD"])
    }

    fn remote_url(&self) -> GitResult<String> {
        let key = format!("remote.{REMOTE}.url");
        let output = self.output(&["config", "--get-all", &key])?;
        String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(ToString::to_string)
            .ok_or_else(|| GitError::NoRemote(REMOTE.to_string()))
    }

    fn update(&self, git_ref: Option<&str>) -> GitResult<String> {
        if let Some(git_ref) = git_ref {
            reject_option_like("ref", git_ref)?;
        }
        match git_ref {
            Some(hash) if is_commit_hash(hash) => {
                self.run(&["fetch", "--force", REMOTE, hash])?;
                self.run(&["checkout", "--force", "--detach", hash])?;
            },
            Some(name) => self.fetch_and_checkout_branch(name)?,
            None => {
                let Some(branch) = self.current_branch()? else {
                    return Err(GitError::NotOnBranch);
                };
                let branch = if self.has_commits()? {
                    branch
                } else {
                    self.default_branch()?
                };
                self.fetch_and_checkout_branch(&branch)?;
            },
        }

        let head = self.head()?;
        debug!(dir = %self.directory.display(), git_ref = ?git_ref, head = %head, "Updated plugin");
        Ok(head)
    }

    fn default_branch(&self) -> GitResult<String> {
        self.remote_url()?;
        let listing = self.run(&["ls-remote", "--heads", REMOTE])?;
        last_branch(&listing).ok_or_else(|| GitError::NoBranches(REMOTE.to_string()))
    }
}

/// Refuse values git would read as a command-line option.
fn reject_option_like(kind: &'static str, value: &str) -> GitResult<()> {
    if value.starts_with('-') {
        return Err(GitError::OptionLike {
            kind,
            value: value.to_string(),
        });
    }
    Ok(())
}

/// A full 40 character hex object name.
fn is_commit_hash(value: &str) -> bool {
    value.len() == 40 && value.chars().all(|c| c.is_ascii_hexdigit())
}

/// Last segment of the last branch ref in `git ls-remote` output.
fn last_branch(listing: &str) -> Option<String> {
    let mut candidate = None;
    for line in listing.lines() {
        let Some((_, name)) = line.split_once('\t') else {
            continue;
        };
        if name.starts_with("refs/heads/")
            && let Some(segment) = name.rsplit('/').next()
        {
            candidate = Some(segment.to_string());
        }
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_listed_branch_wins() {
        let listing = "\
1111111111111111111111111111111111111111\trefs/heads/develop
2222222222222222222222222222222222222222\trefs/heads/main
3333333333333333333333333333333333333333\trefs/heads/feature/login
";
        assert_eq!(last_branch(listing), Some("login".to_string()));
    }

    #[test]
    fn non_branch_refs_ignored() {
        let listing = "\
1111111111111111111111111111111111111111\trefs/heads/master
2222222222222222222222222222222222222222\trefs/tags/v1.0
";
        assert_eq!(last_branch(listing), Some("master".to_string()));
        assert_eq!(last_branch(""), None);
    }

    #[test]
    fn commit_hash_detection() {
        assert!(is_commit_hash("0123456789abcdef0123456789abcdef01234567"));
        assert!(!is_commit_hash("master"));
        assert!(!is_commit_hash("0123456"));
    }

    #[test]
    fn option_like_values_rejected_before_running_git() {
        let tmp = tempfile::tempdir().unwrap();
        let git = ShellGit::new(tmp.path().join("checkout")).unwrap();

        let err = git.update(Some("--upload-pack=touch pwned;")).unwrap_err();
        assert!(matches!(err, GitError::OptionLike { kind: "ref", .. }), "{err}");

        let err = git.clone_from("-uexploit").unwrap_err();
        assert!(matches!(err, GitError::OptionLike { kind: "url", .. }), "{err}");
        assert!(!tmp.path().join("checkout").exists());
    }

    #[test]
    fn operations_outside_repository_fail() {
        let tmp = tempfile::tempdir().unwrap();
        let git = ShellGit::new(tmp.path()).unwrap();
        assert!(matches!(git.head(), Err(GitError::NotARepository { .. })));
        assert!(matches!(git.update(None), Err(GitError::NotARepository { .. })));
    }
}
