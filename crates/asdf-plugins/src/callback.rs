//! Plugin callbacks.
//!
//! A callback is an executable at `<plugin>/bin/<name>`. Whether a
//! callback exists is part of its result: optional callbacks such as
//! `download` are skipped when [`CallbackOutcome::Missing`].

use std::collections::BTreeMap;
use std::io::{self, Read, Write};
use std::process::{ChildStderr, ChildStdout, Command, Stdio};
use std::sync::mpsc::{self, Sender};

use tracing::{debug, warn};

use crate::plugin::Plugin;

/// Result of invoking a callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackOutcome {
    /// The callback ran and exited successfully.
    Completed,
    /// The plugin does not provide this callback.
    Missing,
    /// The callback could not be started or exited unsuccessfully.
    Failed {
        /// Exit status and stderr of the callback.
        detail: String,
    },
}

/// Runs plugin callbacks.
pub trait CallbackRunner {
    /// Run `callback` of `plugin` with `args`, adding `env` to the
    /// inherited environment. Output is written to the sinks.
    fn run(
        &self,
        plugin: &Plugin,
        callback: &str,
        args: &[String],
        env: &BTreeMap<String, String>,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> CallbackOutcome;
}

/// Runs callbacks as executables from the plugin's `bin/` directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptCallbackRunner;

impl ScriptCallbackRunner {
    /// Create a runner.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl CallbackRunner for ScriptCallbackRunner {
    fn run(
        &self,
        plugin: &Plugin,
        callback: &str,
        args: &[String],
        env: &BTreeMap<String, String>,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> CallbackOutcome {
        let path = plugin.callback_path(callback);
        if !path.is_file() {
            debug!(plugin = %plugin.name, callback, "Callback not provided");
            return CallbackOutcome::Missing;
        }

        debug!(plugin = %plugin.name, callback, args = ?args, "Running callback");
        let mut child = match Command::new(&path)
            .args(args)
            .envs(env)
            .current_dir(&plugin.dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                return CallbackOutcome::Failed {
                    detail: format!("failed to execute {}: {e}", path.display()),
                };
            },
        };

        let (Some(child_out), Some(child_err)) = (child.stdout.take(), child.stderr.take()) else {
            let _ = child.kill();
            let _ = child.wait();
            return CallbackOutcome::Failed {
                detail: format!("failed to capture output of {callback}"),
            };
        };
        let forwarded = forward_output(child_out, child_err, stdout, stderr);

        let status = match child.wait() {
            Ok(status) => status,
            Err(e) => {
                return CallbackOutcome::Failed {
                    detail: format!("failed to wait for {callback}: {e}"),
                };
            },
        };
        let captured_err = match forwarded {
            Ok(captured_err) => captured_err,
            Err(e) => {
                return CallbackOutcome::Failed {
                    detail: format!("failed to forward output of {callback}: {e}"),
                };
            },
        };

        if status.success() {
            return CallbackOutcome::Completed;
        }

        let exit_code = status.code().unwrap_or(-1);
        let message = String::from_utf8_lossy(&captured_err).trim().to_string();
        warn!(plugin = %plugin.name, callback, exit_code, "Callback failed");
        let detail = if message.is_empty() {
            format!("{callback} exited with code {exit_code}")
        } else {
            format!("{callback} exited with code {exit_code}: {message}")
        };
        CallbackOutcome::Failed { detail }
    }
}

#[derive(Debug, Clone, Copy)]
enum Stream {
    Out,
    Err,
}

/// Copy the child's output to the sinks as it arrives.
///
/// Both pipes are drained to the end even after a sink fails, so the child
/// never blocks on a full pipe. Returns everything written to stderr.
fn forward_output(
    child_out: ChildStdout,
    child_err: ChildStderr,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> io::Result<Vec<u8>> {
    let (tx, rx) = mpsc::channel();

    std::thread::scope(|scope| {
        let out_tx = tx.clone();
        scope.spawn(move || pump(child_out, Stream::Out, &out_tx));
        scope.spawn(move || pump(child_err, Stream::Err, &tx));

        let mut captured_err = Vec::new();
        let mut result = Ok(());
        for (stream, chunk) in rx {
            if result.is_err() {
                continue;
            }
            result = match stream {
                Stream::Out => stdout.write_all(&chunk).and_then(|()| stdout.flush()),
                Stream::Err => {
                    captured_err.extend_from_slice(&chunk);
                    stderr.write_all(&chunk).and_then(|()| stderr.flush())
                },
            };
        }
        result.map(|()| captured_err)
    })
}

fn pump(mut reader: impl Read, stream: Stream, tx: &Sender<(Stream, Vec<u8>)>) {
    let mut buf = [0_u8; 8192];
    loop {
        match reader.read(&mut buf) {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                let Some(chunk) = buf.get(..n) else { break };
                if tx.send((stream, chunk.to_vec())).is_err() {
                    break;
                }
            },
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::os::unix::fs::PermissionsExt;

    use asdf_core::DataDir;

    use super::*;

    fn plugin_with(callbacks: &[(&str, &str)]) -> (tempfile::TempDir, Plugin) {
        let tmp = tempfile::tempdir().unwrap();
        let plugin = Plugin::new(&DataDir::from_path(tmp.path()), "dummy");
        std::fs::create_dir_all(plugin.dir.join("bin")).unwrap();
        for (name, body) in callbacks {
            let path = plugin.callback_path(name);
            std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        }
        (tmp, plugin)
    }

    fn run(
        plugin: &Plugin,
        callback: &str,
        args: &[&str],
        env: &[(&str, &str)],
    ) -> (CallbackOutcome, String) {
        let args: Vec<String> = args.iter().map(ToString::to_string).collect();
        let env: BTreeMap<String, String> = env
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let outcome = ScriptCallbackRunner::new().run(plugin, callback, &args, &env, &mut out, &mut err);
        (outcome, String::from_utf8(out).unwrap())
    }

    #[test]
    fn missing_callback() {
        let (_tmp, plugin) = plugin_with(&[]);
        assert_eq!(run(&plugin, "download", &[], &[]).0, CallbackOutcome::Missing);
    }

    #[test]
    fn passes_args_and_env() {
        let (_tmp, plugin) = plugin_with(&[("latest-stable", "echo \"$1 $ASDF_INSTALL_TYPE\"")]);
        let (outcome, out) = run(
            &plugin,
            "latest-stable",
            &["[0-9]"],
            &[("ASDF_INSTALL_TYPE", "version")],
        );
        assert_eq!(outcome, CallbackOutcome::Completed);
        assert_eq!(out, "[0-9] version\n");
    }

    #[test]
    fn failure_carries_exit_code_and_stderr() {
        let (_tmp, plugin) = plugin_with(&[("install", "echo 'no compiler' >&2; exit 2")]);
        let (outcome, _) = run(&plugin, "install", &[], &[]);
        assert_eq!(
            outcome,
            CallbackOutcome::Failed {
                detail: "install exited with code 2: no compiler".into()
            }
        );
    }

    /// Sink that creates `flag` once it has received `trigger`.
    struct SignallingSink {
        seen: Vec<u8>,
        trigger: &'static str,
        flag: std::path::PathBuf,
    }

    impl Write for SignallingSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.seen.extend_from_slice(buf);
            if String::from_utf8_lossy(&self.seen).contains(self.trigger) && !self.flag.exists() {
                std::fs::write(&self.flag, "")?;
            }
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn output_is_forwarded_while_the_callback_runs() {
        let tmp = tempfile::tempdir().unwrap();
        let flag = tmp.path().join("seen");
        // Waits up to ~10s for the sink to acknowledge the first line.
        let body = format!(
            "echo started\n\
             i=0\n\
             while [ ! -e '{flag}' ]; do\n\
               i=$((i + 1)); [ \"$i\" -gt 100 ] && exit 7\n\
               sleep 0.1\n\
             done\n\
             echo done",
            flag = flag.display()
        );
        let (_plugin_tmp, plugin) = plugin_with(&[("install", body.as_str())]);

        let mut out = SignallingSink {
            seen: Vec::new(),
            trigger: "started",
            flag,
        };
        let mut err = Vec::new();
        let outcome = ScriptCallbackRunner::new().run(
            &plugin,
            "install",
            &[],
            &BTreeMap::new(),
            &mut out,
            &mut err,
        );
        assert_eq!(outcome, CallbackOutcome::Completed);
        assert_eq!(String::from_utf8(out.seen).unwrap(), "started\ndone\n");
    }

    #[test]
    fn non_executable_callback_fails() {
        let (_tmp, plugin) = plugin_with(&[]);
        std::fs::write(plugin.callback_path("install"), "not a script").unwrap();
        let (outcome, _) = run(&plugin, "install", &[], &[]);
        assert!(matches!(outcome, CallbackOutcome::Failed { .. }));
    }
}
