//! Hook runners.
//!
//! [`CommandHookRunner`] looks the event name up in a map of configured
//! commands and runs the match as an `sh -c` script. The event name is `$0`
//! and the hook arguments are `$1`, `$2`, ... Output is captured and copied
//! to the caller's sinks once the command exits.

use std::collections::BTreeMap;
use std::io::Write;
use std::process::{Command, Stdio};

use tracing::{debug, warn};

use crate::result::HookOutcome;

const SHELL: &str = "sh";

/// Runs the command configured for a hook event.
pub trait HookRunner {
    /// Run the hook named `event` with `args`.
    ///
    /// Never fails outright: failures are reported as
    /// [`HookOutcome::Failed`].
    fn run(
        &self,
        event: &str,
        args: &[String],
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> HookOutcome;
}

/// Runs hooks as shell commands.
#[derive(Debug, Clone)]
pub struct CommandHookRunner {
    hooks: BTreeMap<String, String>,
}

impl CommandHookRunner {
    /// Create a runner over a map of event name to shell command.
    #[must_use]
    pub fn new(hooks: BTreeMap<String, String>) -> Self {
        Self { hooks }
    }

    /// The command configured for an event, if any.
    #[must_use]
    pub fn command_for(&self, event: &str) -> Option<&str> {
        self.hooks.get(event).map(String::as_str)
    }
}

impl HookRunner for CommandHookRunner {
    fn run(
        &self,
        event: &str,
        args: &[String],
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> HookOutcome {
        let Some(command) = self.command_for(event) else {
            return HookOutcome::NotConfigured;
        };

        debug!(event, command, args = ?args, "Executing hook");

        let output = match Command::new(SHELL)
            .arg("-c")
            .arg(command)
            .arg(event)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
        {
            Ok(output) => output,
            Err(e) => {
                return HookOutcome::Failed {
                    detail: format!("failed to execute hook {event}: {e}"),
                };
            },
        };

        if let Err(e) = stdout
            .write_all(&output.stdout)
            .and_then(|()| stderr.write_all(&output.stderr))
        {
            return HookOutcome::Failed {
                detail: format!("failed to forward output of hook {event}: {e}"),
            };
        }

        if !output.status.success() {
            let exit_code = output.status.code().unwrap_or(-1);
            warn!(event, exit_code, "Hook failed");
            return HookOutcome::Failed {
                detail: format!("hook {event} exited with code {exit_code}"),
            };
        }

        HookOutcome::Ran
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner(event: &str, command: &str) -> CommandHookRunner {
        CommandHookRunner::new(BTreeMap::from([(event.to_string(), command.to_string())]))
    }

    fn run(runner: &CommandHookRunner, event: &str, args: &[&str]) -> (HookOutcome, String, String) {
        let args: Vec<String> = args.iter().map(ToString::to_string).collect();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let outcome = runner.run(event, &args, &mut out, &mut err);
        (
            outcome,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn unconfigured_event_is_noop() {
        let runner = CommandHookRunner::new(BTreeMap::new());
        let (outcome, out, err) = run(&runner, "pre_asdf_install_lua", &["5.4.6"]);
        assert_eq!(outcome, HookOutcome::NotConfigured);
        assert!(out.is_empty());
        assert!(err.is_empty());
    }

    #[test]
    fn arguments_are_positional_parameters() {
        let runner = runner("pre_asdf_install_lua", "echo \"installing $1 via $0\"");
        let (outcome, out, _) = run(&runner, "pre_asdf_install_lua", &["5.4.6"]);
        assert_eq!(outcome, HookOutcome::Ran);
        assert_eq!(out, "installing 5.4.6 via pre_asdf_install_lua\n");
    }

    #[test]
    fn arguments_are_not_appended_to_the_command() {
        for command in ["echo done;", "echo done &&\ntrue", "echo done # trailing comment", "echo done\n"] {
            let runner = runner("post_asdf_install_lua", command);
            let (outcome, out, _) = run(&runner, "post_asdf_install_lua", &["1.1.0"]);
            assert_eq!(outcome, HookOutcome::Ran, "{command:?}");
            assert_eq!(out, "done\n", "{command:?}");
        }
    }

    #[test]
    fn forwards_stderr() {
        let runner = runner("post_asdf_install_lua", "echo oops >&2");
        let (outcome, _, err) = run(&runner, "post_asdf_install_lua", &[]);
        assert_eq!(outcome, HookOutcome::Ran);
        assert_eq!(err, "oops\n");
    }

    #[test]
    fn nonzero_exit_fails_with_code() {
        let runner = runner("pre_asdf_download_lua", "exit 3");
        let (outcome, _, _) = run(&runner, "pre_asdf_download_lua", &["1.0"]);
        let HookOutcome::Failed { detail } = outcome else {
            panic!("expected failure, got {outcome:?}");
        };
        assert_eq!(detail, "hook pre_asdf_download_lua exited with code 3");
    }
}
