//! Mock hook and callback runners.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::io::Write;
use std::sync::{Arc, Mutex};

use asdf_hooks::{HookOutcome, HookRunner};
use asdf_plugins::{CallbackOutcome, CallbackRunner, Plugin};

/// A recorded hook invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookCall {
    /// Event name, e.g. `pre_asdf_install_lua`.
    pub event: String,
    /// Arguments passed.
    pub args: Vec<String>,
}

/// Hook runner that records every call and succeeds unless told otherwise.
#[derive(Debug, Clone, Default)]
pub struct RecordingHookRunner {
    calls: Arc<Mutex<Vec<HookCall>>>,
    failing: HashSet<String>,
}

impl RecordingHookRunner {
    /// Create a runner where every hook succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the hook named `event` fail.
    #[must_use]
    pub fn failing_on(mut self, event: impl Into<String>) -> Self {
        self.failing.insert(event.into());
        self
    }

    /// All calls so far.
    #[must_use]
    pub fn calls(&self) -> Vec<HookCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Event names of all calls so far.
    #[must_use]
    pub fn events(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.event).collect()
    }
}

impl HookRunner for RecordingHookRunner {
    fn run(
        &self,
        event: &str,
        args: &[String],
        _stdout: &mut dyn Write,
        _stderr: &mut dyn Write,
    ) -> HookOutcome {
        if let Ok(mut guard) = self.calls.lock() {
            guard.push(HookCall {
                event: event.to_string(),
                args: args.to_vec(),
            });
        }
        if self.failing.contains(event) {
            HookOutcome::Failed {
                detail: format!("hook {event} exited with code 1"),
            }
        } else {
            HookOutcome::Ran
        }
    }
}

/// Hook runner where every hook fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingHookRunner;

impl HookRunner for FailingHookRunner {
    fn run(
        &self,
        event: &str,
        _args: &[String],
        _stdout: &mut dyn Write,
        _stderr: &mut dyn Write,
    ) -> HookOutcome {
        HookOutcome::Failed {
            detail: format!("hook {event} exited with code 1"),
        }
    }
}

/// A recorded callback invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackCall {
    /// Plugin name.
    pub plugin: String,
    /// Callback name.
    pub callback: String,
    /// Arguments passed.
    pub args: Vec<String>,
    /// Environment passed.
    pub env: BTreeMap<String, String>,
}

#[derive(Debug, Clone)]
struct Script {
    outcome: CallbackOutcome,
    stdout: String,
}

/// Callback runner with canned responses per callback name.
///
/// Callbacks without a script report [`CallbackOutcome::Missing`].
#[derive(Debug, Clone, Default)]
pub struct ScriptedCallbackRunner {
    scripts: HashMap<String, Script>,
    calls: Arc<Mutex<Vec<CallbackCall>>>,
}

impl ScriptedCallbackRunner {
    /// Create a runner where every callback is missing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `callback` complete, printing `stdout`.
    #[must_use]
    pub fn completing(mut self, callback: impl Into<String>, stdout: impl Into<String>) -> Self {
        self.scripts.insert(
            callback.into(),
            Script {
                outcome: CallbackOutcome::Completed,
                stdout: stdout.into(),
            },
        );
        self
    }

    /// Make `callback` fail with `detail`.
    #[must_use]
    pub fn failing(mut self, callback: impl Into<String>, detail: impl Into<String>) -> Self {
        self.scripts.insert(
            callback.into(),
            Script {
                outcome: CallbackOutcome::Failed {
                    detail: detail.into(),
                },
                stdout: String::new(),
            },
        );
        self
    }

    /// All calls so far.
    #[must_use]
    pub fn calls(&self) -> Vec<CallbackCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Callback names of all calls so far.
    #[must_use]
    pub fn callbacks(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.callback).collect()
    }
}

impl CallbackRunner for ScriptedCallbackRunner {
    fn run(
        &self,
        plugin: &Plugin,
        callback: &str,
        args: &[String],
        env: &BTreeMap<String, String>,
        stdout: &mut dyn Write,
        _stderr: &mut dyn Write,
    ) -> CallbackOutcome {
        if let Ok(mut guard) = self.calls.lock() {
            guard.push(CallbackCall {
                plugin: plugin.name.clone(),
                callback: callback.to_string(),
                args: args.to_vec(),
                env: env.clone(),
            });
        }
        match self.scripts.get(callback) {
            Some(script) => {
                if stdout.write_all(script.stdout.as_bytes()).is_err() {
                    return CallbackOutcome::Failed {
                        detail: format!("failed to forward output of {callback}"),
                    };
                }
                script.outcome.clone()
            },
            None => CallbackOutcome::Missing,
        }
    }
}
