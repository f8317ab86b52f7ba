//! Hook execution outcomes.

/// Result of running a hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookOutcome {
    /// The hook command ran and exited successfully.
    Ran,
    /// No command is configured for the event.
    NotConfigured,
    /// The hook could not be started or exited unsuccessfully.
    Failed {
        /// What went wrong.
        detail: String,
    },
}
