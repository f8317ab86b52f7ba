//! Subcommand handlers.

pub(crate) mod install;
pub(crate) mod plugin;
pub(crate) mod versions;
