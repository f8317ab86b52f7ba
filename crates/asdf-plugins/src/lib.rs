//! Plugin management for the asdf tool version manager.
//!
//! A plugin is a git checkout under `<data>/plugins/<name>` holding
//! executable callbacks in `bin/`. This crate provides:
//!
//! - [`PluginGit`] / [`ShellGit`]: clone, inspect and update a checkout
//! - [`manager`]: add, remove, list and update installed plugins
//! - [`Plugin`]: a named plugin directory, with name validation
//! - [`CallbackRunner`] / [`ScriptCallbackRunner`]: run `bin/<callback>`
//!
//! # Updating
//!
//! Without an explicit ref, [`PluginGit::update`] follows the branch the
//! checkout is on. A detached checkout is refused. A checkout whose branch
//! has no commits yet tracks the default branch advertised by `origin`.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod callback;
pub mod error;
pub mod git;
pub mod manager;
pub mod plugin;

pub use callback::{CallbackOutcome, CallbackRunner, ScriptCallbackRunner};
pub use error::{GitError, GitResult, PluginError, PluginResult};
pub use git::{PluginGit, ShellGit};
pub use plugin::{Plugin, validate_name};
