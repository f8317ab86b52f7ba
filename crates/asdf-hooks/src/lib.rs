//! asdf Hooks - user-configured commands run around installs.
//!
//! Hooks are shell commands keyed by an event name. The installer fires
//! three events per plugin:
//!
//! - `pre_asdf_download_<plugin>`
//! - `pre_asdf_install_<plugin>`
//! - `post_asdf_install_<plugin>`
//!
//! Each command runs as an `sh -c` script with the version being installed
//! as `$1`. An event without a configured command is a no-op.
//!
//! # Example
//!
//! ```rust,ignore
//! use asdf_hooks::{CommandHookRunner, HookEvent, HookRunner};
//!
//! let runner = CommandHookRunner::new(config.hooks.clone());
//! let outcome = runner.run(
//!     &HookEvent::PreInstall.hook_name("lua"),
//!     &["5.4.6".to_string()],
//!     &mut std::io::stdout(),
//!     &mut std::io::stderr(),
//! );
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod event;
pub mod result;
pub mod runner;

pub use event::HookEvent;
pub use result::HookOutcome;
pub use runner::{CommandHookRunner, HookRunner};
