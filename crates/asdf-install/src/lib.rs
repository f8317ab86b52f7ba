//! Install pipeline for asdf plugin versions.
//!
//! [`Installer::install_one_version`] drives a plugin through a fixed
//! sequence of hooks and callbacks:
//!
//! ```text
//! pre_asdf_download_<plugin>  ->  download  ->  pre_asdf_install_<plugin>
//!   ->  (create install dir)  ->  install  ->  post_asdf_install_<plugin>
//! ```
//!
//! The first failure aborts the attempt. Nothing is cleaned up: directories
//! created before the failure stay on disk.
//!
//! Concurrent attempts for the same plugin version are serialized by an
//! advisory lock in `<data>/locks`.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod env;
pub mod error;
pub mod installer;
pub mod lock;

pub use env::InstallEnvironment;
pub use error::{InstallError, InstallResult};
pub use installer::{DEFAULT_LATEST_QUERY, Installer};
pub use lock::{InstallLockGuard, acquire_install_lock};
