//! asdf Test - Shared test utilities.
//!
//! Git fixtures and mock runners used across asdf crates as a
//! dev-dependency.
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! asdf-test.workspace = true
//! ```
//!
//! ```rust,ignore
//! use asdf_test::{RecordingHookRunner, install_mock_plugin_repo};
//!
//! let tmp = tempfile::tempdir().unwrap();
//! let repo = install_mock_plugin_repo(tmp.path(), "lua").unwrap();
//! let hooks = RecordingHookRunner::new();
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;

/// Install a test subscriber that honours `RUST_LOG`. Safe to call twice.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
