//! Version declarations for the asdf tool version manager.
//!
//! Provides the pieces needed to turn text into an ordered version list per
//! tool:
//!
//! - [`VersionSpec`]: a single version token parsed into its kind
//!   (plain version, git ref, local path, or `latest`)
//! - [`ToolVersions`]: one line of a `.tool-versions` declaration file
//! - [`intersect`] / [`unique`]: set operations used to merge declarations
//!   gathered from several files
//! - [`scope`]: discovery of declaration files from a working directory
//!
//! # Declaration format
//!
//! ```text
//! # comment
//! lua 5.4.6 5.3.6   # trailing comments are stripped
//! nodejs ref:v20.11.0
//! ```
//!
//! A `#` always starts a comment; versions cannot contain one.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod error;
pub mod scope;
pub mod set_ops;
pub mod spec;
pub mod tool_versions;

pub use error::{VersionsError, VersionsResult};
pub use scope::{ResolvedVersions, TOOL_VERSIONS_FILE};
pub use set_ops::{intersect, unique};
pub use spec::{VersionKind, VersionSpec, format_for_filesystem};
pub use tool_versions::ToolVersions;
