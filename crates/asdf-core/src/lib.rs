//! asdf Core - shared types for the asdf tool version manager.
//!
//! This crate holds the pieces every other asdf crate agrees on:
//!
//! - [`DataDir`]: the on-disk layout of plugins, downloads, installs and
//!   install locks under the asdf data directory.
//!
//! It has no dependencies on other asdf crates.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod dirs;

pub use dirs::DataDir;
