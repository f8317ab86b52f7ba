//! Logging setup for asdf.
//!
//! All diagnostics go to stderr so command output on stdout stays clean.
//!
//! # Example
//!
//! ```rust,no_run
//! use asdf_telemetry::{LogConfig, LogFormat, setup_logging};
//!
//! # fn main() -> Result<(), asdf_telemetry::TelemetryError> {
//! let config = LogConfig::new("debug")
//!     .with_format(LogFormat::Compact)
//!     .with_directive("asdf_plugins=trace");
//!
//! setup_logging(&config)?;
//! tracing::info!("ready");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod error;
mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{LogConfig, LogFormat, setup_logging};
