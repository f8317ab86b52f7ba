//! Layered configuration for asdf.
//!
//! # Load order
//!
//! 1. Embedded `defaults.toml`
//! 2. `$ASDF_CONFIG_FILE`, or `~/.asdf/config.toml`
//! 3. Environment overrides: `ASDF_DATA_DIR`, `ASDF_DEFAULT_LATEST_QUERY`,
//!    `ASDF_LOG`
//! 4. `~` expansion of `data_dir`, then validation
//!
//! Later layers win. Tables merge key by key, so a user file that sets one
//! hook keeps the defaults for everything else.
//!
//! # Example
//!
//! ```rust,ignore
//! use asdf_config::Config;
//!
//! let resolved = Config::load(None)?;
//! println!("data dir: {}", resolved.config.data_dir.display());
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod env;
pub mod error;
pub mod loader;
pub mod merge;
pub mod types;
pub mod validate;

pub use error::{ConfigError, ConfigResult};
pub use loader::ResolvedConfig;
pub use types::{Config, LoggingSection};

impl Config {
    /// Load the layered configuration.
    ///
    /// `home_override` replaces the user's home directory for file
    /// discovery and `~` expansion.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a config file is malformed or the merged
    /// configuration fails validation.
    pub fn load(home_override: Option<&std::path::Path>) -> ConfigResult<ResolvedConfig> {
        loader::load(home_override)
    }
}
