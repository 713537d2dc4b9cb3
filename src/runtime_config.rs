//! # Runtime Configuration Module
//!
//! Environment variable-based configuration for the [`Dispatcher`](crate::dispatcher::Dispatcher).
//!
//! ## Environment Variables
//!
//! ### `GOF_POST_SUFFIX`
//!
//! Append `_post` to the resolved action name of POST requests, so that a
//! controller can register `Login` and `Login_post` separately.
//!
//! Default: `true`
//!
//! ### `GOF_ACTION_CACHE`
//!
//! Keep each controller type's action table after the first dispatch
//! instead of rebuilding it per request.
//!
//! Default: `false`
//!
//! ### `GOF_RECOVER_PANICS`
//!
//! Catch a panicking action and answer `500` with
//! [`DispatchError::ActionPanicked`](crate::dispatcher::DispatchError::ActionPanicked)
//! instead of unwinding into the host.
//!
//! Default: `false`
//!
//! Flags accept `true`/`false`, `1`/`0`, `on`/`off` and `yes`/`no`, in any
//! case. Anything else keeps the default.
//!
//! ## Usage
//!
//! ```rust
//! use gof::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("POST suffix: {}", config.post_suffix);
//! ```

use std::env;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Append `_post` to POST action names in path dispatch (default: true)
    pub post_suffix: bool,
    /// Cache action tables per controller type (default: false)
    pub action_cache: bool,
    /// Report action panics as 500 responses (default: false)
    pub recover_panics: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            post_suffix: true,
            action_cache: false,
            recover_panics: false,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            post_suffix: env_flag("GOF_POST_SUFFIX", defaults.post_suffix),
            action_cache: env_flag("GOF_ACTION_CACHE", defaults.action_cache),
            recover_panics: env_flag("GOF_RECOVER_PANICS", defaults.recover_panics),
        }
    }
}

/// Read a boolean flag, falling back to `default` when unset or invalid.
pub(crate) fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| parse_flag(&v))
        .unwrap_or(default)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
