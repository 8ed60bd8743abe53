//! Runtime settings.
//!
//! Nothing is persisted between invocations; settings come from command
//! line flags and their environment fallbacks only:
//!
//! - **gpg program**: `--gpg` / `GPG_ENCRYPT_DIALOG_GPG`, default `gpg`
//! - **GnuPG home**: `--homedir`, default is whatever gpg itself uses
//!
//! Both accept `~` and `$VAR` references, expanded here.
//!
//! # Example
//!
//! ```
//! use gpg_encrypt_dialog::config::Settings;
//!
//! let settings = Settings::resolve("gpg", None)?;
//! assert_eq!(settings.gpg_program.to_str(), Some("gpg"));
//! # Ok::<(), gpg_encrypt_dialog::config::ConfigError>(())
//! ```

mod error;

use std::path::PathBuf;

pub use error::ConfigError;

/// Default gpg executable, looked up on `PATH`
pub const DEFAULT_GPG_PROGRAM: &str = "gpg";

/// Environment variable overriding the gpg executable
pub const GPG_PROGRAM_ENV: &str = "GPG_ENCRYPT_DIALOG_GPG";

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "GPG_ENCRYPT_DIALOG_LOG";

/// Resolved settings for one invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Executable used for key listings.
    pub gpg_program: PathBuf,
    /// GnuPG home directory passed as `--homedir`, if any.
    pub homedir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gpg_program: PathBuf::from(DEFAULT_GPG_PROGRAM),
            homedir: None,
        }
    }
}

impl Settings {
    /// Builds settings from raw option values, expanding `~` and `$VAR`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::EmptyValue` for empty strings and
    /// `ConfigError::InvalidPath` when a referenced variable is unset.
    pub fn resolve(gpg_program: &str, homedir: Option<&str>) -> Result<Self, ConfigError> {
        let gpg_program = expand("--gpg", gpg_program)?;
        let homedir = homedir.map(|dir| expand("--homedir", dir)).transpose()?;

        Ok(Self {
            gpg_program,
            homedir,
        })
    }
}

fn expand(option: &'static str, value: &str) -> Result<PathBuf, ConfigError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ConfigError::EmptyValue(option));
    }

    let expanded = shellexpand::full(value).map_err(|e| ConfigError::InvalidPath {
        path: value.to_string(),
        reason: e.to_string(),
    })?;

    Ok(PathBuf::from(expanded.as_ref()))
}
