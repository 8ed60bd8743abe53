// Copyright 2025 bakri (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! GnuPG key retrieval
//!
//! # Key Sources
//!
//! The dialog needs two listings: public keys (recipients) and secret
//! keys (signers). Anything implementing [`KeySource`] can provide them.
//! [`GpgCli`] runs the `gpg` executable; tests substitute fixed listings.
//!
//! Retrieval is all-or-nothing: a missing tool, a nonzero exit or
//! malformed output aborts with no partial keys.
//!
//! # Example
//! ```no_run
//! use gpg_encrypt_dialog::gpg::{load_keyring, GpgCli};
//!
//! let keyring = load_keyring(&GpgCli::new("gpg"))?;
//! println!("{} public keys", keyring.public.len());
//! # Ok::<(), gpg_encrypt_dialog::gpg::KeySourceError>(())
//! ```

use std::io;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::{debug, error, info};

use crate::config::Settings;
use crate::core::parser::parse_key_listing;
use crate::core::{KeyKind, Keyring, ListedKey};

/// Key retrieval failures, all fatal for the current invocation
#[derive(Debug, Error)]
pub enum KeySourceError {
    /// The executable does not exist
    #[error("GPG executable not found: {0}")]
    ToolNotFound(PathBuf),

    /// The listing command exited unsuccessfully
    #[error("'{command}' failed with {status}")]
    ExecutionFailed { command: String, status: String },

    /// Anything else: spawn errors, undecodable or malformed output
    #[error("Failed to list {kind} keys: {message}")]
    Unknown { kind: KeyKind, message: String },
}

/// Provides parsed key listings
pub trait KeySource {
    /// Lists keys of one kind as (key id, uid) pairs in listing order
    fn list_keys(&self, kind: KeyKind) -> Result<Vec<ListedKey>, KeySourceError>;
}

/// Key source backed by the `gpg` command line tool
///
/// Runs `gpg [--homedir DIR] --list-keys --with-colons` (or
/// `--list-secret-keys`) with stdin closed and stderr discarded.
#[derive(Clone, Debug)]
pub struct GpgCli {
    /// Program to execute
    program: PathBuf,
    /// Optional GnuPG home directory
    homedir: Option<PathBuf>,
}

impl GpgCli {
    /// Creates a source running `program` with gpg's default home directory
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            homedir: None,
        }
    }

    /// Creates a source from resolved settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            program: settings.gpg_program.clone(),
            homedir: settings.homedir.clone(),
        }
    }

    /// Uses `homedir` instead of gpg's default home directory
    pub fn with_homedir(mut self, homedir: impl Into<PathBuf>) -> Self {
        self.homedir = Some(homedir.into());
        self
    }

    /// Arguments passed to gpg for one listing
    pub fn args(&self, kind: KeyKind) -> Vec<String> {
        let mut args = Vec::new();

        if let Some(homedir) = &self.homedir {
            args.push("--homedir".to_string());
            args.push(homedir.display().to_string());
        }

        args.push(kind.list_flag().to_string());
        args.push("--with-colons".to_string());
        args
    }

    fn command_line(&self, kind: KeyKind) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args(kind));
        parts.join(" ")
    }
}

impl KeySource for GpgCli {
    fn list_keys(&self, kind: KeyKind) -> Result<Vec<ListedKey>, KeySourceError> {
        debug!("Running {}", self.command_line(kind));

        let output = Command::new(&self.program)
            .args(self.args(kind))
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => KeySourceError::ToolNotFound(self.program.clone()),
                _ => KeySourceError::Unknown {
                    kind,
                    message: e.to_string(),
                },
            })?;

        if !output.status.success() {
            return Err(KeySourceError::ExecutionFailed {
                command: self.command_line(kind),
                status: output.status.to_string(),
            });
        }

        let content = String::from_utf8(output.stdout).map_err(|e| KeySourceError::Unknown {
            kind,
            message: format!("output is not valid UTF-8: {}", e),
        })?;

        parse_key_listing(&content, kind).map_err(|e| KeySourceError::Unknown {
            kind,
            message: e.to_string(),
        })
    }
}

/// Retrieves both listings and builds the keyring
///
/// Public keys are listed first, then secret keys. The first failure
/// aborts; the second listing is not attempted.
///
/// # Returns
///
/// * `Ok(Keyring)` - Both listings parsed (either may be empty)
/// * `Err(KeySourceError)` - Either listing failed
pub fn load_keyring(source: &impl KeySource) -> Result<Keyring, KeySourceError> {
    let public = source.list_keys(KeyKind::Public).inspect_err(|e| {
        error!("Public key listing failed: {}", e);
    })?;
    let secret = source.list_keys(KeyKind::Secret).inspect_err(|e| {
        error!("Secret key listing failed: {}", e);
    })?;

    let keyring = Keyring::from_listings(public, secret);
    info!(
        "Loaded {} public and {} secret keys",
        keyring.public.len(),
        keyring.secret.len()
    );

    Ok(keyring)
}

#[cfg(test)]
mod tests;
