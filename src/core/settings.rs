// Copyright 2025 Eric Jingryd (tidynest@proton.me)
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

//! Final encryption settings and the stdout contract
//!
//! The calling script reads exactly three lines:
//!
//! ```text
//! MODE=symmetric|recipients
//! RECIPIENTS=<comma-joined full ids, empty if none>
//! SIGNER=<full id>|none
//! ```

use std::fmt;

use thiserror::Error;

use crate::core::registry::Keyring;
use crate::core::selection::SelectionState;
use crate::core::types::{Mode, Signer};

/// Reasons a confirmation is refused
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfirmError {
    #[error("No recipients selected.")]
    NoRecipientsSelected,
}

/// The confirmed choice, produced once and never mutated
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EncryptionSettings {
    mode: Mode,
    recipients: Vec<String>,
    signer: Signer,
}

impl EncryptionSettings {
    /// Passphrase-only, no recipients, no signer
    ///
    /// Used when there are no keys at all to choose from.
    pub fn symmetric() -> Self {
        Self {
            mode: Mode::Symmetric,
            recipients: Vec::new(),
            signer: Signer::None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Recipient full ids in registry order
    pub fn recipients(&self) -> &[String] {
        &self.recipients
    }

    pub fn signer(&self) -> &Signer {
        &self.signer
    }

    /// The three contract lines, without trailing newlines
    pub fn contract_lines(&self) -> [String; 3] {
        [
            format!("MODE={}", self.mode),
            format!("RECIPIENTS={}", self.recipients.join(",")),
            format!("SIGNER={}", self.signer),
        ]
    }
}

impl fmt::Display for EncryptionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.contract_lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Turns the final selection into settings
///
/// # Arguments
/// * `keyring` - Registries the selection refers to
/// * `selection` - State at the moment OK was pressed
///
/// # Returns
/// * `Ok(EncryptionSettings)` - Confirmation accepted
/// * `Err(ConfirmError::NoRecipientsSelected)` - Recipients mode with an
///   empty selection; the caller keeps its state and may retry
///
/// # Example
/// ```
/// use gpg_encrypt_dialog::core::{assemble, Keyring, SelectionState, Mode};
///
/// // No keys at all: passphrase-only regardless of state
/// let settings = assemble(&Keyring::default(), &SelectionState::default())?;
/// assert_eq!(settings.mode(), Mode::Symmetric);
/// # Ok::<(), gpg_encrypt_dialog::core::ConfirmError>(())
/// ```
pub fn assemble(
    keyring: &Keyring,
    selection: &SelectionState,
) -> Result<EncryptionSettings, ConfirmError> {
    if keyring.is_empty() {
        return Ok(EncryptionSettings::symmetric());
    }

    // Registry order, not click order
    let recipients: Vec<String> = keyring
        .public
        .iter()
        .filter(|record| selection.is_selected(record.full_id()))
        .map(|record| record.full_id().to_string())
        .collect();

    if selection.mode == Mode::Recipients && recipients.is_empty() {
        return Err(ConfirmError::NoRecipientsSelected);
    }

    Ok(EncryptionSettings {
        mode: selection.mode,
        recipients,
        signer: selection.signer.clone(),
    })
}
