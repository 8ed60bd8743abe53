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

//! Selection state machine
//!
//! Every user interaction is an [`Event`]. [`DialogState::reduce`] takes
//! the current snapshot and an event and returns the next snapshot, or an
//! error if the event would break an invariant. Rejected events leave the
//! caller's snapshot untouched.
//!
//! # Invariants
//!
//! - Every id in `selected` exists in the public registry
//! - `signer` is `Signer::None` or an id in the secret registry

use std::collections::HashSet;

use thiserror::Error;

use crate::core::filter::FilterState;
use crate::core::registry::Keyring;
use crate::core::types::{Mode, Signer};

/// Rejected events
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    /// Signer is not in the secret keyring
    #[error("Key {0} has no secret key and cannot sign")]
    InvalidSigner(String),
    /// Toggled id is not in the public keyring
    #[error("Unknown key: {0}")]
    UnknownKey(String),
}

/// A discrete user interaction
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Event {
    /// Passphrase/recipients radio changed
    ModeChanged(Mode),
    /// Scope drop-down or search text changed
    FilterChanged(FilterState),
    /// Check box of a key flipped, by full id
    KeyToggled(String),
    /// "Sign message as" changed
    SignerChanged(Signer),
}

/// Mode, per-key selection and signer
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SelectionState {
    pub mode: Mode,
    selected: HashSet<String>,
    pub signer: Signer,
}

impl SelectionState {
    pub fn is_selected(&self, full_id: &str) -> bool {
        self.selected.contains(full_id)
    }

    /// Count of selected keys, including ones hidden by the filter
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }
}

/// Full snapshot of the dialog: filter input plus selection
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DialogState {
    pub filter: FilterState,
    pub selection: SelectionState,
}

impl DialogState {
    /// Initial state: recipients mode, nothing selected, no signer
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one event and returns the next snapshot
    ///
    /// # Arguments
    /// * `event` - The interaction to apply
    /// * `keyring` - Registries the ids are checked against
    ///
    /// # Returns
    /// * `Ok(DialogState)` - The new snapshot
    /// * `Err(SelectionError)` - Event rejected; `self` is still valid
    ///
    /// # Example
    /// ```
    /// use gpg_encrypt_dialog::core::{DialogState, Event, Keyring, ListedKey};
    ///
    /// let keyring = Keyring::from_listings(vec![ListedKey::new("AAAA1111", "Alice")], vec![]);
    /// let state = DialogState::new()
    ///     .reduce(&Event::KeyToggled("AAAA1111".to_string()), &keyring)?;
    /// assert!(state.selection.is_selected("AAAA1111"));
    /// # Ok::<(), gpg_encrypt_dialog::core::SelectionError>(())
    /// ```
    pub fn reduce(&self, event: &Event, keyring: &Keyring) -> Result<DialogState, SelectionError> {
        let mut next = self.clone();

        match event {
            Event::ModeChanged(mode) => {
                // Selection is kept, just not consulted in symmetric mode
                next.selection.mode = *mode;
            }
            Event::FilterChanged(filter) => {
                next.filter = filter.clone();
            }
            Event::KeyToggled(full_id) => {
                if !keyring.public.contains(full_id) {
                    return Err(SelectionError::UnknownKey(full_id.clone()));
                }

                if !next.selection.selected.remove(full_id) {
                    next.selection.selected.insert(full_id.clone());
                }
            }
            Event::SignerChanged(signer) => {
                if let Signer::Key(id) = signer {
                    if !keyring.secret.contains(id) {
                        return Err(SelectionError::InvalidSigner(id.clone()));
                    }
                }
                next.selection.signer = signer.clone();
            }
        }

        Ok(next)
    }
}
