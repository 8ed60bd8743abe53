//! MVC Controller - Mediates between Model (Keyring, DialogState) and View (GTK4 components)
//!
//! # Responsibilities
//!
//! - Hold the read-only keyring
//! - Apply user events to the current state snapshot
//! - Provide filtered rows and signer options to the View
//! - Assemble the final settings on confirmation
//!
//! # Architecture
//!
//! The Controller owns the Model but doesn't know about GTK4 widgets.
//! Widgets send [`Event`]s through [`Controller::dispatch`] and re-read
//! what they display afterwards; they never mutate state themselves.

use std::cell::RefCell;

use tracing::{debug, warn};

use crate::core::filter::visible_records;
use crate::core::{
    assemble, ConfirmError, DialogState, EncryptionSettings, Event, FilterState, KeyRecord,
    Keyring, Mode, SelectionError, Signer,
};

/// One visible line of the key list
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyRow {
    pub record: KeyRecord,
    pub selected: bool,
}

/// One entry of the "Sign message as" drop-down
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignerOption {
    pub signer: Signer,
    pub label: String,
}

/// Label of the "don't sign" entry
pub const NO_SIGNER_LABEL: &str = "None (Don't Sign)";

/// MVC Controller coordinating Model and View
pub struct Controller {
    /// Public and secret registries (never modified)
    keyring: Keyring,
    /// Current snapshot, replaced on every accepted event
    state: RefCell<DialogState>,
}

impl Controller {
    /// Creates a new Controller over a loaded keyring
    ///
    /// # Example
    ///
    /// ```
    /// use gpg_encrypt_dialog::core::{Keyring, ListedKey};
    /// use gpg_encrypt_dialog::ui::Controller;
    ///
    /// let keyring = Keyring::from_listings(vec![ListedKey::new("AAAA1111", "Alice")], vec![]);
    /// let controller = Controller::new(keyring);
    /// assert_eq!(controller.visible_keys().len(), 1);
    /// ```
    pub fn new(keyring: Keyring) -> Self {
        Self {
            keyring,
            state: RefCell::new(DialogState::new()),
        }
    }

    pub fn keyring(&self) -> &Keyring {
        &self.keyring
    }

    /// Applies one event to the current state
    ///
    /// # Returns
    ///
    /// * `Ok(())` - State replaced by the next snapshot
    /// * `Err(SelectionError)` - Event rejected, state unchanged
    pub fn dispatch(&self, event: Event) -> Result<(), SelectionError> {
        let next = self.state.borrow().reduce(&event, &self.keyring);

        match next {
            Ok(state) => {
                debug!("Applied {:?}", event);
                *self.state.borrow_mut() = state;
                Ok(())
            }
            Err(e) => {
                warn!("Rejected {:?}: {}", event, e);
                Err(e)
            }
        }
    }

    /// Brings one key's selection in line with a check box
    ///
    /// Dispatches `KeyToggled` only when the state differs from `selected`.
    /// Returns the resulting selection, which the widget should show: it
    /// stays at the old value when the toggle is rejected.
    pub fn set_key_selected(&self, full_id: &str, selected: bool) -> bool {
        if self.is_selected(full_id) != selected {
            // Rejections are logged by dispatch
            let _ = self.dispatch(Event::KeyToggled(full_id.to_string()));
        }

        self.is_selected(full_id)
    }

    /// Returns a copy of the current snapshot
    pub fn state(&self) -> DialogState {
        self.state.borrow().clone()
    }

    pub fn mode(&self) -> Mode {
        self.state.borrow().selection.mode
    }

    pub fn filter(&self) -> FilterState {
        self.state.borrow().filter.clone()
    }

    pub fn is_selected(&self, full_id: &str) -> bool {
        self.state.borrow().selection.is_selected(full_id)
    }

    /// Rows matching the current filter, in registry order
    pub fn visible_keys(&self) -> Vec<KeyRow> {
        let state = self.state.borrow();

        visible_records(&self.keyring.public, &state.filter, self.keyring.secret_ids())
            .into_iter()
            .map(|record| KeyRow {
                record: record.clone(),
                selected: state.selection.is_selected(record.full_id()),
            })
            .collect()
    }

    /// Signer choices: "None" first, then secret keys in registry order
    pub fn signer_options(&self) -> Vec<SignerOption> {
        let mut options = vec![SignerOption {
            signer: Signer::None,
            label: NO_SIGNER_LABEL.to_string(),
        }];

        options.extend(self.keyring.secret.iter().map(|record| SignerOption {
            signer: Signer::Key(record.full_id().to_string()),
            label: record.uid().to_string(),
        }));

        options
    }

    /// Assembles settings from the current state
    ///
    /// A rejected confirmation leaves the state as it was, so the user
    /// can adjust the selection and try again.
    pub fn confirm(&self) -> Result<EncryptionSettings, ConfirmError> {
        let state = self.state.borrow();
        let result = assemble(&self.keyring, &state.selection);

        match &result {
            Ok(settings) => debug!("Confirmed: {:?}", settings),
            Err(e) => warn!("Confirmation rejected: {}", e),
        }

        result
    }
}
