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

//! Encryption mode radio pair
//!
//! "Use passphrase only" versus "Choose a set of recipients:".

use gtk4::{prelude::*, Box as GtkBox, CheckButton, Orientation};

use crate::core::Mode;

/// Radio buttons selecting the encryption mode
pub struct ModeSelector {
    /// Root widget (vertical box)
    widget: GtkBox,
    passphrase_button: CheckButton,
    recipients_button: CheckButton,
}

impl Default for ModeSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl ModeSelector {
    /// Creates the radio pair with "recipients" active
    pub fn new() -> Self {
        let widget = GtkBox::new(Orientation::Vertical, 4);

        let passphrase_button = CheckButton::with_label("Use passphrase only");
        let recipients_button = CheckButton::with_label("Choose a set of recipients:");
        recipients_button.set_group(Some(&passphrase_button));
        recipients_button.set_active(true);

        widget.append(&passphrase_button);
        widget.append(&recipients_button);

        Self {
            widget,
            passphrase_button,
            recipients_button,
        }
    }

    /// Returns the root widget for adding to parent container
    pub fn widget(&self) -> &GtkBox {
        &self.widget
    }

    /// Calls `f` with the new mode whenever the selection flips; `f`
    /// returns false to reject it
    ///
    /// Only the recipients button is watched: in a group both buttons
    /// emit `toggled`, which would report every change twice. A rejected
    /// mode puts the radio pair back on the previous choice.
    pub fn connect_mode_changed<F: Fn(Mode) -> bool + 'static>(&self, f: F) {
        let passphrase_button = self.passphrase_button.clone();

        self.recipients_button.connect_toggled(move |button| {
            let mode = if button.is_active() {
                Mode::Recipients
            } else {
                Mode::Symmetric
            };

            if !f(mode) {
                match mode {
                    Mode::Recipients => passphrase_button.set_active(true),
                    Mode::Symmetric => button.set_active(true),
                }
            }
        });
    }
}
