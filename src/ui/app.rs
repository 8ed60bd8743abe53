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

//! GTK4 Application wrapper
//!
//! This module sets up the GTK4 application lifecycle and creates
//! the "Encryption settings" window. It uses the Controller for all
//! state; widgets only forward events and redraw.
//!
//! # Architecture
//!
//! ```text
//! App (GTK4 Application)
//!   ├─ Owns Controller
//!   ├─ Builds main window
//!   ├─ Connects components to Controller
//!   └─ Returns the confirmed settings (or None) when the window closes
//! ```

use gtk4::{
    gdk, gio, prelude::*, AlertDialog, Application, ApplicationWindow, Box as GtkBox, Button,
    EventControllerKey, Orientation, Window,
};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info};

use crate::core::{EncryptionSettings, Event, Keyring, Mode};
use crate::ui::components::{FilterBar, KeyList, ModeSelector, SignerSelector};
use crate::ui::Controller;

const APPLICATION_ID: &str = "io.github.tidynest.GpgEncryptDialog";

/// Shared slot the OK handler fills before closing the window
type Outcome = Rc<RefCell<Option<EncryptionSettings>>>;

/// GTK4 Application for choosing encryption settings
pub struct App {
    /// GTK4 Application instance
    app: Application,
    /// MVC Controller
    controller: Rc<Controller>,
    /// Confirmed settings, if OK was accepted
    outcome: Outcome,
}

impl App {
    /// Creates a new App over an already loaded keyring
    ///
    /// # Example
    ///
    /// ```no_run
    /// use gpg_encrypt_dialog::core::Keyring;
    /// use gpg_encrypt_dialog::ui::App;
    ///
    /// let app = App::new(Keyring::default());
    /// if let Some(settings) = app.run() {
    ///     print!("{}", settings);
    /// }
    /// ```
    pub fn new(keyring: Keyring) -> Self {
        Self {
            app: new_application(),
            controller: Rc::new(Controller::new(keyring)),
            outcome: Rc::new(RefCell::new(None)),
        }
    }

    /// Runs the GTK4 application
    ///
    /// Blocks until the window closes.
    ///
    /// # Returns
    ///
    /// * `Some(EncryptionSettings)` - OK pressed with a valid selection
    /// * `None` - Cancelled, closed, or GTK could not start
    pub fn run(self) -> Option<EncryptionSettings> {
        let controller = self.controller.clone();
        let outcome = self.outcome.clone();

        // Connect activate signal (called when app starts)
        self.app.connect_activate(move |app| {
            Self::build_ui(app, controller.clone(), outcome.clone());
        });

        // Run the application (blocks until exit)
        self.app.run_with_args::<&str>(&[]);

        self.outcome.borrow_mut().take()
    }

    /// Shows a standalone error alert and blocks until it is dismissed
    ///
    /// Used when the keys can't be loaded and there is no dialog to
    /// attach the message to.
    pub fn show_error(message: &str, detail: &str) {
        let app = new_application();
        let message = message.to_string();
        let detail = detail.to_string();

        app.connect_activate(move |app| {
            // No window exists, so hold the application until dismissed
            let guard = app.hold();

            let alert = AlertDialog::builder()
                .message(message.as_str())
                .detail(detail.as_str())
                .modal(true)
                .build();

            alert.choose(None::<&Window>, None::<&gio::Cancellable>, move |_| {
                drop(guard);
            });
        });

        app.run_with_args::<&str>(&[]);
    }

    /// Builds the main window UI
    ///
    /// This is called when the application activates. It creates
    /// the window and all components.
    fn build_ui(app: &Application, controller: Rc<Controller>, outcome: Outcome) {
        let window = ApplicationWindow::builder()
            .application(app)
            .title("Encryption settings")
            .icon_name("dialog-password")
            .default_width(520)
            .default_height(400)
            .resizable(true)
            .build();

        let content = GtkBox::builder()
            .orientation(Orientation::Vertical)
            .spacing(8)
            .margin_start(12)
            .margin_end(12)
            .margin_top(8)
            .margin_bottom(4)
            .build();

        // ========================================================================
        // Mode radio buttons
        // ========================================================================
        let mode_selector = ModeSelector::new();
        content.append(mode_selector.widget());

        // ========================================================================
        // Recipient area: filter row + key list
        // ========================================================================
        let recipient_box = GtkBox::new(Orientation::Vertical, 6);
        recipient_box.set_vexpand(true);

        let filter_bar = FilterBar::new();
        recipient_box.append(filter_bar.widget());

        let key_list = Rc::new(KeyList::new(controller.clone()));
        key_list.refresh();
        recipient_box.append(key_list.widget());

        content.append(&recipient_box);

        // ========================================================================
        // Sign message as
        // ========================================================================
        let signer_selector = SignerSelector::new(controller.signer_options());
        content.append(signer_selector.widget());

        // ========================================================================
        // Cancel / OK
        // ========================================================================
        let button_box = GtkBox::builder()
            .orientation(Orientation::Horizontal)
            .spacing(12)
            .halign(gtk4::Align::End)
            .margin_bottom(8)
            .build();

        let cancel_button = Button::builder().label("Cancel").build();
        let ok_button = Button::builder().label("OK").build();
        ok_button.add_css_class("suggested-action");

        button_box.append(&cancel_button);
        button_box.append(&ok_button);
        content.append(&button_box);

        // ========================================================================
        // Event wiring
        // ========================================================================
        let controller_for_mode = controller.clone();
        let recipient_box_for_mode = recipient_box.clone();
        mode_selector.connect_mode_changed(move |mode| {
            debug!("Mode: {}", mode);
            let accepted = controller_for_mode
                .dispatch(Event::ModeChanged(mode))
                .is_ok();
            recipient_box_for_mode.set_sensitive(controller_for_mode.mode() == Mode::Recipients);
            accepted
        });

        let controller_for_filter = controller.clone();
        let key_list_for_filter = key_list.clone();
        filter_bar.connect_changed(move |filter| {
            debug!("🔍 Filter: {:?} '{}'", filter.scope, filter.search_text);
            if controller_for_filter
                .dispatch(Event::FilterChanged(filter))
                .is_ok()
            {
                key_list_for_filter.refresh();
            }
        });

        let controller_for_signer = controller.clone();
        signer_selector.connect_signer_changed(move |signer| {
            controller_for_signer
                .dispatch(Event::SignerChanged(signer))
                .is_ok()
        });

        let window_for_cancel = window.clone();
        cancel_button.connect_clicked(move |_| {
            info!("Cancelled");
            window_for_cancel.close();
        });

        let window_for_ok = window.clone();
        ok_button.connect_clicked(move |_| match controller.confirm() {
            Ok(settings) => {
                *outcome.borrow_mut() = Some(settings);
                window_for_ok.close();
            }
            Err(e) => {
                // Recoverable: keep the dialog open for another try
                let alert = AlertDialog::builder()
                    .message(e.to_string().as_str())
                    .modal(true)
                    .build();
                alert.show(Some(&window_for_ok));
            }
        });

        // Escape cancels, like a regular dialog
        let key_controller = EventControllerKey::new();
        let window_for_keys = window.clone();
        key_controller.connect_key_pressed(move |_controller, key, _code, _modifier| {
            if key == gdk::Key::Escape {
                window_for_keys.close();
                glib::Propagation::Stop
            } else {
                glib::Propagation::Proceed
            }
        });
        window.add_controller(key_controller);

        window.set_child(Some(&content));
        window.set_default_widget(Some(&ok_button));
        window.present();
    }
}

fn new_application() -> Application {
    Application::builder()
        .application_id(APPLICATION_ID)
        .flags(gio::ApplicationFlags::NON_UNIQUE)
        .build()
}
