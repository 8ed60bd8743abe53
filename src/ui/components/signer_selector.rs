//! "Sign message as" drop-down

use gtk4::{prelude::*, Box as GtkBox, DropDown, Label, Orientation};
use std::rc::Rc;

use crate::core::Signer;
use crate::ui::controller::SignerOption;

/// Label plus drop-down listing "None" and every secret key
pub struct SignerSelector {
    widget: GtkBox,
    drop_down: DropDown,
    options: Rc<Vec<SignerOption>>,
}

impl SignerSelector {
    /// Creates the selector with the first option ("None") active
    pub fn new(options: Vec<SignerOption>) -> Self {
        let widget = GtkBox::new(Orientation::Horizontal, 8);
        widget.set_margin_top(8);
        widget.set_margin_bottom(8);

        let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
        let drop_down = DropDown::from_strings(&labels);
        drop_down.set_hexpand(true);
        drop_down.set_selected(0);

        widget.append(&Label::new(Some("Sign message as:")));
        widget.append(&drop_down);

        Self {
            widget,
            drop_down,
            options: Rc::new(options),
        }
    }

    pub fn widget(&self) -> &GtkBox {
        &self.widget
    }

    /// Calls `f` with the chosen signer; `f` returns false to reject it
    ///
    /// A rejected choice puts the drop-down back on "None".
    pub fn connect_signer_changed<F: Fn(Signer) -> bool + 'static>(&self, f: F) {
        let options = self.options.clone();

        self.drop_down.connect_selected_notify(move |drop_down| {
            let Some(option) = options.get(drop_down.selected() as usize) else {
                return;
            };

            if !f(option.signer.clone()) {
                drop_down.set_selected(0);
            }
        });
    }
}
