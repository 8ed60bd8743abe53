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

//! Key list component
//!
//! Displays the keys matching the current filter in a scrollable list.
//! Each row shows a check box, the user id and the short key id.

use gtk4::{
    pango::EllipsizeMode, prelude::*, Box as GtkBox, CheckButton, Label, ListBox, Orientation,
    ScrolledWindow,
};
use std::rc::Rc;

use crate::ui::controller::KeyRow;
use crate::ui::Controller;

/// Width of the key id column in characters
const KEY_ID_WIDTH: i32 = 10;

/// Displays a scrollable list of keys with recipient check boxes
pub struct KeyList {
    /// Root widget (column headers + scrollable list)
    widget: GtkBox,
    /// List box containing rows
    list_box: ListBox,
    /// Controller reference for data access
    controller: Rc<Controller>,
}

impl KeyList {
    /// Creates a new, empty key list
    ///
    /// # Arguments
    /// * `controller` - Shared Controller reference
    ///
    /// Call [`refresh`](Self::refresh) to fill it.
    pub fn new(controller: Rc<Controller>) -> Self {
        let widget = GtkBox::new(Orientation::Vertical, 4);
        widget.set_vexpand(true);

        // Column headers
        let header = GtkBox::builder()
            .orientation(Orientation::Horizontal)
            .spacing(12)
            .margin_start(36)
            .margin_end(10)
            .build();
        header.append(&Label::builder().label("Name").xalign(0.0).hexpand(true).build());
        header.append(
            &Label::builder()
                .label("Key ID")
                .width_chars(KEY_ID_WIDTH)
                .xalign(0.0)
                .build(),
        );
        widget.append(&header);

        let scrolled_window = ScrolledWindow::builder()
            .hexpand(true)
            .vexpand(true)
            .has_frame(true)
            .build();

        let list_box = ListBox::builder()
            .selection_mode(gtk4::SelectionMode::Single)
            .build();

        scrolled_window.set_child(Some(&list_box));
        widget.append(&scrolled_window);

        Self {
            widget,
            list_box,
            controller,
        }
    }

    /// Rebuilds the rows from the Controller's current filter
    pub fn refresh(&self) {
        // Clear existing rows
        while let Some(child) = self.list_box.first_child() {
            self.list_box.remove(&child);
        }

        for row in self.controller.visible_keys() {
            self.list_box.append(&self.create_row(&row));
        }
    }

    /// Create a single row widget for a key
    fn create_row(&self, row: &KeyRow) -> GtkBox {
        let row_box = GtkBox::builder()
            .orientation(Orientation::Horizontal)
            .spacing(12)
            .margin_start(6)
            .margin_end(10)
            .margin_top(3)
            .margin_bottom(3)
            .build();

        // State is set before connecting so building a row dispatches nothing
        let check = CheckButton::builder().active(row.selected).build();
        let controller = self.controller.clone();
        let full_id = row.record.full_id().to_string();
        check.connect_toggled(move |check| {
            let selected = controller.set_key_selected(&full_id, check.is_active());
            if selected != check.is_active() {
                check.set_active(selected);
            }
        });

        let name_label = Label::builder()
            .label(row.record.uid())
            .xalign(0.0)
            .hexpand(true)
            .ellipsize(EllipsizeMode::End)
            .tooltip_text(row.record.uid())
            .build();

        let id_label = Label::builder()
            .label(row.record.short_id())
            .width_chars(KEY_ID_WIDTH)
            .xalign(0.0)
            .tooltip_text(row.record.full_id())
            .build();

        row_box.append(&check);
        row_box.append(&name_label);
        row_box.append(&id_label);

        row_box
    }

    /// Returns the root widget for adding to parent container
    pub fn widget(&self) -> &GtkBox {
        &self.widget
    }
}
