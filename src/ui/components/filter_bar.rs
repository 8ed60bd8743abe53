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

//! Filter bar component
//!
//! Scope drop-down ("All Keys" / "Personal Keys") plus a search entry.
//! Provides real-time filtering of the key list as the user types.

use gtk4::{prelude::*, Box as GtkBox, DropDown, Label, Orientation, SearchEntry};
use std::rc::Rc;

use crate::core::{FilterState, Scope};

/// Scope selector and search entry for filtering keys
pub struct FilterBar {
    /// Root widget (horizontal box)
    widget: GtkBox,
    scope_drop_down: DropDown,
    search_entry: SearchEntry,
}

impl Default for FilterBar {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterBar {
    /// Creates a new filter bar
    ///
    /// Returns just the widgets - parent is responsible for wiring
    /// up the filter to the Controller.
    ///
    /// # Example
    /// ```no_run
    /// use gpg_encrypt_dialog::ui::components::FilterBar;
    ///
    /// let filter_bar = FilterBar::new();
    ///
    /// // Parent wires up filtering:
    /// filter_bar.connect_changed(move |filter| {
    ///     // ... dispatch Event::FilterChanged(filter)
    /// });
    /// ```
    pub fn new() -> Self {
        let widget = GtkBox::new(Orientation::Horizontal, 8);

        let scope_drop_down =
            DropDown::from_strings(&[Scope::All.label(), Scope::Personal.label()]);
        scope_drop_down.set_selected(0);

        let search_label = Label::new(Some("Search for:"));

        let search_entry = SearchEntry::builder()
            .placeholder_text("Name or key ID")
            .hexpand(true)
            .build();

        widget.append(&scope_drop_down);
        widget.append(&search_label);
        widget.append(&search_entry);

        Self {
            widget,
            scope_drop_down,
            search_entry,
        }
    }

    /// Returns the root widget for adding to parent container
    pub fn widget(&self) -> &GtkBox {
        &self.widget
    }

    /// Calls `f` with the new filter whenever scope or search text changes
    pub fn connect_changed<F: Fn(FilterState) + 'static>(&self, f: F) {
        let f = Rc::new(f);

        let search_entry = self.search_entry.clone();
        let on_scope = f.clone();
        self.scope_drop_down.connect_selected_notify(move |scope| {
            on_scope(current_filter(scope, &search_entry));
        });

        let scope_drop_down = self.scope_drop_down.clone();
        self.search_entry.connect_search_changed(move |entry| {
            f(current_filter(&scope_drop_down, entry));
        });
    }
}

fn current_filter(scope: &DropDown, search: &SearchEntry) -> FilterState {
    FilterState::new(Scope::from_index(scope.selected()), search.text().to_string())
}
