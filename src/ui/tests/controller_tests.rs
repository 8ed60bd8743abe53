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

//! Controller tests
//!
//! Test for the MVC Controller logic

use crate::core::{
    ConfirmError, Event, FilterState, Keyring, ListedKey, Mode, Scope, SelectionError, Signer,
};
use crate::ui::controller::NO_SIGNER_LABEL;
use crate::ui::Controller;

/// Helper: Creates a controller over a known keyring
fn create_test_controller() -> Controller {
    let keyring = Keyring::from_listings(
        vec![
            ListedKey::new("AAAA1111", "Alice <a@x.com>"),
            ListedKey::new("BBBB2222", "Bob <b@x.com>"),
            ListedKey::new("AAAA1111", "Alice Duplicate"),
            ListedKey::new("CCCC3333", "Carol <c@x.com>"),
        ],
        vec![ListedKey::new("AAAA1111", "Alice <a@x.com>")],
    );

    Controller::new(keyring)
}

fn visible_ids(controller: &Controller) -> Vec<String> {
    controller
        .visible_keys()
        .into_iter()
        .map(|row| row.record.full_id().to_string())
        .collect()
}

#[test]
fn test_initial_view_shows_deduplicated_keys() {
    let controller = create_test_controller();

    assert_eq!(visible_ids(&controller), vec!["AAAA1111", "BBBB2222", "CCCC3333"]);
    assert_eq!(controller.mode(), Mode::Recipients);
    assert!(controller.visible_keys().iter().all(|row| !row.selected));
}

#[test]
fn test_filter_changes_visible_rows() {
    let controller = create_test_controller();

    controller
        .dispatch(Event::FilterChanged(FilterState::new(Scope::All, "bob")))
        .unwrap();
    assert_eq!(visible_ids(&controller), vec!["BBBB2222"]);

    controller
        .dispatch(Event::FilterChanged(FilterState::new(Scope::Personal, "")))
        .unwrap();
    assert_eq!(visible_ids(&controller), vec!["AAAA1111"]);
    assert_eq!(controller.filter().scope, Scope::Personal);
}

#[test]
fn test_toggle_is_reflected_in_rows() {
    let controller = create_test_controller();

    controller
        .dispatch(Event::KeyToggled("BBBB2222".to_string()))
        .unwrap();

    let rows = controller.visible_keys();
    let bob = rows
        .iter()
        .find(|row| row.record.full_id() == "BBBB2222")
        .unwrap();
    assert!(bob.selected, "Bob's row should be checked");
    assert!(controller.is_selected("BBBB2222"));
}

#[test]
fn test_hidden_selection_survives_filter() {
    let controller = create_test_controller();

    controller
        .dispatch(Event::KeyToggled("CCCC3333".to_string()))
        .unwrap();
    controller
        .dispatch(Event::FilterChanged(FilterState::new(Scope::All, "alice")))
        .unwrap();

    assert_eq!(visible_ids(&controller), vec!["AAAA1111"]);

    let settings = controller.confirm().unwrap();
    assert_eq!(settings.recipients(), ["CCCC3333"]);
}

#[test]
fn test_rejected_event_leaves_state() {
    let controller = create_test_controller();
    let before = controller.state();

    let result = controller.dispatch(Event::SignerChanged(Signer::Key("BBBB2222".to_string())));

    assert_eq!(result, Err(SelectionError::InvalidSigner("BBBB2222".to_string())));
    assert_eq!(controller.state(), before);
}

#[test]
fn test_set_key_selected_follows_check_box() {
    let controller = create_test_controller();

    assert!(controller.set_key_selected("BBBB2222", true));
    assert!(controller.is_selected("BBBB2222"));

    // Already selected: no second toggle
    assert!(controller.set_key_selected("BBBB2222", true));
    assert!(controller.is_selected("BBBB2222"));

    assert!(!controller.set_key_selected("BBBB2222", false));
    assert!(!controller.is_selected("BBBB2222"));
}

#[test]
fn test_set_key_selected_reports_rejected_toggle() {
    let controller = create_test_controller();
    let before = controller.state();

    // The check box must flip back to what the state holds
    assert!(!controller.set_key_selected("DEADBEEF", true));
    assert_eq!(controller.state(), before);
}

#[test]
fn test_signer_options() {
    let controller = create_test_controller();
    let options = controller.signer_options();

    assert_eq!(options.len(), 2);
    assert_eq!(options[0].signer, Signer::None);
    assert_eq!(options[0].label, NO_SIGNER_LABEL);
    assert_eq!(options[1].signer, Signer::Key("AAAA1111".to_string()));
    assert_eq!(options[1].label, "Alice <a@x.com>");
}

#[test]
fn test_confirm_without_recipients_then_retry() {
    let controller = create_test_controller();

    assert_eq!(controller.confirm(), Err(ConfirmError::NoRecipientsSelected));

    controller
        .dispatch(Event::KeyToggled("AAAA1111".to_string()))
        .unwrap();
    controller
        .dispatch(Event::SignerChanged(Signer::Key("AAAA1111".to_string())))
        .unwrap();

    let settings = controller.confirm().unwrap();
    assert_eq!(
        settings.to_string(),
        "MODE=recipients\nRECIPIENTS=AAAA1111\nSIGNER=AAAA1111\n"
    );
}

#[test]
fn test_symmetric_confirm_keeps_signer() {
    let controller = create_test_controller();

    controller
        .dispatch(Event::ModeChanged(Mode::Symmetric))
        .unwrap();
    controller
        .dispatch(Event::SignerChanged(Signer::Key("AAAA1111".to_string())))
        .unwrap();

    let settings = controller.confirm().unwrap();
    assert_eq!(
        settings.to_string(),
        "MODE=symmetric\nRECIPIENTS=\nSIGNER=AAAA1111\n"
    );
}
