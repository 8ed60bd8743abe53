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

//! GPG Encryption Settings Dialog
//!
//! Lets the user choose passphrase-only encryption or a set of recipient
//! keys, plus an optional signing key, and reports the choice to the
//! calling script on stdout.
//!
//! # Output
//!
//! ```text
//! MODE=symmetric|recipients
//! RECIPIENTS=keyid1,keyid2,...
//! SIGNER=keyid|none
//! ```
//!
//! The process exits 0 when settings were confirmed and 1 on cancel or
//! any failure. Nothing is printed unless settings were confirmed.
//!
//! # Architecture
//!
//! - **`core`:** Business logic (colon parser, registries, filter, selection state, settings)
//! - **`gpg`:** Running `gpg` to list public and secret keys
//! - **`config`:** Runtime settings (gpg program, home directory)
//! - **`ui`:** Controller and GTK4 dialog (MVC pattern)
//!
//! # Examples
//!
//! ## Parsing a key listing
//!
//! ```
//! use gpg_encrypt_dialog::core::{parser::parse_key_listing, KeyKind};
//!
//! let listing = "pub:u:255:22:AAAA1111:::::::\nuid:u::::::::Alice <a@x.com>:\n";
//! let keys = parse_key_listing(listing, KeyKind::Public)?;
//! println!("Found {} keys", keys.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Selecting without a dialog
//!
//! ```
//! use gpg_encrypt_dialog::core::{Event, Keyring, ListedKey};
//! use gpg_encrypt_dialog::ui::Controller;
//!
//! let keyring = Keyring::from_listings(vec![ListedKey::new("AAAA1111", "Alice")], vec![]);
//! let controller = Controller::new(keyring);
//! controller.dispatch(Event::KeyToggled("AAAA1111".to_string()))?;
//!
//! let settings = controller.confirm()?;
//! assert_eq!(settings.to_string(), "MODE=recipients\nRECIPIENTS=AAAA1111\nSIGNER=none\n");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod config;
pub mod core;
pub mod gpg;
pub mod ui;

// Re-export commonly used types for convenience
pub use crate::core::{EncryptionSettings, KeyRecord, Keyring, Mode, Signer};
