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

//! Key list filtering
//!
//! A pure visibility predicate over registry records. The registry is
//! never reordered or mutated; the view simply asks again after every
//! filter change.

use std::collections::HashSet;

use crate::core::registry::KeyRegistry;
use crate::core::types::KeyRecord;

/// Which keys the list offers
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Scope {
    /// "All Keys"
    #[default]
    All,
    /// "Personal Keys": only keys with a secret counterpart
    Personal,
}

impl Scope {
    /// Scope for a position in the scope drop-down
    pub fn from_index(index: u32) -> Self {
        match index {
            1 => Scope::Personal,
            _ => Scope::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Scope::All => "All Keys",
            Scope::Personal => "Personal Keys",
        }
    }
}

/// Current filter input
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FilterState {
    pub scope: Scope,
    pub search_text: String,
}

impl FilterState {
    pub fn new(scope: Scope, search_text: impl Into<String>) -> Self {
        Self {
            scope,
            search_text: search_text.into(),
        }
    }
}

/// Decides whether a record is shown under the given filter
///
/// The scope check runs first and short-circuits. The search text is
/// trimmed and matched case-insensitively against the uid and full id;
/// empty search text matches everything.
///
/// # Example
/// ```
/// use gpg_encrypt_dialog::core::{filter::{is_visible, FilterState, Scope}, KeyRecord};
/// use std::collections::HashSet;
///
/// let alice = KeyRecord::new("AAAA1111", "Alice <a@x.com>", false);
/// let filter = FilterState::new(Scope::All, "alice");
/// assert!(is_visible(&alice, &filter, &HashSet::new()));
/// ```
pub fn is_visible(record: &KeyRecord, filter: &FilterState, secret_ids: &HashSet<String>) -> bool {
    if filter.scope == Scope::Personal && !secret_ids.contains(record.full_id()) {
        return false;
    }

    let query = filter.search_text.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }

    record.uid().to_lowercase().contains(&query)
        || record.full_id().to_lowercase().contains(&query)
}

/// Visible records in registry order
pub fn visible_records<'a>(
    registry: &'a KeyRegistry,
    filter: &FilterState,
    secret_ids: &HashSet<String>,
) -> Vec<&'a KeyRecord> {
    registry
        .iter()
        .filter(|record| is_visible(record, filter, secret_ids))
        .collect()
}
