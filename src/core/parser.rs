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

//! src/core/parser.rs
//!
//! GnuPG colon-listing parser
//!
//! This module parses the machine-readable output of
//! `gpg --list-keys --with-colons` (and `--list-secret-keys`).
//! Every line is one record; fields are separated by `:`. It handles:
//! - Primary key records (`pub` or `sec`, depending on the listing)
//! - User id records (`uid`)
//! - Everything else (`sub`, `ssb`, `fpr`, `grp`, `tru`, ...) is skipped
//!
//! # Architecture
//! The parser uses nom combinators to split a record into fields, then
//! runs a single sequential pass with one piece of state: the id of the
//! primary key still waiting for its user id.
//!
//! # First user id wins
//! The pending id is cleared as soon as a `uid` record is paired with it,
//! so keys with several user ids yield exactly one pair. Downstream
//! consumers rely on this deterministic single-uid selection.

use nom::{
    bytes::complete::take_while, character::complete::char, error::Error,
    multi::separated_list0, Parser,
};
use thiserror::Error;

use crate::core::types::{KeyKind, ListedKey};

/// Field index of the key id in a primary record
pub const KEY_ID_FIELD: usize = 4;

/// Field index of the user id text in a `uid` record
pub const UID_FIELD: usize = 9;

/// Record tag for user ids
pub const UID_TAG: &str = "uid";

/// Parse errors with line number context
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Malformed '{record}' record on line {line}: missing field {field}")]
    MissingField {
        line: usize,
        record: String,
        field: usize,
    },
}

/// Parse a complete colon listing
///
/// # Arguments
/// * `content` - The listing output as a string
/// * `kind` - Which listing this is; selects the primary record tag
///
/// # Returns
/// The (key id, uid) pairs in listing order, possibly empty, or a
/// ParseError if a relevant record is truncated. No partial results
/// are returned on failure.
///
/// # Example
/// ```
/// use gpg_encrypt_dialog::core::{parser::parse_key_listing, KeyKind};
///
/// let listing = "pub:u:255:22:AAAA1111:::::::\nuid:u::::::::Alice <a@x.com>:\n";
/// let keys = parse_key_listing(listing, KeyKind::Public)?;
/// assert_eq!(keys[0].key_id, "AAAA1111");
/// assert_eq!(keys[0].uid, "Alice <a@x.com>");
/// # Ok::<(), gpg_encrypt_dialog::core::parser::ParseError>(())
/// ```
pub fn parse_key_listing(content: &str, kind: KeyKind) -> Result<Vec<ListedKey>, ParseError> {
    let primary_tag = kind.primary_tag();

    let mut keys = Vec::new();
    let mut pending: Option<String> = None;

    for (line_num, line) in content.lines().enumerate() {
        let line_num = line_num + 1; // Human-readable numbers start at 1

        let fields = parse_record(line);
        let tag = fields.first().copied().unwrap_or_default();

        if tag == primary_tag {
            let key_id = field(&fields, KEY_ID_FIELD, line_num)?;
            // An empty id leaves nothing to pair a uid with
            pending = (!key_id.is_empty()).then(|| key_id.to_string());
        } else if tag == UID_TAG {
            if let Some(key_id) = pending.take() {
                let uid = field(&fields, UID_FIELD, line_num)?;
                keys.push(ListedKey::new(key_id, uid));
            }
        }
    }

    Ok(keys)
}

/// Split one record into its fields
///
/// Empty fields are kept, so `"a::b"` yields `["a", "", "b"]` and an
/// empty line yields a single empty field. Every input splits, since a
/// field may be empty and `:` always starts the next one.
pub fn parse_record(input: &str) -> Vec<&str> {
    separated_list0(char::<&str, Error<&str>>(':'), take_while(|c: char| c != ':'))
        .parse(input)
        .map(|(_, fields)| fields)
        .unwrap_or_default()
}

fn field<'a>(fields: &[&'a str], index: usize, line_num: usize) -> Result<&'a str, ParseError> {
    fields
        .get(index)
        .copied()
        .ok_or_else(|| ParseError::MissingField {
            line: line_num,
            record: fields.first().copied().unwrap_or_default().to_string(),
            field: index,
        })
}
