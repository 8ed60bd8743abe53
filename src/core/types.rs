//! src/core/types.rs
//!
//! Core type definitions for key selection
//!
//! This module defines the fundamental types used throughout the application:
//! - `KeyKind`: Which keyring a listing came from (public or secret)
//! - `ListedKey`: A raw (key id, user id) pair as emitted by the parser
//! - `KeyRecord`: A deduplicated key as shown in the dialog
//! - `Mode`: Passphrase-only or recipient encryption
//! - `Signer`: The chosen signing key, or none
//!
//! Display implementations produce the exact tokens used by the
//! stdout contract (`symmetric`, `recipients`, `none`).

use std::fmt;

/// Number of trailing characters shown as the short key id
pub const SHORT_ID_LEN: usize = 8;

/// Which keyring to list
///
/// Each kind has its own gpg listing flag and primary-record tag in
/// the colon protocol.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum KeyKind {
    /// `--list-keys`, primary records tagged `pub`
    Public,
    /// `--list-secret-keys`, primary records tagged `sec`
    Secret,
}

impl KeyKind {
    /// Record tag that starts a primary key in `--with-colons` output
    pub fn primary_tag(self) -> &'static str {
        match self {
            KeyKind::Public => "pub",
            KeyKind::Secret => "sec",
        }
    }

    /// gpg flag that lists this kind of key
    pub fn list_flag(self) -> &'static str {
        match self {
            KeyKind::Public => "--list-keys",
            KeyKind::Secret => "--list-secret-keys",
        }
    }
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyKind::Public => write!(f, "public"),
            KeyKind::Secret => write!(f, "secret"),
        }
    }
}

/// A (key id, user id) pair straight out of the parser
///
/// A key with several user ids still produces a single pair, see
/// [`parse_key_listing`](crate::core::parser::parse_key_listing).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ListedKey {
    /// Long key id (field 5 of the primary record)
    pub key_id: String,
    /// User id text (field 10 of the first `uid` record)
    pub uid: String,
}

impl ListedKey {
    pub fn new(key_id: impl Into<String>, uid: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            uid: uid.into(),
        }
    }
}

/// A key as presented for selection
///
/// Records are created once per unique key id while building a
/// [`KeyRegistry`](crate::core::KeyRegistry) and never change afterwards.
/// Whether a key is selected is tracked by the selection state, not here.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KeyRecord {
    full_id: String,
    short_id: String,
    uid: String,
    is_secret: bool,
}

impl KeyRecord {
    /// Creates a record, deriving the short id from the full id
    ///
    /// # Example
    /// ```
    /// use gpg_encrypt_dialog::core::KeyRecord;
    ///
    /// let record = KeyRecord::new("0123456789ABCDEF", "Alice <a@x.com>", false);
    /// assert_eq!(record.short_id(), "89ABCDEF");
    /// ```
    pub fn new(full_id: impl Into<String>, uid: impl Into<String>, is_secret: bool) -> Self {
        let full_id = full_id.into();
        let short_id = short_id_of(&full_id).to_string();

        Self {
            full_id,
            short_id,
            uid: uid.into(),
            is_secret,
        }
    }

    pub fn full_id(&self) -> &str {
        &self.full_id
    }

    pub fn short_id(&self) -> &str {
        &self.short_id
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }

    /// True when the matching secret key is available
    pub fn is_secret(&self) -> bool {
        self.is_secret
    }
}

/// Returns the last eight characters of a key id, or the whole id if shorter
pub fn short_id_of(full_id: &str) -> &str {
    let count = full_id.chars().count();
    if count <= SHORT_ID_LEN {
        return full_id;
    }

    // Key ids are hex in practice, but slice on a char boundary regardless
    let skip = count - SHORT_ID_LEN;
    match full_id.char_indices().nth(skip) {
        Some((offset, _)) => &full_id[offset..],
        None => full_id,
    }
}

/// Encryption mode
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Mode {
    /// Passphrase only, no recipients
    Symmetric,
    /// Encrypt to a set of public keys
    #[default]
    Recipients,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Symmetric => write!(f, "symmetric"),
            Mode::Recipients => write!(f, "recipients"),
        }
    }
}

/// Signing key choice
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum Signer {
    /// Don't sign
    #[default]
    None,
    /// Sign with the secret key of this full id
    Key(String),
}

impl Signer {
    /// Key id of the signer, if any
    pub fn key_id(&self) -> Option<&str> {
        match self {
            Signer::None => None,
            Signer::Key(id) => Some(id),
        }
    }
}

impl fmt::Display for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signer::None => write!(f, "none"),
            Signer::Key(id) => write!(f, "{}", id),
        }
    }
}
