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

//! Key registry
//!
//! Deduplicates parsed listings into ordered, read-only key records.
//!
//! # Ordering
//!
//! Records keep the position at which their id was first seen. Later
//! pairs for an id already present are dropped, including their uid.
//! An index from full id to position gives O(1) lookup.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::core::types::{KeyRecord, ListedKey};

/// Lookup failures for a user-supplied key id
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("No key matches '{0}'")]
    NotFound(String),

    /// Several records share the queried short id
    #[error("'{query}' matches more than one key: {}", matches.join(", "))]
    Ambiguous { query: String, matches: Vec<String> },
}

/// Ordered set of key records, unique by full id
#[derive(Clone, Debug, Default)]
pub struct KeyRegistry {
    records: Vec<KeyRecord>,
    index: HashMap<String, usize>,
}

impl KeyRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from parser output
    ///
    /// # Arguments
    /// * `keys` - Parsed pairs in listing order
    /// * `secret_ids` - Ids with an available secret key; sets `is_secret`
    pub fn from_listing(keys: Vec<ListedKey>, secret_ids: &HashSet<String>) -> Self {
        let mut registry = Self::new();

        for key in keys {
            if registry.index.contains_key(&key.key_id) {
                continue;
            }

            let is_secret = secret_ids.contains(&key.key_id);
            registry
                .index
                .insert(key.key_id.clone(), registry.records.len());
            registry
                .records
                .push(KeyRecord::new(key.key_id, key.uid, is_secret));
        }

        registry
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeyRecord> {
        self.records.iter()
    }

    pub fn get(&self, full_id: &str) -> Option<&KeyRecord> {
        self.index.get(full_id).map(|&i| &self.records[i])
    }

    pub fn contains(&self, full_id: &str) -> bool {
        self.index.contains_key(full_id)
    }

    /// Finds a record by full id or short id
    ///
    /// An exact full-id match wins. Otherwise the query is compared with
    /// every full and short id ignoring ASCII case, and must match exactly
    /// one record.
    ///
    /// # Errors
    /// * `ResolveError::NotFound` - Nothing matches
    /// * `ResolveError::Ambiguous` - Several records match, listed in
    ///   registry order
    pub fn resolve(&self, query: &str) -> Result<&KeyRecord, ResolveError> {
        let query = query.trim();
        if let Some(record) = self.get(query) {
            return Ok(record);
        }

        let mut matches = self.records.iter().filter(|record| {
            record.full_id().eq_ignore_ascii_case(query)
                || record.short_id().eq_ignore_ascii_case(query)
        });

        match (matches.next(), matches.next()) {
            (Some(record), None) => Ok(record),
            (None, _) => Err(ResolveError::NotFound(query.to_string())),
            (Some(first), Some(second)) => Err(ResolveError::Ambiguous {
                query: query.to_string(),
                matches: [first, second]
                    .into_iter()
                    .chain(matches)
                    .map(|record| record.full_id().to_string())
                    .collect(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// The public and secret registries of one invocation
///
/// Both are built once, before any interaction, and stay read-only.
#[derive(Clone, Debug, Default)]
pub struct Keyring {
    /// Keys that can be chosen as recipients
    pub public: KeyRegistry,
    /// Keys that can be chosen as signer
    pub secret: KeyRegistry,
    secret_ids: HashSet<String>,
}

impl Keyring {
    /// Builds both registries from the two parsed listings
    ///
    /// # Example
    /// ```
    /// use gpg_encrypt_dialog::core::{Keyring, ListedKey};
    ///
    /// let keyring = Keyring::from_listings(
    ///     vec![ListedKey::new("AAAA1111", "Alice"), ListedKey::new("BBBB2222", "Bob")],
    ///     vec![ListedKey::new("AAAA1111", "Alice")],
    /// );
    /// assert!(keyring.is_personal("AAAA1111"));
    /// assert!(!keyring.is_personal("BBBB2222"));
    /// ```
    pub fn from_listings(public: Vec<ListedKey>, secret: Vec<ListedKey>) -> Self {
        let secret_ids: HashSet<String> = secret.iter().map(|k| k.key_id.clone()).collect();

        let secret = KeyRegistry::from_listing(secret, &secret_ids);
        let public = KeyRegistry::from_listing(public, &secret_ids);

        Self {
            public,
            secret,
            secret_ids,
        }
    }

    /// Ids present in the secret keyring
    pub fn secret_ids(&self) -> &HashSet<String> {
        &self.secret_ids
    }

    /// True when the id has a secret key (the "Personal Keys" scope)
    pub fn is_personal(&self, full_id: &str) -> bool {
        self.secret_ids.contains(full_id)
    }

    /// True when neither keyring holds a single key
    pub fn is_empty(&self) -> bool {
        self.public.is_empty() && self.secret.is_empty()
    }
}
