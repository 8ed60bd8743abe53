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

//! src/core/mod.rs
//!
//! Core business logic module
//!
//! This module contains the data structures and algorithms for choosing
//! encryption settings, including:
//! - Type definitions for keys, modes and signers
//! - Colon-listing parsing
//! - Order-preserving key registries
//! - Scope and text filtering
//! - The selection state machine
//! - Assembly of the final settings
//!
//! All business logic is isolated from UI and I/O concerns to enable
//! comprehensive unit testing without requiring a display server or gpg.

pub mod filter;
pub mod parser;
pub mod registry;
pub mod selection;
pub mod settings;
pub mod types;

pub use filter::{FilterState, Scope};
pub use registry::{KeyRegistry, Keyring, ResolveError};
pub use selection::{DialogState, Event, SelectionError, SelectionState};
pub use settings::{assemble, ConfirmError, EncryptionSettings};
pub use types::*;

#[cfg(test)]
mod tests;
