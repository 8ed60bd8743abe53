//! UI Components
//!
//! Reusable GTK4 widgets for the encryption settings dialog.
//!
//! # Components
//!
//! - `mode_selector.rs` - Passphrase / recipients radio pair
//! - `filter_bar.rs` - Scope drop-down and real-time search
//! - `key_list.rs` - Scrollable list of keys with check boxes
//! - `signer_selector.rs` - "Sign message as" drop-down

mod filter_bar;
mod key_list;
mod mode_selector;
mod signer_selector;

pub use filter_bar::FilterBar;
pub use key_list::KeyList;
pub use mode_selector::ModeSelector;
pub use signer_selector::SignerSelector;
