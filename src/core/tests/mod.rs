//! Core module tests
//!
//! Contains test suites for core functionality:
//! - Colon-listing parser tests
//! - Registry deduplication tests
//! - Filter tests
//! - Selection state machine tests
//! - Settings assembly tests
//! - Type tests (short ids, contract tokens)

#[cfg(test)]
mod types_tests;
