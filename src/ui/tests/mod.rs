//! UI module tests
//!
//! Only the GTK-free Controller is tested here; widgets need a display.

#[cfg(test)]
mod controller_tests;
