//! Loader and trace tests.

/// Trace sink behavior.
pub mod trace;
