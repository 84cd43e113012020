//! Simulation front end: image loading, tracing, and the top-level driver.

/// Hex image loader and its error type.
pub mod loader;
/// Top-level driver owning the CPU and the cycle budget.
pub mod simulator;
/// Trace sink and cycle-stamped logging.
pub mod trace;
