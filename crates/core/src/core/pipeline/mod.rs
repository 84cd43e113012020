//! Pipeline structures: latches, control signals, hazards, and stages.

/// Data hazard detection and operand forwarding.
pub mod hazards;
/// Inter-stage pipeline latch entry types.
pub mod latches;
/// Control signals and operation types.
pub mod signals;
/// The five stage implementations.
pub mod stages;
