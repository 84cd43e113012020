//! Pipeline behavior tests driven by real instruction sequences.

/// Control hazards: flushes and prediction recovery.
pub mod branches;
/// Operand forwarding across EX/MEM and MEM/WB.
pub mod forwarding;
/// Load-use stall behavior.
pub mod load_use;
/// Multi-cycle multiply/divide stalls and latency.
pub mod multi_cycle;
