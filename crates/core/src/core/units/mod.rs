//! Functional units used by the Execute stage.
//!
//! This module contains the execution resources of the core:
//! 1. **ALU:** single-cycle integer operations.
//! 2. **BRU:** branch target buffer and direction predictor.
//! 3. **Multiplier:** 3-cycle Wallace-tree multiply unit.
//! 4. **Divider:** 18-cycle radix-4 SRT divide unit.

/// Single-cycle integer ALU.
pub mod alu;
/// Branch prediction unit (BTB + BHT).
pub mod bru;
/// Multi-cycle radix-4 SRT divider.
pub mod div;
/// Multi-cycle Wallace-tree multiplier.
pub mod mul;

/// Result delivered by a multi-cycle unit on its completion cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnitResult {
    /// Destination register captured at issue.
    pub rd: usize,
    /// The 32-bit result to write back.
    pub value: u32,
}
