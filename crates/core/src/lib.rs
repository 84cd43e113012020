//! Cycle-accurate RV32IM pipeline simulator library.
//!
//! This crate implements a five-stage, in-order RV32IM processor model with the following:
//! 1. **Core:** Pipeline (fetch, decode, execute, memory, writeback), register file, hazard unit.
//! 2. **Units:** ALU, 64-entry BTB + 2-bit BHT branch predictor, 3-cycle Wallace-tree
//!    multiplier, 18-cycle radix-4 SRT divider.
//! 3. **Memory:** Word-addressed instruction ROM and a synchronous-read data SRAM.
//! 4. **ISA:** Decoding for the RV32I base set and the RV32M multiply/divide extension.
//! 5. **Simulation:** Hex image loader, configuration, trace sink, and statistics collection.

/// Common types and constants (instruction fields, faults).
pub mod common;
/// Simulator configuration (defaults and hierarchical config structures).
pub mod config;
/// CPU core (pipeline, register file, functional units, cycle driver).
pub mod core;
/// Instruction set (decode, opcodes, function codes, ABI names).
pub mod isa;
/// Instruction and data memories.
pub mod mem;
/// Simulation front end (image loader, trace sink, top-level driver).
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Main CPU type; holds the pipeline latches, memories, and functional units.
pub use crate::core::Cpu;
/// Top-level driver; construct with `Simulator::new` and step with `tick`.
pub use crate::sim::simulator::Simulator;
