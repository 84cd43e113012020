//! Instruction-set definitions for RV32I and the RV32M extension.
//!
//! This module groups the decode tables and helpers:
//! 1. **Opcodes:** Major opcode constants (bits 6-0).
//! 2. **Function codes:** `funct3`/`funct7` discriminators.
//! 3. **ABI:** Conventional register names used by the run-time surface.
//! 4. **Decode:** Field extraction and immediate reconstruction.

/// Conventional ABI register indices (a0, ra, sp, ...).
pub mod abi;
/// Field extraction and immediate generation.
pub mod decode;
/// Mnemonic rendering for trace output.
pub mod disasm;
/// `funct3` discriminator constants.
pub mod funct3;
/// `funct7` discriminator constants.
pub mod funct7;
/// Major opcode constants.
pub mod opcodes;
