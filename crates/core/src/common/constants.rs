//! Global instruction-format constants.
//!
//! This module defines the field masks and shifts used to slice 32-bit RISC-V
//! instruction words, plus a handful of well-known encodings.

/// Bit mask for extracting the opcode field (bits 6-0).
pub const OPCODE_MASK: u32 = 0x7F;

/// Bit position shift for the destination register (rd) field.
pub const RD_SHIFT: u32 = 7;

/// Bit mask for the destination register (rd) field.
pub const RD_MASK: u32 = 0x1F;

/// Bit position shift for the funct3 field.
pub const FUNCT3_SHIFT: u32 = 12;

/// Bit mask for the funct3 field.
pub const FUNCT3_MASK: u32 = 0x7;

/// Bit position shift for the first source register (rs1) field.
pub const RS1_SHIFT: u32 = 15;

/// Bit mask for the first source register (rs1) field.
pub const RS1_MASK: u32 = 0x1F;

/// Bit position shift for the second source register (rs2) field.
pub const RS2_SHIFT: u32 = 20;

/// Bit mask for the second source register (rs2) field.
pub const RS2_MASK: u32 = 0x1F;

/// Bit position shift for the funct7 field.
pub const FUNCT7_SHIFT: u32 = 25;

/// Bit mask for the funct7 field.
pub const FUNCT7_MASK: u32 = 0x7F;

/// Size of one instruction word in bytes.
pub const WORD_BYTES: u32 = 4;

/// ADDI x0, x0, 0, the canonical NOP encoding.
pub const INSTRUCTION_NOP: u32 = 0x0000_0013;
