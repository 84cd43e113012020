//! RISC-V `funct7` function codes (bits 31-25).

/// Base encoding for most R-type instructions.
pub const BASE: u32 = 0b0000000;

/// Alternate encoding: selects SUB under `ADD_SUB` and SRA under `SRL_SRA`.
pub const ALT: u32 = 0b0100000;

/// M-extension marker: MUL/DIV family under `OP_REG`.
pub const MULDIV: u32 = 0b0000001;

/// Bit 5 of funct7; set for the alternate encoding (SUB, SRA, SRAI).
pub const ALT_BIT: u32 = 0x20;
