//! Instruction disassembler for RV32IM.
//!
//! Converts a 32-bit instruction encoding into a human-readable mnemonic
//! string for debug tracing and test diagnostics.
//!
//! # Usage
//!
//! ```
//! use rv32sim_core::isa::disasm::disassemble;
//! assert_eq!(disassemble(0x00A00513), "addi a0, zero, 10");
//! ```

use crate::isa::decode::{imm_b, imm_i, imm_j, imm_s, imm_u, Decoded};
use crate::isa::{funct3, funct7, opcodes};

/// ABI register names for x0-x31.
const REG_NAMES: [&str; 32] = [
    "zero", "ra", "sp", "gp", "tp", "t0", "t1", "t2", "s0", "s1", "a0", "a1", "a2", "a3", "a4",
    "a5", "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7", "s8", "s9", "s10", "s11", "t3", "t4",
    "t5", "t6",
];

/// Returns the ABI name of an integer register.
fn reg(idx: usize) -> &'static str {
    REG_NAMES[idx & 0x1F]
}

/// Disassembles one instruction word.
///
/// Unrecognized encodings render as `unknown (0x........)`, matching what
/// the decoder turns into a logged no-op.
pub fn disassemble(inst: u32) -> String {
    let d = Decoded::new(inst);
    match d.opcode {
        opcodes::OP_REG => disasm_reg(&d, inst),
        opcodes::OP_IMM => disasm_imm(&d, inst),
        opcodes::OP_LOAD => disasm_load(&d, inst),
        opcodes::OP_STORE => disasm_store(&d, inst),
        opcodes::OP_BRANCH => disasm_branch(&d, inst),
        opcodes::OP_LUI => format!("lui {}, {:#x}", reg(d.rd), (imm_u(inst) as u32) >> 12),
        opcodes::OP_AUIPC => format!("auipc {}, {:#x}", reg(d.rd), (imm_u(inst) as u32) >> 12),
        opcodes::OP_JAL => format!("jal {}, {}", reg(d.rd), imm_j(inst)),
        opcodes::OP_JALR if d.funct3 == 0 => {
            format!("jalr {}, {}({})", reg(d.rd), imm_i(inst), reg(d.rs1))
        }
        _ => format!("unknown ({:#010x})", inst),
    }
}

/// R-type: base integer and M-extension operations.
fn disasm_reg(d: &Decoded, inst: u32) -> String {
    let mnemonic = if d.funct7 == funct7::MULDIV {
        match d.funct3 {
            funct3::MUL => "mul",
            funct3::MULH => "mulh",
            funct3::MULHSU => "mulhsu",
            funct3::MULHU => "mulhu",
            funct3::DIV => "div",
            funct3::DIVU => "divu",
            funct3::REM => "rem",
            funct3::REMU => "remu",
            _ => return format!("unknown ({:#010x})", inst),
        }
    } else {
        let alt = d.funct7 == funct7::ALT;
        if d.funct7 != funct7::BASE && !alt {
            return format!("unknown ({:#010x})", inst);
        }
        match (d.funct3, alt) {
            (funct3::ADD_SUB, false) => "add",
            (funct3::ADD_SUB, true) => "sub",
            (funct3::SLL, false) => "sll",
            (funct3::SLT, false) => "slt",
            (funct3::SLTU, false) => "sltu",
            (funct3::XOR, false) => "xor",
            (funct3::SRL_SRA, false) => "srl",
            (funct3::SRL_SRA, true) => "sra",
            (funct3::OR, false) => "or",
            (funct3::AND, false) => "and",
            _ => return format!("unknown ({:#010x})", inst),
        }
    };
    format!("{} {}, {}, {}", mnemonic, reg(d.rd), reg(d.rs1), reg(d.rs2))
}

/// I-type arithmetic, including the shift-immediate forms.
fn disasm_imm(d: &Decoded, inst: u32) -> String {
    let shamt = d.rs2;
    match d.funct3 {
        funct3::ADD_SUB => format!("addi {}, {}, {}", reg(d.rd), reg(d.rs1), imm_i(inst)),
        funct3::SLT => format!("slti {}, {}, {}", reg(d.rd), reg(d.rs1), imm_i(inst)),
        funct3::SLTU => format!("sltiu {}, {}, {}", reg(d.rd), reg(d.rs1), imm_i(inst)),
        funct3::XOR => format!("xori {}, {}, {}", reg(d.rd), reg(d.rs1), imm_i(inst)),
        funct3::OR => format!("ori {}, {}, {}", reg(d.rd), reg(d.rs1), imm_i(inst)),
        funct3::AND => format!("andi {}, {}, {}", reg(d.rd), reg(d.rs1), imm_i(inst)),
        funct3::SLL if d.funct7 == funct7::BASE => {
            format!("slli {}, {}, {}", reg(d.rd), reg(d.rs1), shamt)
        }
        funct3::SRL_SRA if d.funct7 == funct7::BASE => {
            format!("srli {}, {}, {}", reg(d.rd), reg(d.rs1), shamt)
        }
        funct3::SRL_SRA if d.funct7 == funct7::ALT => {
            format!("srai {}, {}, {}", reg(d.rd), reg(d.rs1), shamt)
        }
        _ => format!("unknown ({:#010x})", inst),
    }
}

/// Loads: mnemonic selected by width and sign.
fn disasm_load(d: &Decoded, inst: u32) -> String {
    let mnemonic = match d.funct3 {
        funct3::LB => "lb",
        funct3::LH => "lh",
        funct3::LW => "lw",
        funct3::LBU => "lbu",
        funct3::LHU => "lhu",
        _ => return format!("unknown ({:#010x})", inst),
    };
    format!("{} {}, {}({})", mnemonic, reg(d.rd), imm_i(inst), reg(d.rs1))
}

/// Stores: mnemonic selected by width.
fn disasm_store(d: &Decoded, inst: u32) -> String {
    let mnemonic = match d.funct3 {
        funct3::SB => "sb",
        funct3::SH => "sh",
        funct3::SW => "sw",
        _ => return format!("unknown ({:#010x})", inst),
    };
    format!("{} {}, {}({})", mnemonic, reg(d.rs2), imm_s(inst), reg(d.rs1))
}

/// Conditional branches with their byte offsets.
fn disasm_branch(d: &Decoded, inst: u32) -> String {
    let mnemonic = match d.funct3 {
        funct3::BEQ => "beq",
        funct3::BNE => "bne",
        funct3::BLT => "blt",
        funct3::BGE => "bge",
        funct3::BLTU => "bltu",
        funct3::BGEU => "bgeu",
        _ => return format!("unknown ({:#010x})", inst),
    };
    format!("{} {}, {}, {}", mnemonic, reg(d.rs1), reg(d.rs2), imm_b(inst))
}
