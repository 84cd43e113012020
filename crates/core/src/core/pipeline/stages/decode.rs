//! Instruction Decode (ID) Stage.
//!
//! The second stage of the pipeline. It performs the following:
//! 1. **Decoding:** Converts raw instruction bits into control signals.
//! 2. **Immediate Generation:** Reconstructs the I/S/B/U/J immediates.
//! 3. **Register Read:** Reads rs1/rs2 from the register file. Writeback has
//!    already committed this cycle, so a same-cycle WB-then-ID read observes
//!    the new value.
//!
//! Encodings the decoder does not recognize become no-ops with a one-line
//! warning, preserving forward progress through corrupted images. An
//! all-zero word is treated as an empty slot and dropped silently.

use crate::common::constants::INSTRUCTION_NOP;
use crate::core::pipeline::latches::{IdExEntry, IfIdEntry};
use crate::core::pipeline::signals::{
    AluOp, BranchOp, ControlSignals, DivOp, MemWidth, MulOp,
};
use crate::core::Cpu;
use crate::isa::decode::{imm_b, imm_i, imm_j, imm_s, imm_u, Decoded};
use crate::isa::disasm::disassemble;
use crate::isa::{funct3, funct7, opcodes};

/// Executes the instruction decode stage.
///
/// Consumes the IF/ID entry and produces the next ID/EX entry. Invalid input
/// yields a bubble.
pub fn decode_stage(cpu: &mut Cpu, if_id: &IfIdEntry) -> IdExEntry {
    if !if_id.valid || if_id.inst == 0 || if_id.inst == INSTRUCTION_NOP {
        return IdExEntry::default();
    }

    let d = Decoded::new(if_id.inst);
    let (ctrl, imm) = match synthesize(&d, if_id.inst) {
        Some(decoded) => decoded,
        None => {
            let cycle = cpu.stats.cycles;
            cpu.tracer.announce(
                cycle,
                "ID",
                format_args!(
                    "warning: unknown instruction {:#010x} at pc={:#010x}, treated as nop",
                    if_id.inst, if_id.pc
                ),
            );
            return IdExEntry::default();
        }
    };

    let rv1 = cpu.regs.read(d.rs1);
    let rv2 = cpu.regs.read(d.rs2);

    if cpu.tracer.enabled() {
        let cycle = cpu.stats.cycles;
        cpu.tracer.log(
            cycle,
            "ID",
            format_args!("pc={:#010x} {}", if_id.pc, disassemble(if_id.inst)),
        );
    }

    IdExEntry {
        valid: true,
        pc: if_id.pc,
        inst: if_id.inst,
        ctrl,
        rs1: d.rs1,
        rs2: d.rs2,
        rd: d.rd,
        rv1,
        rv2,
        imm,
        pred: if_id.pred,
    }
}

/// Synthesizes control signals and the immediate for a decoded instruction.
///
/// Returns `None` for encodings outside RV32I/RV32M; the caller turns those
/// into logged no-ops. Decoding is total over the recognized opcodes: every
/// funct combination below either maps to signals or rejects the word.
fn synthesize(d: &Decoded, inst: u32) -> Option<(ControlSignals, i32)> {
    let mut c = ControlSignals::default();
    let imm;

    match d.opcode {
        opcodes::OP_REG => {
            c.reg_write = true;
            c.uses_rs1 = true;
            c.uses_rs2 = true;
            imm = 0;
            if d.funct7 == funct7::MULDIV {
                match d.funct3 {
                    funct3::MUL => c.mul = Some(MulOp::Mul),
                    funct3::MULH => c.mul = Some(MulOp::Mulh),
                    funct3::MULHSU => c.mul = Some(MulOp::Mulhsu),
                    funct3::MULHU => c.mul = Some(MulOp::Mulhu),
                    funct3::DIV => c.div = Some(DivOp::Div),
                    funct3::DIVU => c.div = Some(DivOp::Divu),
                    funct3::REM => c.div = Some(DivOp::Rem),
                    funct3::REMU => c.div = Some(DivOp::Remu),
                    _ => return None,
                }
            } else {
                c.alu = r_type_alu(d)?;
            }
        }
        opcodes::OP_IMM => {
            c.reg_write = true;
            c.uses_rs1 = true;
            c.alu_src_imm = true;
            c.alu = i_type_alu(d)?;
            imm = imm_i(inst);
        }
        opcodes::OP_LOAD => {
            let (width, signed) = match d.funct3 {
                funct3::LB => (MemWidth::Byte, true),
                funct3::LH => (MemWidth::Half, true),
                funct3::LW => (MemWidth::Word, false),
                funct3::LBU => (MemWidth::Byte, false),
                funct3::LHU => (MemWidth::Half, false),
                _ => return None,
            };
            c.reg_write = true;
            c.mem_read = true;
            c.mem_to_reg = true;
            c.uses_rs1 = true;
            c.alu_src_imm = true;
            c.width = width;
            c.signed_load = signed;
            imm = imm_i(inst);
        }
        opcodes::OP_STORE => {
            c.width = match d.funct3 {
                funct3::SB => MemWidth::Byte,
                funct3::SH => MemWidth::Half,
                funct3::SW => MemWidth::Word,
                _ => return None,
            };
            c.mem_write = true;
            c.uses_rs1 = true;
            c.uses_rs2 = true;
            c.alu_src_imm = true;
            imm = imm_s(inst);
        }
        opcodes::OP_BRANCH => {
            c.branch = Some(match d.funct3 {
                funct3::BEQ => BranchOp::Beq,
                funct3::BNE => BranchOp::Bne,
                funct3::BLT => BranchOp::Blt,
                funct3::BGE => BranchOp::Bge,
                funct3::BLTU => BranchOp::Bltu,
                funct3::BGEU => BranchOp::Bgeu,
                _ => return None,
            });
            c.uses_rs1 = true;
            c.uses_rs2 = true;
            imm = imm_b(inst);
        }
        opcodes::OP_LUI => {
            c.reg_write = true;
            c.lui = true;
            imm = imm_u(inst);
        }
        opcodes::OP_AUIPC => {
            c.reg_write = true;
            c.auipc = true;
            c.alu_src_imm = true;
            imm = imm_u(inst);
        }
        opcodes::OP_JAL => {
            c.reg_write = true;
            c.jump = true;
            imm = imm_j(inst);
        }
        opcodes::OP_JALR => {
            if d.funct3 != 0 {
                return None;
            }
            c.reg_write = true;
            c.jalr = true;
            c.uses_rs1 = true;
            imm = imm_i(inst);
        }
        _ => return None,
    }

    Some((c, imm))
}

/// Maps an R-type funct3/funct7 pair to an ALU operation.
fn r_type_alu(d: &Decoded) -> Option<AluOp> {
    let alt = d.funct7 == funct7::ALT;
    if d.funct7 != funct7::BASE && !alt {
        return None;
    }
    Some(match (d.funct3, alt) {
        (funct3::ADD_SUB, false) => AluOp::Add,
        (funct3::ADD_SUB, true) => AluOp::Sub,
        (funct3::SLL, false) => AluOp::Sll,
        (funct3::SLT, false) => AluOp::Slt,
        (funct3::SLTU, false) => AluOp::Sltu,
        (funct3::XOR, false) => AluOp::Xor,
        (funct3::SRL_SRA, false) => AluOp::Srl,
        (funct3::SRL_SRA, true) => AluOp::Sra,
        (funct3::OR, false) => AluOp::Or,
        (funct3::AND, false) => AluOp::And,
        _ => return None,
    })
}

/// Maps an I-type funct3 (and the shift funct7) to an ALU operation.
fn i_type_alu(d: &Decoded) -> Option<AluOp> {
    Some(match d.funct3 {
        funct3::ADD_SUB => AluOp::Add,
        funct3::SLT => AluOp::Slt,
        funct3::SLTU => AluOp::Sltu,
        funct3::XOR => AluOp::Xor,
        funct3::OR => AluOp::Or,
        funct3::AND => AluOp::And,
        funct3::SLL => {
            if d.funct7 != funct7::BASE {
                return None;
            }
            AluOp::Sll
        }
        funct3::SRL_SRA => match d.funct7 {
            funct7::BASE => AluOp::Srl,
            funct7::ALT => AluOp::Sra,
            _ => return None,
        },
        _ => return None,
    })
}
