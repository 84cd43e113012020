//! Instruction Execute (EX) Stage.
//!
//! The third stage of the pipeline. It performs the following:
//! 1. **Forwarding:** Selects the freshest operand values from the EX/MEM and
//!    MEM/WB latches ahead of the register file.
//! 2. **Execution:** Single-cycle ALU operations, LUI/AUIPC/link selection,
//!    and issue/progress of the multi-cycle multiply and divide units.
//! 3. **Branch Resolution:** Evaluates branch conditions, verifies the fetch
//!    prediction, and reports redirects for mispredicts and jumps.
//! 4. **Halt Detection:** A JAL with zero offset jumps to itself and marks
//!    the end of the program.
//!
//! While a multi-cycle unit is busy the stage emits bubbles and the front of
//! the pipeline is held; the owning instruction stays in ID/EX until its
//! result is delivered.

use crate::common::constants::WORD_BYTES;
use crate::core::pipeline::hazards::forward_operand;
use crate::core::pipeline::latches::{ExMemEntry, IdExEntry, MemWbEntry, PredictionResult};
use crate::core::pipeline::signals::BranchOp;
use crate::core::units::alu::Alu;
use crate::core::Cpu;

/// Control-flow outcome of one Execute cycle, consumed by the cycle driver.
#[derive(Clone, Copy, Default, Debug)]
pub struct ExOutcome {
    /// Corrected PC; `Some` flushes IF/ID and ID/EX.
    pub redirect: Option<u32>,
    /// Resolved branch for the predictor: (branch PC, taken, target).
    pub branch_resolved: Option<(u32, bool, u32)>,
    /// The resolved branch disagreed with its prediction.
    pub mispredict: bool,
    /// The halt sentinel (JAL with zero offset) reached Execute.
    pub halt: bool,
}

/// Executes the execute stage.
///
/// Consumes the ID/EX entry (with forwarding against the cycle-start EX/MEM
/// and MEM/WB snapshots) and produces the next EX/MEM entry plus the
/// control-flow outcome.
pub fn execute_stage(
    cpu: &mut Cpu,
    ex_mem: &ExMemEntry,
    mem_wb: &MemWbEntry,
) -> (ExMemEntry, ExOutcome) {
    let id_ex = cpu.id_ex;
    let mut outcome = ExOutcome::default();

    if !id_ex.valid {
        return (ExMemEntry::default(), outcome);
    }

    let rs1_fwd = forward_operand(id_ex.rs1, id_ex.rv1, ex_mem, mem_wb);
    let rs2_fwd = forward_operand(id_ex.rs2, id_ex.rv2, ex_mem, mem_wb);

    // Multi-cycle units: issue on first sight, then bubble until delivery.
    if id_ex.ctrl.is_multi_cycle() {
        return (drive_unit(cpu, &id_ex, rs1_fwd, rs2_fwd), outcome);
    }

    let imm = id_ex.imm as u32;

    // Halt sentinel: an unconditional jump to itself.
    if id_ex.ctrl.jump && id_ex.imm == 0 {
        outcome.halt = true;
        return (ExMemEntry::default(), outcome);
    }

    let alu_a = if id_ex.ctrl.auipc { id_ex.pc } else { rs1_fwd };
    let alu_b = if id_ex.ctrl.alu_src_imm { imm } else { rs2_fwd };

    let alu_out = if id_ex.ctrl.lui {
        imm
    } else if id_ex.ctrl.jump || id_ex.ctrl.jalr {
        id_ex.pc.wrapping_add(WORD_BYTES)
    } else {
        Alu::execute(id_ex.ctrl.alu, alu_a, alu_b)
    };

    let mut pred_result = PredictionResult::default();

    if let Some(op) = id_ex.ctrl.branch {
        let taken = branch_eval(op, rs1_fwd, rs2_fwd);
        let target = id_ex.pc.wrapping_add(imm);
        let fallthrough = id_ex.pc.wrapping_add(WORD_BYTES);
        let correct_pc = if taken { target } else { fallthrough };

        // A BTB hit is correct when direction and target both agree; a miss
        // is correct only for a not-taken branch.
        let correct = if id_ex.pred.btb_hit {
            if id_ex.pred.taken {
                taken && id_ex.pred.predicted_pc == target
            } else {
                !taken
            }
        } else {
            !taken
        };

        pred_result = PredictionResult {
            mispredict: !correct,
            correct_pc,
            taken,
            target,
            branch_pc: id_ex.pc,
        };
        outcome.branch_resolved = Some((id_ex.pc, taken, target));
        outcome.mispredict = !correct;
        if !correct {
            outcome.redirect = Some(correct_pc);
        }
    } else if id_ex.ctrl.jump || id_ex.ctrl.jalr {
        // The predictor does not track jumps; they always redirect.
        let target = if id_ex.ctrl.jalr {
            rs1_fwd.wrapping_add(imm) & !1
        } else {
            id_ex.pc.wrapping_add(imm)
        };
        pred_result = PredictionResult {
            mispredict: true,
            correct_pc: target,
            taken: true,
            target,
            branch_pc: id_ex.pc,
        };
        outcome.redirect = Some(target);
    }

    if cpu.tracer.enabled() {
        let cycle = cpu.stats.cycles;
        cpu.tracer.log(
            cycle,
            "EX",
            format_args!(
                "pc={:#010x} alu={:#010x}{}",
                id_ex.pc,
                alu_out,
                match outcome.redirect {
                    Some(target) => format!(" redirect={:#010x}", target),
                    None => String::new(),
                }
            ),
        );
    }

    let entry = ExMemEntry {
        valid: true,
        pc: id_ex.pc,
        ctrl: id_ex.ctrl,
        rd: id_ex.rd,
        alu: alu_out,
        store_data: rs2_fwd,
        pred_result,
    };
    (entry, outcome)
}

/// Issues or advances the multiply/divide unit owning the ID/EX instruction.
///
/// Returns the delivered result as a live EX/MEM entry on the completion
/// cycle and a bubble otherwise. The driver keeps the front end stalled
/// while either unit reports busy.
fn drive_unit(cpu: &mut Cpu, id_ex: &IdExEntry, rs1_fwd: u32, rs2_fwd: u32) -> ExMemEntry {
    let delivered = if let Some(op) = id_ex.ctrl.mul {
        if !cpu.mul.busy() {
            cpu.mul.issue(rs1_fwd, rs2_fwd, op, id_ex.rd);
        }
        cpu.mul.tick()
    } else if let Some(op) = id_ex.ctrl.div {
        if !cpu.div.busy() {
            cpu.div.issue(rs1_fwd, rs2_fwd, op, id_ex.rd);
        }
        cpu.div.tick()
    } else {
        None
    };

    match delivered {
        Some(result) => {
            if cpu.tracer.enabled() {
                let cycle = cpu.stats.cycles;
                cpu.tracer.log(
                    cycle,
                    "EX",
                    format_args!(
                        "pc={:#010x} unit result x{}={:#010x}",
                        id_ex.pc, result.rd, result.value
                    ),
                );
            }
            ExMemEntry {
                valid: true,
                pc: id_ex.pc,
                ctrl: id_ex.ctrl,
                rd: result.rd,
                alu: result.value,
                store_data: rs2_fwd,
                pred_result: PredictionResult::default(),
            }
        }
        None => ExMemEntry::default(),
    }
}

/// Evaluates a branch condition over forwarded operands.
fn branch_eval(op: BranchOp, a: u32, b: u32) -> bool {
    match op {
        BranchOp::Beq => a == b,
        BranchOp::Bne => a != b,
        BranchOp::Blt => (a as i32) < (b as i32),
        BranchOp::Bge => (a as i32) >= (b as i32),
        BranchOp::Bltu => a < b,
        BranchOp::Bgeu => a >= b,
    }
}
