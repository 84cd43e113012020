//! Writeback (WB) Stage.
//!
//! The final stage of the pipeline. Selects between the ALU result and the
//! memory read data, commits to the register file, and retires the
//! instruction in the statistics. Writes to x0 are discarded by the
//! register file itself.

use crate::core::pipeline::hazards::writeback_value;
use crate::core::Cpu;

/// Executes the writeback stage over the cycle-start MEM/WB entry.
///
/// Runs before decode in the cycle driver, so a decode read of the same
/// register observes the newly committed value.
pub fn writeback_stage(cpu: &mut Cpu) {
    let entry = cpu.mem_wb;
    if !entry.valid {
        return;
    }

    if entry.ctrl.reg_write {
        let value = writeback_value(&entry);
        cpu.regs.write(entry.rd, value);
        if cpu.tracer.enabled() && entry.rd != 0 {
            let cycle = cpu.stats.cycles;
            cpu.tracer.log(
                cycle,
                "WB",
                format_args!("pc={:#010x} x{}={:#010x}", entry.pc, entry.rd, value),
            );
        }
    }

    let stats = &mut cpu.stats;
    stats.instructions_retired += 1;
    let c = &entry.ctrl;
    if c.mul.is_some() {
        stats.inst_mul += 1;
    } else if c.div.is_some() {
        stats.inst_div += 1;
    } else if c.mem_read {
        stats.inst_load += 1;
    } else if c.mem_write {
        stats.inst_store += 1;
    } else if c.branch.is_some() {
        stats.inst_branch += 1;
    } else if c.jump || c.jalr {
        stats.inst_jump += 1;
    } else {
        stats.inst_alu += 1;
    }
}
