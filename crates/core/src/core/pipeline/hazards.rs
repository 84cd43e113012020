//! Data hazard detection and operand forwarding.
//!
//! This module keeps the pipeline consistent across data dependencies:
//! 1. **Hazard Detection:** load-use hazards that require a one-cycle stall.
//! 2. **Operand Forwarding:** RAW hazards resolved by bypassing the register
//!    file from the EX/MEM and MEM/WB latches.
//!
//! Every function here is pure over latch snapshots; the cycle driver applies
//! the resulting stall/flush decisions.

use crate::core::pipeline::latches::{ExMemEntry, IdExEntry, MemWbEntry};

/// Checks whether the instruction in ID/EX must wait for a load in EX/MEM.
///
/// A load's data exists only after its memory cycle, so a consumer entering
/// Execute one cycle behind it cannot be served by forwarding yet. The stall
/// holds the consumer for one cycle, after which the load has reached MEM/WB
/// and the normal forwarding path applies.
pub fn need_stall_load_use(ex_mem: &ExMemEntry, id_ex: &IdExEntry) -> bool {
    if !ex_mem.valid || !ex_mem.ctrl.mem_read || ex_mem.rd == 0 {
        return false;
    }
    if !id_ex.valid {
        return false;
    }
    (id_ex.ctrl.uses_rs1 && id_ex.rs1 == ex_mem.rd)
        || (id_ex.ctrl.uses_rs2 && id_ex.rs2 == ex_mem.rd)
}

/// The value an instruction in MEM/WB is about to write back.
pub fn writeback_value(entry: &MemWbEntry) -> u32 {
    if entry.ctrl.mem_to_reg {
        entry.mem_data
    } else {
        entry.alu
    }
}

/// Selects the freshest value for one source operand.
///
/// Priority: EX/MEM result (youngest), then MEM/WB writeback value, then the
/// value read from the register file at decode. Register x0 never forwards.
/// A load in EX/MEM has no result to forward; the load-use stall guarantees
/// that case never reaches Execute.
pub fn forward_operand(
    reg: usize,
    reg_val: u32,
    ex_mem: &ExMemEntry,
    mem_wb: &MemWbEntry,
) -> u32 {
    if reg == 0 {
        return 0;
    }
    if ex_mem.valid && ex_mem.ctrl.reg_write && !ex_mem.ctrl.mem_read && ex_mem.rd == reg {
        return ex_mem.alu;
    }
    if mem_wb.valid && mem_wb.ctrl.reg_write && mem_wb.rd == reg {
        return writeback_value(mem_wb);
    }
    reg_val
}
