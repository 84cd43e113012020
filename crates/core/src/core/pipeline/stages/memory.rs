//! Memory Access (MEM) Stage.
//!
//! The fourth stage of the pipeline. Loads present an address to the data
//! SRAM; the word comes back through the MEM/WB latch, which realizes the
//! one-cycle synchronous read latency. Stores write the addressed lanes.
//! Misaligned or out-of-range accesses fault and stop the machine.

use crate::common::Fault;
use crate::core::pipeline::latches::{ExMemEntry, MemWbEntry};
use crate::core::Cpu;

/// Executes the memory stage.
///
/// Consumes the cycle-start EX/MEM entry and produces the next MEM/WB entry.
/// Non-memory instructions pass through unchanged.
pub fn mem_stage(cpu: &mut Cpu, ex_mem: &ExMemEntry) -> Result<MemWbEntry, Fault> {
    if !ex_mem.valid {
        return Ok(MemWbEntry::default());
    }

    let mut mem_data = 0;

    if ex_mem.ctrl.mem_read {
        mem_data = cpu
            .dmem
            .read(ex_mem.alu, ex_mem.ctrl.width, ex_mem.ctrl.signed_load)?;
        if cpu.tracer.enabled() {
            let cycle = cpu.stats.cycles;
            cpu.tracer.log(
                cycle,
                "MEM",
                format_args!("pc={:#010x} load addr={:#010x} data={:#010x}", ex_mem.pc, ex_mem.alu, mem_data),
            );
        }
    } else if ex_mem.ctrl.mem_write {
        cpu.dmem
            .write(ex_mem.alu, ex_mem.ctrl.width, ex_mem.store_data)?;
        if cpu.tracer.enabled() {
            let cycle = cpu.stats.cycles;
            cpu.tracer.log(
                cycle,
                "MEM",
                format_args!(
                    "pc={:#010x} store addr={:#010x} data={:#010x}",
                    ex_mem.pc, ex_mem.alu, ex_mem.store_data
                ),
            );
        }
    }

    Ok(MemWbEntry {
        valid: true,
        pc: ex_mem.pc,
        ctrl: ex_mem.ctrl,
        rd: ex_mem.rd,
        alu: ex_mem.alu,
        mem_data,
    })
}
