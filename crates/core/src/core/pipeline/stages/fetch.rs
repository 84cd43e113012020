//! Instruction Fetch (IF) Stage.
//!
//! Fetches the instruction word at the current PC and consults the branch
//! predictor for the next PC. The prediction metadata travels with the
//! instruction so Execute can verify it two cycles later.

use crate::common::Fault;
use crate::core::pipeline::latches::IfIdEntry;
use crate::core::Cpu;

/// Executes the instruction fetch stage.
///
/// Reads the instruction at `pc >> 2` and queries the BTB/BHT. The returned
/// entry carries the prediction; its `predicted_pc` field is also the PC the
/// driver commits when the pipeline advances normally. The predictor is read
/// before any same-cycle update from Execute is applied.
pub fn fetch_stage(cpu: &mut Cpu) -> Result<IfIdEntry, Fault> {
    let pc = cpu.pc;
    let inst = cpu.imem.fetch(pc)?;
    let pred = cpu.predictor.predict(pc);

    if cpu.tracer.enabled() {
        let cycle = cpu.stats.cycles;
        cpu.tracer.log(
            cycle,
            "IF",
            format_args!(
                "pc={:#010x} inst={:#010x} next={:#010x}{}",
                pc,
                inst,
                pred.predicted_pc,
                if pred.btb_hit && pred.taken {
                    " (predicted taken)"
                } else {
                    ""
                }
            ),
        );
    }

    Ok(IfIdEntry {
        valid: true,
        pc,
        inst,
        pred,
    })
}
