//! CPU core: architectural state and the per-cycle driver.
//!
//! The [`Cpu`] owns every piece of machine state (register file, memories,
//! pipeline latches, branch predictor, and the multi-cycle units) and its
//! [`Cpu::tick`] advances the whole machine by one clock.
//!
//! A tick reads the cycle-start latch values, computes each stage's proposed
//! output, and commits all latches together, so the stages behave as if they
//! updated simultaneously. Stage order inside the tick encodes the few
//! same-cycle orderings the model guarantees:
//! - writeback commits before decode reads the register file;
//! - fetch reads the predictor before the execute-side update lands;
//! - flush beats stall beats normal advance for the PC and front latches.

/// General-purpose register file.
pub mod gpr;
/// Pipeline latches, signals, hazards, and stages.
pub mod pipeline;
/// Functional units (ALU, predictor, multiplier, divider).
pub mod units;

use crate::common::Fault;
use crate::config::Config;
use crate::core::pipeline::hazards;
use crate::core::pipeline::latches::{ExMemEntry, IdExEntry, IfIdEntry, MemWbEntry};
use crate::core::pipeline::stages::{
    decode_stage, execute_stage, fetch_stage, mem_stage, writeback_stage, ExOutcome,
};
use crate::core::units::bru::BranchPredictor;
use crate::core::units::div::Divider;
use crate::core::units::mul::Multiplier;
use crate::isa::abi;
use crate::mem::{DataMemory, InstructionMemory};
use crate::sim::trace::Tracer;
use crate::stats::SimStats;
use gpr::Gpr;

/// The processor model.
pub struct Cpu {
    /// General-purpose registers.
    pub regs: Gpr,
    /// Program counter of the next fetch.
    pub pc: u32,
    /// Instruction memory.
    pub imem: InstructionMemory,
    /// Data memory.
    pub dmem: DataMemory,
    /// Branch target buffer and direction counters.
    pub predictor: BranchPredictor,

    /// IF/ID pipeline latch.
    pub if_id: IfIdEntry,
    /// ID/EX pipeline latch.
    pub id_ex: IdExEntry,
    /// EX/MEM pipeline latch.
    pub ex_mem: ExMemEntry,
    /// MEM/WB pipeline latch.
    pub mem_wb: MemWbEntry,

    /// Multi-cycle multiply unit.
    pub mul: Multiplier,
    /// Multi-cycle divide unit.
    pub div: Divider,

    /// Performance counters.
    pub stats: SimStats,
    /// Cycle-stamped log sink.
    pub tracer: Tracer,

    /// The halt sentinel has been seen; one more cycle drains writeback.
    halting: bool,
    /// Result register value, set once the machine has fully halted.
    exit_code: Option<u32>,
}

impl Cpu {
    /// Creates a CPU in the reset state: PC 0, empty memories, all latches
    /// invalid.
    pub fn new(config: &Config, tracer: Tracer) -> Self {
        Self {
            regs: Gpr::new(),
            pc: 0,
            imem: InstructionMemory::new(config.memory.imem_words),
            dmem: DataMemory::new(config.memory.dmem_words),
            predictor: BranchPredictor::new(config.pipeline.btb_entries),
            if_id: IfIdEntry::default(),
            id_ex: IdExEntry::default(),
            ex_mem: ExMemEntry::default(),
            mem_wb: MemWbEntry::default(),
            mul: Multiplier::new(),
            div: Divider::new(),
            stats: SimStats::default(),
            tracer,
            halting: false,
            exit_code: None,
        }
    }

    /// Value of `a0` at halt, once the machine has stopped.
    pub fn exit_code(&self) -> Option<u32> {
        self.exit_code
    }

    /// Advances the machine by one clock cycle.
    pub fn tick(&mut self) -> Result<(), Fault> {
        self.stats.cycles += 1;

        // Cycle-start snapshots. Stages compute against these while the
        // latches keep their old values until the commit below.
        let ex_mem_snap = self.ex_mem;
        let mem_wb_snap = self.mem_wb;
        let if_id_snap = self.if_id;

        // Writeback first: a decode read of the same register this cycle
        // must observe the committed value.
        writeback_stage(self);

        // After the halt sentinel, the final in-flight instruction has just
        // retired; report the result and stop.
        if self.halting {
            let result = self.regs.read(abi::REG_A0);
            self.exit_code = Some(result);
            self.mem_wb = MemWbEntry::default();
            let cycle = self.stats.cycles;
            self.tracer.announce(
                cycle,
                "WB",
                format_args!("Finish Execution. The result is {}", result),
            );
            return Ok(());
        }

        // Load-use is decided over the snapshot: the consumer must not
        // execute this cycle if its producer's data is still in memory.
        let load_use = hazards::need_stall_load_use(&ex_mem_snap, &self.id_ex);

        let mem_wb_next = mem_stage(self, &ex_mem_snap)?;

        let (ex_mem_next, outcome) = if load_use {
            (ExMemEntry::default(), ExOutcome::default())
        } else {
            execute_stage(self, &ex_mem_snap, &mem_wb_snap)
        };

        let unit_stall = self.mul.busy() || self.div.busy();
        let advance =
            !load_use && !unit_stall && outcome.redirect.is_none() && !outcome.halt;

        // Fetch reads the predictor before the execute-side update below, so
        // a same-cycle read and write of one entry behaves like hardware:
        // the fetch sees the pre-write state.
        let fetched = if advance { Some(fetch_stage(self)?) } else { None };

        if let Some((pc, taken, target)) = outcome.branch_resolved {
            self.predictor.update(pc, taken, target);
            if outcome.mispredict {
                self.stats.branch_mispredictions += 1;
            } else {
                self.stats.branch_predictions += 1;
            }
        }

        // Commit point: every latch takes its next value together.
        self.mem_wb = mem_wb_next;
        self.ex_mem = ex_mem_next;

        if outcome.halt {
            self.if_id = IfIdEntry::default();
            self.id_ex = IdExEntry::default();
            self.halting = true;
            return Ok(());
        }

        if let Some(correct_pc) = outcome.redirect {
            // Flush beats stall: squash the front latches, cancel any
            // in-flight multi-cycle work, and steer fetch.
            self.if_id = IfIdEntry::default();
            self.id_ex = IdExEntry::default();
            self.pc = correct_pc;
            self.mul.cancel();
            self.div.cancel();
            self.stats.flushes += 1;
            return Ok(());
        }

        if load_use {
            self.stats.stalls_load_use += 1;
            return Ok(());
        }
        if self.mul.busy() {
            self.stats.stalls_mul += 1;
            return Ok(());
        }
        if self.div.busy() {
            self.stats.stalls_div += 1;
            return Ok(());
        }

        // Normal advance: ID consumes the held IF/ID entry, IF refills it,
        // and the PC follows the prediction fetch just made.
        let if_id_next = fetched.expect("fetch ran on the advance path");
        self.id_ex = decode_stage(self, &if_id_snap);
        self.if_id = if_id_next;
        self.pc = if_id_next.pred.predicted_pc;
        Ok(())
    }

    /// Dumps the PC and all 32 registers to stdout.
    pub fn dump_state(&self) {
        println!("pc  = {:#010x}", self.pc);
        let regs = self.regs.dump();
        for i in (0..32).step_by(2) {
            println!(
                "x{:<2} = {:#010x}    x{:<2} = {:#010x}",
                i,
                regs[i],
                i + 1,
                regs[i + 1]
            );
        }
    }
}
