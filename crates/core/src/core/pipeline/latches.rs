//! Pipeline latch structures for inter-stage communication.
//!
//! This module defines the entries carried between the five pipeline stages:
//! Fetch → Decode → Execute → Memory → Writeback.
//!
//! Every latch has a `valid` flag; an invalid entry is a bubble and every
//! downstream stage treats it as a no-op. All latches reset to the invalid
//! default and are committed together at the end of each simulated cycle.

use crate::core::pipeline::signals::ControlSignals;

/// Branch-predictor metadata attached to a fetched instruction.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct PredictionInfo {
    /// The BTB held a valid entry for this PC.
    pub btb_hit: bool,
    /// The direction counter predicted taken.
    pub taken: bool,
    /// The PC fetch moved to after this instruction.
    pub predicted_pc: u32,
}

/// Resolved branch outcome produced by the Execute stage.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct PredictionResult {
    /// The prediction disagreed with the resolved outcome.
    pub mispredict: bool,
    /// The PC the program must continue at.
    pub correct_pc: u32,
    /// The branch actually redirected control flow.
    pub taken: bool,
    /// The resolved target address.
    pub target: u32,
    /// PC of the resolving branch; the predictor derives its table index
    /// from it.
    pub branch_pc: u32,
}

/// Entry in the IF/ID pipeline latch (Fetch to Decode).
#[derive(Clone, Copy, Default, Debug)]
pub struct IfIdEntry {
    /// Entry holds a live instruction.
    pub valid: bool,
    /// Program counter of the instruction.
    pub pc: u32,
    /// Raw 32-bit instruction encoding.
    pub inst: u32,
    /// Prediction made while fetching this instruction.
    pub pred: PredictionInfo,
}

/// Entry in the ID/EX pipeline latch (Decode to Execute).
#[derive(Clone, Copy, Default, Debug)]
pub struct IdExEntry {
    /// Entry holds a live instruction.
    pub valid: bool,
    /// Program counter of the instruction.
    pub pc: u32,
    /// Raw 32-bit instruction encoding (kept for trace output).
    pub inst: u32,
    /// Control signals for downstream stages.
    pub ctrl: ControlSignals,
    /// First source register index.
    pub rs1: usize,
    /// Second source register index.
    pub rs2: usize,
    /// Destination register index.
    pub rd: usize,
    /// Value read from rs1 at decode time.
    pub rv1: u32,
    /// Value read from rs2 at decode time.
    pub rv2: u32,
    /// Sign-extended immediate.
    pub imm: i32,
    /// Prediction carried from fetch, verified in Execute.
    pub pred: PredictionInfo,
}

/// Entry in the EX/MEM pipeline latch (Execute to Memory).
#[derive(Clone, Copy, Default, Debug)]
pub struct ExMemEntry {
    /// Entry holds a live instruction.
    pub valid: bool,
    /// Program counter of the instruction.
    pub pc: u32,
    /// Control signals for downstream stages.
    pub ctrl: ControlSignals,
    /// Destination register index.
    pub rd: usize,
    /// ALU result, or the memory address for loads and stores.
    pub alu: u32,
    /// Value to store (forwarded rs2).
    pub store_data: u32,
    /// Resolved branch outcome, for diagnostics and tests.
    pub pred_result: PredictionResult,
}

/// Entry in the MEM/WB pipeline latch (Memory to Writeback).
///
/// `mem_data` is the synchronous-read output of the data SRAM: the address
/// was presented one cycle earlier by the memory stage.
#[derive(Clone, Copy, Default, Debug)]
pub struct MemWbEntry {
    /// Entry holds a live instruction.
    pub valid: bool,
    /// Program counter of the instruction.
    pub pc: u32,
    /// Control signals for the writeback stage.
    pub ctrl: ControlSignals,
    /// Destination register index.
    pub rd: usize,
    /// ALU result for non-load instructions.
    pub alu: u32,
    /// Data produced by the memory read port.
    pub mem_data: u32,
}
