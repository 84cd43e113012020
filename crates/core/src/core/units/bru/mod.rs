//! Branch prediction unit (BRU).
//!
//! A direction predictor (64-entry table of 2-bit saturating counters) paired
//! with a branch target buffer of the same geometry. Fetch reads both; the
//! hazard unit writes both when a branch resolves in Execute. A read in the
//! same cycle as a write to the same entry observes the pre-write state,
//! because fetch runs before the predictor commit.

/// Per-entry 2-bit saturating direction counters.
pub mod bht;
/// Branch Target Buffer storing resolved branch targets.
pub mod btb;

use crate::common::constants::WORD_BYTES;
use crate::core::pipeline::latches::PredictionInfo;
use bht::Bht;
use btb::Btb;

/// Combined BTB + BHT branch predictor.
pub struct BranchPredictor {
    btb: Btb,
    bht: Bht,
}

impl BranchPredictor {
    /// Creates a predictor with `entries` BTB/BHT slots (power of two).
    pub fn new(entries: usize) -> Self {
        Self {
            btb: Btb::new(entries),
            bht: Bht::new(entries),
        }
    }

    /// Predicts the instruction following `pc`.
    ///
    /// The prediction redirects fetch only when the BTB holds a valid entry
    /// *and* the direction counter says taken; in every other case the
    /// predicted next PC is the fall-through.
    pub fn predict(&self, pc: u32) -> PredictionInfo {
        let btb_hit = self.btb.is_valid(pc);
        let taken = self.bht.predict_taken(pc);
        let predicted_pc = match self.btb.lookup(pc) {
            Some(target) if taken => target,
            _ => pc.wrapping_add(WORD_BYTES),
        };
        PredictionInfo {
            btb_hit,
            taken,
            predicted_pc,
        }
    }

    /// Records the resolved outcome of a branch at `pc`.
    ///
    /// Installs the actual target unconditionally and steps the direction
    /// counter toward the observed outcome.
    pub fn update(&mut self, pc: u32, taken: bool, target: u32) {
        self.btb.update(pc, target);
        self.bht.update(pc, taken);
    }

    /// Direct counter access for tests and diagnostics.
    pub fn counter(&self, pc: u32) -> u8 {
        self.bht.counter(pc)
    }
}
