//! Branch History Table (BHT).
//!
//! A table of 2-bit saturating counters sharing the BTB's index function.
//! Counter states: 0 strongly not-taken, 1 weakly not-taken, 2 weakly taken,
//! 3 strongly taken. Counters start at 1 so a never-seen branch predicts
//! not-taken but flips to taken after a single observed taken outcome.

/// Counter value predicting taken at or above this threshold.
const TAKEN_THRESHOLD: u8 = 2;

/// Saturation ceiling (strongly taken).
const COUNTER_MAX: u8 = 3;

/// Reset value (weakly not-taken).
const COUNTER_INIT: u8 = 1;

/// Branch History Table of 2-bit saturating counters.
pub struct Bht {
    counters: Vec<u8>,
    size: usize,
}

impl Bht {
    /// Creates a BHT with `size` counters. `size` must be a power of 2.
    pub fn new(size: usize) -> Self {
        Self {
            counters: vec![COUNTER_INIT; size],
            size,
        }
    }

    /// Shares the BTB index function: `pc[2..]` masked to the table size.
    fn index(&self, pc: u32) -> usize {
        ((pc >> 2) as usize) & (self.size - 1)
    }

    /// True when the counter for `pc` predicts taken.
    pub fn predict_taken(&self, pc: u32) -> bool {
        self.counters[self.index(pc)] >= TAKEN_THRESHOLD
    }

    /// Steps the counter for `pc` toward the observed outcome, saturating at
    /// the ends.
    pub fn update(&mut self, pc: u32, taken: bool) {
        let idx = self.index(pc);
        let c = self.counters[idx];
        self.counters[idx] = if taken {
            (c + 1).min(COUNTER_MAX)
        } else {
            c.saturating_sub(1)
        };
    }

    /// Raw counter value for `pc`; used by tests and diagnostics.
    pub fn counter(&self, pc: u32) -> u8 {
        self.counters[self.index(pc)]
    }
}
