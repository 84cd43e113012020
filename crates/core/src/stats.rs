//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the pipeline model. It provides:
//! 1. **Cycle and CPI:** Total cycles, retired instructions, and derived CPI.
//! 2. **Instruction mix:** Counts by category (ALU, load, store, branch, jump,
//!    multiply, divide).
//! 3. **Branch prediction:** Correct predictions, mispredictions, and accuracy.
//! 4. **Stalls and flushes:** Stall cycles by cause and pipeline flush count.

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone, Debug, Default)]
pub struct SimStats {
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Number of instructions committed in writeback.
    pub instructions_retired: u64,

    /// Count of ALU (non-memory, non-control) instructions retired.
    pub inst_alu: u64,
    /// Count of load instructions retired.
    pub inst_load: u64,
    /// Count of store instructions retired.
    pub inst_store: u64,
    /// Count of conditional branch instructions retired.
    pub inst_branch: u64,
    /// Count of JAL/JALR instructions retired.
    pub inst_jump: u64,
    /// Count of multiply instructions retired.
    pub inst_mul: u64,
    /// Count of divide/remainder instructions retired.
    pub inst_div: u64,

    /// Number of branch predictions that were correct.
    pub branch_predictions: u64,
    /// Number of branch predictions that were wrong.
    pub branch_mispredictions: u64,

    /// Stall cycles caused by load-use hazards.
    pub stalls_load_use: u64,
    /// Stall cycles spent waiting on the multiplier.
    pub stalls_mul: u64,
    /// Stall cycles spent waiting on the divider.
    pub stalls_div: u64,
    /// Number of pipeline flushes (mispredicts plus unconditional redirects).
    pub flushes: u64,
}

impl SimStats {
    /// Cycles per retired instruction, or zero before anything retires.
    pub fn cpi(&self) -> f64 {
        if self.instructions_retired == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions_retired as f64
        }
    }

    /// Fraction of branch predictions that were correct, in [0, 1].
    pub fn branch_accuracy(&self) -> f64 {
        let total = self.branch_predictions + self.branch_mispredictions;
        if total == 0 {
            0.0
        } else {
            self.branch_predictions as f64 / total as f64
        }
    }

    /// Prints the full statistics report to stdout.
    pub fn print(&self) {
        println!("==================== Simulation Statistics ====================");
        println!("Cycles:              {}", self.cycles);
        println!("Instructions:        {}", self.instructions_retired);
        println!("CPI:                 {:.3}", self.cpi());
        println!();
        println!("Instruction mix:");
        println!("  ALU:               {}", self.inst_alu);
        println!("  Load:              {}", self.inst_load);
        println!("  Store:             {}", self.inst_store);
        println!("  Branch:            {}", self.inst_branch);
        println!("  Jump:              {}", self.inst_jump);
        println!("  Multiply:          {}", self.inst_mul);
        println!("  Divide:            {}", self.inst_div);
        println!();
        println!("Branch prediction:");
        println!("  Correct:           {}", self.branch_predictions);
        println!("  Mispredicted:      {}", self.branch_mispredictions);
        println!("  Accuracy:          {:.1}%", self.branch_accuracy() * 100.0);
        println!();
        println!("Stalls and flushes:");
        println!("  Load-use stalls:   {}", self.stalls_load_use);
        println!("  Multiplier stalls: {}", self.stalls_mul);
        println!("  Divider stalls:    {}", self.stalls_div);
        println!("  Flushes:           {}", self.flushes);
        println!("===============================================================");
    }
}
