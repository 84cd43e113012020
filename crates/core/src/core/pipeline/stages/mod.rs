//! Pipeline stage implementations.
//!
//! This module contains the five stages of the instruction pipeline:
//! 1. **Fetch:** Retrieves instructions from memory and consults the predictor.
//! 2. **Decode:** Produces control signals and reads operands.
//! 3. **Execute:** ALU/branch/multiply/divide execution and prediction checks.
//! 4. **Memory:** Data load and store operations.
//! 5. **Writeback:** Commits results to the register file.
//!
//! Each stage is a function over the cycle-start state that *returns* its
//! next latch value; the cycle driver commits every latch at once, so a
//! stage never observes a same-cycle update from another stage.

/// Instruction decode stage implementation.
pub mod decode;
/// Instruction execute stage implementation.
pub mod execute;
/// Instruction fetch stage implementation.
pub mod fetch;
/// Memory access stage implementation.
pub mod memory;
/// Writeback stage implementation.
pub mod writeback;

/// Decode stage entry point (ID stage).
pub use decode::decode_stage;
/// Execute stage entry point (EX stage).
pub use execute::{execute_stage, ExOutcome};
/// Fetch stage entry point (IF stage).
pub use fetch::fetch_stage;
/// Memory stage entry point (MEM stage).
pub use memory::mem_stage;
/// Writeback stage entry point (WB stage).
pub use writeback::writeback_stage;
