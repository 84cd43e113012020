//! Top-level driver: owns the CPU, the cycle budget, and image installation.

use std::path::Path;

use crate::common::Fault;
use crate::config::Config;
use crate::core::Cpu;
use crate::sim::loader::{self, ImageError};
use crate::sim::trace::Tracer;

/// Top-level simulator: CPU state plus the run policy around it.
pub struct Simulator {
    /// The processor model.
    pub cpu: Cpu,
    max_cycles: u64,
}

impl Simulator {
    /// Creates a simulator from a configuration, tracing to stderr.
    pub fn new(config: &Config) -> Self {
        Self::with_tracer(config, Tracer::new(config.general.trace))
    }

    /// Creates a simulator with a caller-provided trace sink.
    pub fn with_tracer(config: &Config, tracer: Tracer) -> Self {
        Self {
            cpu: Cpu::new(config, tracer),
            max_cycles: config.general.max_cycles,
        }
    }

    /// Loads an instruction image file into instruction memory.
    pub fn load_instruction_image(&mut self, path: &Path) -> Result<usize, ImageError> {
        let words = loader::load_hex_image(path)?;
        loader::check_capacity(&words, self.cpu.imem.depth(), path)?;
        Ok(self.cpu.imem.load(&words))
    }

    /// Loads a data image file into data memory.
    pub fn load_data_image(&mut self, path: &Path) -> Result<usize, ImageError> {
        let words = loader::load_hex_image(path)?;
        loader::check_capacity(&words, self.cpu.dmem.depth(), path)?;
        Ok(self.cpu.dmem.load(&words))
    }

    /// Installs an in-memory program, for tests and embedding.
    pub fn load_program(&mut self, words: &[u32]) {
        self.cpu.imem.load(words);
    }

    /// Advances one cycle, enforcing the cycle budget.
    pub fn tick(&mut self) -> Result<(), Fault> {
        if self.cpu.stats.cycles >= self.max_cycles {
            return Err(Fault::CycleLimitExceeded(self.max_cycles));
        }
        self.cpu.tick()
    }

    /// Runs until the halt sentinel fires, returning the value of `a0`.
    pub fn run(&mut self) -> Result<u32, Fault> {
        loop {
            self.tick()?;
            if let Some(result) = self.cpu.exit_code() {
                return Ok(result);
            }
        }
    }

    /// Result register value once halted.
    pub fn take_exit(&mut self) -> Option<u32> {
        self.cpu.exit_code()
    }
}
