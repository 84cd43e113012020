//! Test harness around the simulator.

use rv32sim_core::config::Config;
use rv32sim_core::sim::trace::Tracer;
use rv32sim_core::{Cpu, Simulator};

/// Wraps a simulator with helpers for loading programs and running cycles.
pub struct TestContext {
    pub sim: Simulator,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    /// Builds a context with the default configuration and tracing off.
    pub fn new() -> Self {
        let config = Config::default();
        Self {
            sim: Simulator::new(&config),
        }
    }

    /// Builds a context with a custom configuration.
    pub fn with_config(config: &Config) -> Self {
        Self {
            sim: Simulator::new(config),
        }
    }

    /// Builds a context with a custom tracer.
    pub fn with_tracer(config: &Config, tracer: Tracer) -> Self {
        Self {
            sim: Simulator::with_tracer(config, tracer),
        }
    }

    /// Convenience accessor for the CPU.
    pub fn cpu(&self) -> &Cpu {
        &self.sim.cpu
    }

    /// Mutable convenience accessor for the CPU.
    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.sim.cpu
    }

    /// Loads a sequence of instruction words at word address 0.
    pub fn load_program(mut self, instructions: &[u32]) -> Self {
        self.sim.load_program(instructions);
        self
    }

    /// Sets a general-purpose register value.
    pub fn set_reg(&mut self, reg: usize, val: u32) {
        self.sim.cpu.regs.write(reg, val);
    }

    /// Reads a general-purpose register value.
    pub fn get_reg(&self, reg: usize) -> u32 {
        self.sim.cpu.regs.read(reg)
    }

    /// Runs for a fixed number of cycles, failing the test on any fault.
    pub fn run(&mut self, cycles: u64) {
        for _ in 0..cycles {
            if self.sim.cpu.exit_code().is_some() {
                break;
            }
            self.sim.tick().expect("unexpected fault");
        }
    }

    /// Runs until the halt sentinel fires and returns the value of `a0`.
    pub fn run_to_halt(&mut self) -> u32 {
        self.sim.run().expect("program did not halt cleanly")
    }
}
