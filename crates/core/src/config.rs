//! Configuration system for the simulator.
//!
//! This module defines all configuration structures used to parameterize the
//! simulator. It provides:
//! 1. **Defaults:** Baseline hardware constants (memory depths, predictor size,
//!    cycle budget).
//! 2. **Structures:** Hierarchical config for general, memory, and pipeline
//!    settings.
//!
//! Configuration is supplied as JSON (CLI `--config`) or via `Config::default()`.
//! Command-line flags override individual fields after deserialization.

use serde::Deserialize;

/// Default configuration constants for the simulator.
mod defaults {
    /// Depth of the instruction memory in 32-bit words (8 KiB of text).
    pub const IMEM_WORDS: usize = 2048;

    /// Depth of the data memory in 32-bit words (256 KiB).
    pub const DMEM_WORDS: usize = 65536;

    /// Number of BTB/BHT entries. Must be a power of two; the index is taken
    /// from the low PC bits above the word offset.
    pub const BTB_ENTRIES: usize = 64;

    /// Cycle budget before a run is declared hung.
    pub const MAX_CYCLES: u64 = 1_000_000;
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use rv32sim_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.general.max_cycles, 1_000_000);
/// assert_eq!(config.pipeline.btb_entries, 64);
/// ```
///
/// Deserializing from JSON:
///
/// ```
/// use rv32sim_core::config::Config;
///
/// let json = r#"{
///     "general": { "trace": true, "max_cycles": 5000 },
///     "memory": { "imem_words": 1024, "dmem_words": 16384 },
///     "pipeline": { "btb_entries": 64 }
/// }"#;
///
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert!(config.general.trace);
/// assert_eq!(config.memory.dmem_words, 16384);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Memory depth configuration.
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Pipeline and branch predictor configuration.
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

/// General simulation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Enable per-stage trace output.
    #[serde(default)]
    pub trace: bool,

    /// Cycle budget; exceeding it is a fault.
    #[serde(default = "GeneralConfig::default_max_cycles")]
    pub max_cycles: u64,

    /// Dump the register file when the run halts.
    #[serde(default)]
    pub dump_regs_on_halt: bool,
}

impl GeneralConfig {
    /// Returns the default cycle budget.
    fn default_max_cycles() -> u64 {
        defaults::MAX_CYCLES
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace: false,
            max_cycles: defaults::MAX_CYCLES,
            dump_regs_on_halt: false,
        }
    }
}

/// Memory depth configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Instruction memory depth in words.
    #[serde(default = "MemoryConfig::default_imem_words")]
    pub imem_words: usize,

    /// Data memory depth in words.
    #[serde(default = "MemoryConfig::default_dmem_words")]
    pub dmem_words: usize,
}

impl MemoryConfig {
    /// Returns the default instruction memory depth.
    fn default_imem_words() -> usize {
        defaults::IMEM_WORDS
    }

    /// Returns the default data memory depth.
    fn default_dmem_words() -> usize {
        defaults::DMEM_WORDS
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            imem_words: defaults::IMEM_WORDS,
            dmem_words: defaults::DMEM_WORDS,
        }
    }
}

/// Pipeline and branch predictor configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Number of BTB/BHT entries (power of two).
    #[serde(default = "PipelineConfig::default_btb_entries")]
    pub btb_entries: usize,
}

impl PipelineConfig {
    /// Returns the default BTB/BHT entry count.
    fn default_btb_entries() -> usize {
        defaults::BTB_ENTRIES
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            btb_entries: defaults::BTB_ENTRIES,
        }
    }
}
