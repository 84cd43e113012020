//! rv32sim command-line front end.
//!
//! This binary loads an instruction image and a data image, runs the
//! pipeline model to completion, and reports the result:
//! 1. **Halt:** prints the finish line with the value of `a0` and exits 0.
//! 2. **Fault:** prints a diagnostic and the register file, and exits 1.
//! 3. **Bad image:** prints the parse error and exits 2 without simulating.

use clap::Parser;
use std::path::PathBuf;
use std::process;

use rv32sim_core::config::Config;
use rv32sim_core::Simulator;

#[derive(Parser, Debug)]
#[command(
    name = "rv32sim",
    author,
    version,
    about = "Cycle-accurate RV32IM five-stage pipeline simulator",
    long_about = "Runs a program image against a cycle-accurate model of a five-stage \
in-order RV32IM pipeline with branch prediction and multi-cycle multiply/divide.\n\n\
Images are plain text, one hexadecimal word per line (optional 0x prefix, blank \
lines and # comments ignored).\n\nExamples:\n  rv32sim program.hex data.hex\n  \
rv32sim program.hex data.hex --trace --max-cycles 50000"
)]
struct Cli {
    /// Instruction image: one hex word per line, loaded from word address 0.
    instruction_image: PathBuf,

    /// Data image: one hex word per line, loaded from data word address 0.
    data_image: PathBuf,

    /// Cycle budget; the run fails once it is exceeded.
    #[arg(long)]
    max_cycles: Option<u64>,

    /// Print a cycle-stamped trace of every pipeline stage to stderr.
    #[arg(long)]
    trace: bool,

    /// Dump the register file after the run halts.
    #[arg(long)]
    dump_regs_on_halt: bool,

    /// Print the statistics report after the run halts.
    #[arg(long)]
    stats: bool,

    /// JSON configuration file; command-line flags override its fields.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => load_config(path),
        None => Config::default(),
    };
    config.general.trace |= cli.trace;
    config.general.dump_regs_on_halt |= cli.dump_regs_on_halt;
    if let Some(max_cycles) = cli.max_cycles {
        config.general.max_cycles = max_cycles;
    }

    let mut sim = Simulator::new(&config);

    if let Err(e) = sim.load_instruction_image(&cli.instruction_image) {
        eprintln!("rv32sim: {}", e);
        process::exit(2);
    }
    if let Err(e) = sim.load_data_image(&cli.data_image) {
        eprintln!("rv32sim: {}", e);
        process::exit(2);
    }

    match sim.run() {
        Ok(result) => {
            println!("Finish Execution. The result is {}", result);
            if config.general.dump_regs_on_halt {
                sim.cpu.dump_state();
            }
            if cli.stats {
                sim.cpu.stats.print();
            }
        }
        Err(fault) => {
            eprintln!("rv32sim: fault: {}", fault);
            sim.cpu.dump_state();
            if cli.stats {
                sim.cpu.stats.print();
            }
            process::exit(1);
        }
    }
}

/// Reads and deserializes a JSON configuration file, exiting on failure.
fn load_config(path: &PathBuf) -> Config {
    let text = std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("rv32sim: cannot read config '{}': {}", path.display(), e);
        process::exit(2);
    });
    serde_json::from_str(&text).unwrap_or_else(|e| {
        eprintln!("rv32sim: bad config '{}': {}", path.display(), e);
        process::exit(2);
    })
}
