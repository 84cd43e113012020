//! Trace sink tests.
//!
//! The core writes every log line through the injected sink; these tests
//! check the cycle/stage prefix, the always-on warning and finish lines, and
//! that a disabled tracer stays quiet on the per-stage paths.

use std::sync::{Arc, Mutex};

use mockall::mock;
use rv32sim_core::config::Config;
use rv32sim_core::sim::trace::{TraceSink, Tracer};
use rv32sim_core::Simulator;

use crate::common::builder::instruction::*;

mock! {
    pub Sink {}
    impl TraceSink for Sink {
        fn line(&mut self, text: &str);
    }
}

/// Sink that shares its captured lines with the test body.
#[derive(Clone, Default)]
struct SharedSink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl TraceSink for SharedSink {
    fn line(&mut self, text: &str) {
        self.lines.lock().unwrap().push(text.to_string());
    }
}

/// Builds a simulator over the given sink.
fn sim_with_sink(trace: bool, sink: Box<dyn TraceSink>) -> Simulator {
    let config = Config::default();
    Simulator::with_tracer(&config, Tracer::with_sink(trace, sink))
}

#[test]
fn finish_line_is_emitted_exactly_once() {
    let mut mock = MockSink::new();
    mock.expect_line()
        .withf(|text| text.contains("Finish Execution. The result is 5"))
        .times(1)
        .return_const(());

    let mut sim = sim_with_sink(false, Box::new(mock));
    sim.load_program(&[addi(10, 0, 5), halt()]);
    assert_eq!(sim.run().unwrap(), 5);
}

#[test]
fn unknown_instruction_warns_even_without_trace() {
    let sink = SharedSink::default();
    let lines = sink.lines.clone();

    let mut sim = sim_with_sink(false, Box::new(sink));
    // An unused opcode, then a clean halt.
    sim.load_program(&[0x0000_00FF, addi(10, 0, 1), halt()]);
    assert_eq!(sim.run().unwrap(), 1);

    let lines = lines.lock().unwrap();
    let warnings: Vec<_> = lines.iter().filter(|l| l.contains("warning")).collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("0x000000ff"));
    assert!(warnings[0].contains("treated as nop"));
}

#[test]
fn stage_lines_carry_cycle_and_tag() {
    let sink = SharedSink::default();
    let lines = sink.lines.clone();

    let mut sim = sim_with_sink(true, Box::new(sink));
    sim.load_program(&[addi(10, 0, 2), halt()]);
    sim.run().unwrap();

    let lines = lines.lock().unwrap();
    assert!(lines.iter().any(|l| l.contains("IF")));
    assert!(lines.iter().any(|l| l.contains("ID")));
    assert!(lines.iter().any(|l| l.contains("EX")));
    assert!(lines.iter().any(|l| l.contains("WB")));
    // Every line is cycle-stamped.
    assert!(lines.iter().all(|l| l.trim_start().starts_with('[')));
}

#[test]
fn disabled_tracer_emits_only_announcements() {
    let sink = SharedSink::default();
    let lines = sink.lines.clone();

    let mut sim = sim_with_sink(false, Box::new(sink));
    sim.load_program(&[addi(10, 0, 3), halt()]);
    sim.run().unwrap();

    let lines = lines.lock().unwrap();
    assert_eq!(lines.len(), 1, "only the finish line: {:?}", *lines);
}
