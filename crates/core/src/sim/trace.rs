//! Trace sink and cycle-stamped logging.
//!
//! The core never owns an output stream directly: every log line goes through
//! a [`TraceSink`] injected by the harness. The default sink writes to
//! stderr. Each entry is prefixed with the cycle number and a stage tag so a
//! run can be replayed against the pipeline diagram.

use std::fmt;

/// Destination for trace lines.
///
/// Implementations receive fully formatted single lines without a trailing
/// newline.
pub trait TraceSink {
    /// Emits one line of trace output.
    fn line(&mut self, text: &str);
}

/// Default sink: one line per entry on stderr.
pub struct StderrSink;

impl TraceSink for StderrSink {
    fn line(&mut self, text: &str) {
        eprintln!("{}", text);
    }
}

/// Cycle-stamped logger over an injected sink.
///
/// Per-stage trace lines are gated by the enable flag; warnings and the
/// final result line always reach the sink.
pub struct Tracer {
    enabled: bool,
    sink: Box<dyn TraceSink>,
}

impl Tracer {
    /// Creates a tracer writing to stderr.
    pub fn new(enabled: bool) -> Self {
        Self::with_sink(enabled, Box::new(StderrSink))
    }

    /// Creates a tracer over a caller-provided sink.
    pub fn with_sink(enabled: bool, sink: Box<dyn TraceSink>) -> Self {
        Self { enabled, sink }
    }

    /// True when per-stage tracing is on. Callers use this to skip building
    /// trace strings on the fast path.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Emits a cycle-stamped, stage-tagged trace line. No-op when disabled.
    pub fn log(&mut self, cycle: u64, stage: &str, msg: fmt::Arguments<'_>) {
        if self.enabled {
            self.sink
                .line(&format!("[{:>8}] {:<4} {}", cycle, stage, msg));
        }
    }

    /// Emits a line regardless of the enable flag (warnings, final result).
    pub fn announce(&mut self, cycle: u64, stage: &str, msg: fmt::Arguments<'_>) {
        self.sink
            .line(&format!("[{:>8}] {:<4} {}", cycle, stage, msg));
    }
}

impl fmt::Debug for Tracer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tracer")
            .field("enabled", &self.enabled)
            .finish()
    }
}
