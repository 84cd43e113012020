//! Runtime fault definitions.
//!
//! This module defines the faults that stop the machine. It provides:
//! 1. **Fault Representation:** Misaligned and out-of-bounds memory accesses,
//!    plus the cycle-budget backstop.
//! 2. **Error Handling:** Integration with the standard Rust error traits so
//!    faults propagate with `?` and print as one-line diagnostics.
//!
//! Divide-by-zero and signed division overflow are *not* faults; both have
//! architecturally defined results and the divider produces them silently.

use std::fmt;

/// Faults that terminate simulation.
///
/// A fault surfaces from [`crate::core::Cpu::tick`] and carries enough context
/// to print a one-line diagnostic. None of these are recoverable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fault {
    /// A load touched an address that is not aligned to its access width.
    /// The associated value is the offending byte address.
    LoadAddressMisaligned(u32),

    /// A store touched an address that is not aligned to its access width.
    /// The associated value is the offending byte address.
    StoreAddressMisaligned(u32),

    /// A load fell outside the data memory. The associated value is the
    /// offending byte address.
    LoadOutOfBounds(u32),

    /// A store fell outside the data memory. The associated value is the
    /// offending byte address.
    StoreOutOfBounds(u32),

    /// The program counter left the instruction memory. The associated value
    /// is the faulting PC.
    FetchOutOfBounds(u32),

    /// The configured cycle budget ran out before the halt sentinel was
    /// fetched. The associated value is the budget that was exceeded.
    CycleLimitExceeded(u64),
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fault::LoadAddressMisaligned(addr) => {
                write!(f, "misaligned load address {:#010x}", addr)
            }
            Fault::StoreAddressMisaligned(addr) => {
                write!(f, "misaligned store address {:#010x}", addr)
            }
            Fault::LoadOutOfBounds(addr) => {
                write!(f, "load address {:#010x} outside data memory", addr)
            }
            Fault::StoreOutOfBounds(addr) => {
                write!(f, "store address {:#010x} outside data memory", addr)
            }
            Fault::FetchOutOfBounds(pc) => {
                write!(f, "fetch address {:#010x} outside instruction memory", pc)
            }
            Fault::CycleLimitExceeded(limit) => {
                write!(f, "cycle limit of {} exceeded without reaching the halt sentinel", limit)
            }
        }
    }
}

impl std::error::Error for Fault {}
