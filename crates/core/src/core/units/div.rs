//! Radix-4 SRT divider.
//!
//! An eighteen-cycle divide unit for DIV/DIVU/REM/REMU:
//!
//! 1. **Cycle 1:** take operand magnitudes, record result signs, apply the
//!    architectural divide-by-zero and signed-overflow results, and normalize
//!    the divisor so digit selection sees a value with its top bit set.
//! 2. **Cycles 2-17:** sixteen radix-4 iterations. Each step shifts two
//!    dividend bits into the partial remainder and selects a signed quotient
//!    digit in {-2,-1,0,+1,+2}; the digit stream accumulates in redundant
//!    (signed) form.
//! 3. **Cycle 18:** fold the redundant quotient, restore a negative partial
//!    remainder, undo the normalization shift, and apply the result signs
//!    (quotient: XOR of operand signs; remainder: sign of the dividend).
//!
//! The partial remainder starts below the normalized divisor rather than
//! below half of it, so the very first digit can reach 4; every later digit
//! stays within the redundant set.
//!
//! Like the multiplier, the unit holds one operation, stalls the front end
//! while busy, and is cancelled by a pipeline flush.

use crate::core::pipeline::signals::DivOp;
use crate::core::units::UnitResult;

/// Radix-4 iterations needed for 32 quotient bits.
const ITERATIONS: u8 = 16;

/// Internal state of the divider.
enum DivState {
    /// No operation in flight.
    Idle,
    /// Operands captured; magnitude/sign preprocessing pending.
    Setup,
    /// Iterating; two quotient bits retire per cycle.
    Iterate,
    /// Final correction and sign application pending.
    Correct,
}

/// Eighteen-cycle radix-4 SRT divide unit.
pub struct Divider {
    state: DivState,
    op: DivOp,
    rd: usize,

    /// Raw operands as issued.
    dividend: u32,
    divisor: u32,

    /// Architectural result decided during setup (divide by zero, signed
    /// overflow); delivered with the same latency as a computed result.
    special: Option<(u32, u32)>,

    /// Normalized divisor `|divisor| << shift`.
    d_norm: i64,
    /// Normalization shift amount.
    shift: u32,
    /// Low 32 bits of the normalized dividend, consumed two bits per step.
    frac: u64,
    /// Partial remainder.
    w: i64,
    /// Redundant signed-digit quotient accumulator.
    q: i64,
    /// Completed iterations.
    iter: u8,

    /// Negate the quotient at the end.
    neg_q: bool,
    /// Negate the remainder at the end.
    neg_r: bool,
}

impl Divider {
    /// Creates an idle divider.
    pub fn new() -> Self {
        Self {
            state: DivState::Idle,
            op: DivOp::Div,
            rd: 0,
            dividend: 0,
            divisor: 0,
            special: None,
            d_norm: 0,
            shift: 0,
            frac: 0,
            w: 0,
            q: 0,
            iter: 0,
            neg_q: false,
            neg_r: false,
        }
    }

    /// True while an operation is in flight.
    pub fn busy(&self) -> bool {
        !matches!(self.state, DivState::Idle)
    }

    /// Captures operands and starts a division. The caller must check
    /// `busy()` first; the unit holds a single operation.
    pub fn issue(&mut self, dividend: u32, divisor: u32, op: DivOp, rd: usize) {
        self.state = DivState::Setup;
        self.op = op;
        self.rd = rd;
        self.dividend = dividend;
        self.divisor = divisor;
        self.special = None;
        self.q = 0;
        self.iter = 0;
    }

    /// Discards the in-flight operation (pipeline flush).
    pub fn cancel(&mut self) {
        self.state = DivState::Idle;
    }

    /// Advances the unit by one cycle. Returns the result on the eighteenth
    /// cycle after issue, `None` otherwise.
    pub fn tick(&mut self) -> Option<UnitResult> {
        match self.state {
            DivState::Idle => None,
            DivState::Setup => {
                self.setup();
                self.state = DivState::Iterate;
                None
            }
            DivState::Iterate => {
                self.step();
                self.iter += 1;
                if self.iter == ITERATIONS {
                    self.state = DivState::Correct;
                }
                None
            }
            DivState::Correct => {
                let value = self.finish();
                self.state = DivState::Idle;
                Some(UnitResult {
                    rd: self.rd,
                    value,
                })
            }
        }
    }

    /// Cycle 1: signs, architectural specials, normalization.
    fn setup(&mut self) {
        let signed = matches!(self.op, DivOp::Div | DivOp::Rem);
        let a_neg = signed && (self.dividend as i32) < 0;
        let b_neg = signed && (self.divisor as i32) < 0;
        self.neg_q = a_neg != b_neg;
        self.neg_r = a_neg;

        if self.divisor == 0 {
            // Quotient all-ones, remainder the dividend.
            self.special = Some((u32::MAX, self.dividend));
        } else if signed && self.dividend == 0x8000_0000 && self.divisor == 0xFFFF_FFFF {
            // INT_MIN / -1 overflows; the quotient wraps back to INT_MIN.
            self.special = Some((0x8000_0000, 0));
        }

        let a_abs = if a_neg {
            (self.dividend as i32).unsigned_abs()
        } else {
            self.dividend
        };
        let b_abs = if b_neg {
            (self.divisor as i32).unsigned_abs()
        } else {
            self.divisor
        };

        // Normalize so the divisor's top bit is set; a zero divisor takes the
        // special path and never reaches digit selection.
        self.shift = if b_abs == 0 {
            0
        } else {
            b_abs.leading_zeros()
        };
        let n = (a_abs as u64) << self.shift;
        self.d_norm = ((b_abs as u64) << self.shift) as i64;
        self.w = (n >> 32) as i64;
        self.frac = n & 0xFFFF_FFFF;
    }

    /// One radix-4 iteration: shift in two dividend bits, select a digit,
    /// subtract, and accumulate.
    fn step(&mut self) {
        if self.special.is_some() {
            return;
        }
        let bits = ((self.frac >> 30) & 0b11) as i64;
        self.frac = (self.frac << 2) & 0xFFFF_FFFF;

        let w_pre = self.w * 4 + bits;
        // The partial remainder stays within half the divisor after every
        // step, so the digit is in {-2..2} everywhere except the first
        // iteration, where the remainder starts below the full divisor.
        let max_digit = if self.iter == 0 { 4 } else { 2 };
        let digit = nearest_digit(w_pre, self.d_norm).clamp(-2, max_digit);

        self.w = w_pre - digit * self.d_norm;
        self.q = self.q * 4 + digit;
    }

    /// Cycle 18: quotient correction and sign application.
    fn finish(&mut self) -> u32 {
        let (mut quotient, mut remainder) = if let Some(special) = self.special {
            special
        } else {
            let mut q = self.q;
            let mut w = self.w;
            if w < 0 {
                w += self.d_norm;
                q -= 1;
            }
            (q as u32, ((w as u64) >> self.shift) as u32)
        };

        if self.special.is_none() {
            if self.neg_q {
                quotient = quotient.wrapping_neg();
            }
            if self.neg_r {
                remainder = remainder.wrapping_neg();
            }
        }

        match self.op {
            DivOp::Div | DivOp::Divu => quotient,
            DivOp::Rem | DivOp::Remu => remainder,
        }
    }
}

impl Default for Divider {
    fn default() -> Self {
        Self::new()
    }
}

/// Rounds `w / d` to the nearest integer (`d > 0`), ties away from zero.
fn nearest_digit(w: i64, d: i64) -> i64 {
    if w >= 0 {
        (2 * w + d) / (2 * d)
    } else {
        -((2 * -w + d) / (2 * d))
    }
}
