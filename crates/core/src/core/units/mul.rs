//! Wallace-tree multiplier.
//!
//! A three-cycle multiply unit for MUL/MULH/MULHSU/MULHU. The datapath
//! mirrors a carry-save hardware tree operating on 33-bit operands (32 data
//! bits plus a sign bit so every variant reduces to one signed x signed
//! scheme):
//!
//! 1. **Cycle 1:** generate the partial-product rows and compress them to at
//!    most 10 rows with layers of 3:2 carry-save adders.
//! 2. **Cycle 2:** compress the 10 rows down to a sum/carry pair.
//! 3. **Cycle 3:** 66-bit final addition, then select the low word (MUL) or
//!    the high word (MULH family).
//!
//! The unit holds exactly one operation in flight; the hazard unit stalls the
//! front end while it is busy. A pipeline flush cancels the in-flight work.
//!
//! All row arithmetic is carried out modulo 2^66. The sign-bit row enters the
//! tree two's-complement negated (weight -2^32 in a 33-bit operand), which
//! makes the truncated sum exact for every signedness variant.

use crate::core::pipeline::signals::MulOp;
use crate::core::units::UnitResult;

/// Width of the carry-save rows: a 33x33-bit product needs 66 bits.
const ROW_BITS: u32 = 66;

/// Mask selecting the low 66 bits of a row.
const ROW_MASK: u128 = (1 << ROW_BITS) - 1;

/// Rows remaining after the first compression cycle.
const STAGE1_ROWS: usize = 10;

/// Internal pipeline state of the multiplier.
enum MulState {
    /// No operation in flight.
    Idle,
    /// Operands captured at issue; partial products not yet generated.
    Operands { a: u32, b: u32 },
    /// After cycle 1: at most ten carry-save rows.
    Compressed { rows: [u128; STAGE1_ROWS] },
    /// After cycle 2: the final sum/carry pair.
    SumCarry { sum: u128, carry: u128 },
}

/// Three-cycle Wallace-tree multiply unit.
pub struct Multiplier {
    state: MulState,
    op: MulOp,
    rd: usize,
}

impl Multiplier {
    /// Creates an idle multiplier.
    pub fn new() -> Self {
        Self {
            state: MulState::Idle,
            op: MulOp::Mul,
            rd: 0,
        }
    }

    /// True while an operation is in flight.
    pub fn busy(&self) -> bool {
        !matches!(self.state, MulState::Idle)
    }

    /// Captures operands and starts a multiply. The caller must check
    /// `busy()` first; the unit holds a single operation.
    pub fn issue(&mut self, a: u32, b: u32, op: MulOp, rd: usize) {
        self.state = MulState::Operands { a, b };
        self.op = op;
        self.rd = rd;
    }

    /// Discards the in-flight operation (pipeline flush).
    pub fn cancel(&mut self) {
        self.state = MulState::Idle;
    }

    /// Advances the unit by one cycle. Returns the result on the third
    /// cycle after issue, `None` otherwise.
    pub fn tick(&mut self) -> Option<UnitResult> {
        match std::mem::replace(&mut self.state, MulState::Idle) {
            MulState::Idle => None,
            MulState::Operands { a, b } => {
                let rows = generate_rows(a, b, self.op);
                let compressed = compress_to(rows, STAGE1_ROWS);
                let mut fixed = [0u128; STAGE1_ROWS];
                fixed[..compressed.len()].copy_from_slice(&compressed);
                self.state = MulState::Compressed { rows: fixed };
                None
            }
            MulState::Compressed { rows } => {
                let pair = compress_to(rows.to_vec(), 2);
                self.state = MulState::SumCarry {
                    sum: pair[0],
                    carry: pair.get(1).copied().unwrap_or(0),
                };
                None
            }
            MulState::SumCarry { sum, carry } => {
                let total = (sum + carry) & ROW_MASK;
                let product = total as u64;
                let value = match self.op {
                    MulOp::Mul => product as u32,
                    MulOp::Mulh | MulOp::Mulhsu | MulOp::Mulhu => (product >> 32) as u32,
                };
                Some(UnitResult {
                    rd: self.rd,
                    value,
                })
            }
        }
    }
}

impl Default for Multiplier {
    fn default() -> Self {
        Self::new()
    }
}

/// Generates the 33 partial-product rows for `a * b` under the given
/// signedness variant.
///
/// Operand `a` is extended to a 66-bit two's-complement row; operand `b` is
/// extended to 33 bits. Rows 0..=31 are plain shifted copies gated by the
/// low bits of `b`; row 32 is the *negated* shifted copy because bit 32 of a
/// 33-bit two's-complement value carries weight -2^32. For the unsigned
/// variants bit 32 is clear and the row never fires.
fn generate_rows(a: u32, b: u32, op: MulOp) -> Vec<u128> {
    let a_signed = matches!(op, MulOp::Mul | MulOp::Mulh | MulOp::Mulhsu);
    let b_signed = matches!(op, MulOp::Mul | MulOp::Mulh);

    let a_ext: u128 = if a_signed {
        (a as i32 as i128 as u128) & ROW_MASK
    } else {
        a as u128
    };
    let b_ext: u64 = if b_signed {
        (b as i32 as i64 as u64) & 0x1_FFFF_FFFF
    } else {
        b as u64
    };

    let mut rows = Vec::with_capacity(33);
    for i in 0..32 {
        if (b_ext >> i) & 1 != 0 {
            rows.push((a_ext << i) & ROW_MASK);
        } else {
            rows.push(0);
        }
    }
    if (b_ext >> 32) & 1 != 0 {
        rows.push((a_ext << 32).wrapping_neg() & ROW_MASK);
    } else {
        rows.push(0);
    }
    rows
}

/// One 3:2 carry-save adder: three rows in, sum and shifted carry out.
fn csa(a: u128, b: u128, c: u128) -> (u128, u128) {
    let sum = a ^ b ^ c;
    let carry = ((a & b) | (a & c) | (b & c)) << 1;
    (sum & ROW_MASK, carry & ROW_MASK)
}

/// Applies 3:2 compression layers until at most `target` rows remain.
fn compress_to(mut rows: Vec<u128>, target: usize) -> Vec<u128> {
    while rows.len() > target {
        let mut next = Vec::with_capacity(rows.len() * 2 / 3 + 1);
        let mut chunks = rows.chunks_exact(3);
        for chunk in &mut chunks {
            let (sum, carry) = csa(chunk[0], chunk[1], chunk[2]);
            next.push(sum);
            next.push(carry);
        }
        next.extend_from_slice(chunks.remainder());
        rows = next;
    }
    rows
}
