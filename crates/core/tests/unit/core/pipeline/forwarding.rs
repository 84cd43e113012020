//! Operand forwarding tests.
//!
//! Back-to-back dependent instructions must observe each other's results
//! through the bypass network, never a stale register value.

use crate::common::builder::instruction::*;
use crate::common::TestContext;

#[test]
fn result_forwards_to_the_next_instruction() {
    let mut ctx = TestContext::new().load_program(&[
        addi(1, 0, 5),
        addi(2, 1, 6), // needs x1 from EX/MEM
        halt(),
    ]);
    ctx.run_to_halt();
    assert_eq!(ctx.get_reg(2), 11);
}

#[test]
fn both_operands_forward_from_different_stages() {
    let mut ctx = TestContext::new().load_program(&[
        addi(1, 0, 5),
        addi(2, 1, 6),  // x2 = 11 (x1 via EX/MEM)
        add(3, 1, 2),   // x1 via MEM/WB, x2 via EX/MEM
        halt(),
    ]);
    ctx.run_to_halt();
    assert_eq!(ctx.get_reg(3), 16);
}

#[test]
fn younger_value_wins_over_older() {
    let mut ctx = TestContext::new().load_program(&[
        addi(1, 0, 10),
        addi(1, 0, 20),
        add(2, 1, 0), // must see 20 from EX/MEM, not 10 from MEM/WB
        halt(),
    ]);
    ctx.run_to_halt();
    assert_eq!(ctx.get_reg(2), 20);
}

#[test]
fn x0_is_never_forwarded() {
    let mut ctx = TestContext::new().load_program(&[
        addi(0, 0, 99), // write to x0 is discarded
        add(2, 0, 0),   // must read 0, not a forwarded 99
        halt(),
    ]);
    ctx.run_to_halt();
    assert_eq!(ctx.get_reg(0), 0);
    assert_eq!(ctx.get_reg(2), 0);
}

#[test]
fn store_data_uses_forwarded_value() {
    let mut ctx = TestContext::new().load_program(&[
        addi(1, 0, 0x77),
        sw(1, 0, 0), // store data forwarded from EX/MEM
        lw(2, 0, 0),
        halt(),
    ]);
    ctx.run_to_halt();
    assert_eq!(ctx.get_reg(2), 0x77);
}

#[test]
fn branch_compares_forwarded_operands() {
    // The branch depends on the addi immediately ahead of it; without
    // forwarding it would compare a stale zero and fall through.
    let mut ctx = TestContext::new().load_program(&[
        addi(1, 0, 1),
        bne(1, 0, 8), // taken: skip the poison write
        addi(2, 0, 99),
        halt(),
    ]);
    ctx.run_to_halt();
    assert_eq!(ctx.get_reg(2), 0);
}
