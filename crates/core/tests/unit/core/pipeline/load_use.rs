//! Load-use hazard tests.
//!
//! A consumer directly behind a load must stall one cycle and then pick the
//! loaded value off the MEM/WB bypass, never a stale register value.

use crate::common::builder::instruction::*;
use crate::common::TestContext;

#[test]
fn immediate_consumer_sees_loaded_value() {
    let mut ctx = TestContext::new().load_program(&[
        addi(1, 0, 77),
        sw(1, 0, 0),
        lw(2, 0, 0),
        add(3, 2, 2), // consumer directly behind the load
        halt(),
    ]);
    // Poison the target register so a missed stall is visible.
    ctx.set_reg(2, 0xDEAD);
    ctx.run_to_halt();
    assert_eq!(ctx.get_reg(2), 77);
    assert_eq!(ctx.get_reg(3), 154);
    assert!(
        ctx.cpu().stats.stalls_load_use >= 1,
        "the consumer must have stalled"
    );
}

#[test]
fn consumer_two_behind_needs_no_stall() {
    let mut ctx = TestContext::new().load_program(&[
        addi(1, 0, 5),
        sw(1, 0, 8),
        lw(2, 0, 8),
        nop(),
        add(3, 2, 0), // one bubble between load and use
        halt(),
    ]);
    ctx.run_to_halt();
    assert_eq!(ctx.get_reg(3), 5);
    assert_eq!(ctx.cpu().stats.stalls_load_use, 0);
}

#[test]
fn branch_behind_load_stalls_then_resolves() {
    let mut ctx = TestContext::new().load_program(&[
        addi(1, 0, 1),
        sw(1, 0, 4),
        lw(2, 0, 4),
        beq(2, 1, 8), // depends on the load; taken skips the poison write
        addi(3, 0, 99),
        halt(),
    ]);
    ctx.run_to_halt();
    assert_eq!(ctx.get_reg(3), 0);
    assert!(ctx.cpu().stats.stalls_load_use >= 1);
}

#[test]
fn load_into_x0_does_not_stall() {
    let mut ctx = TestContext::new().load_program(&[
        sw(0, 0, 0),
        lw(0, 0, 0),
        add(3, 0, 0),
        halt(),
    ]);
    ctx.run_to_halt();
    assert_eq!(ctx.cpu().stats.stalls_load_use, 0);
}
