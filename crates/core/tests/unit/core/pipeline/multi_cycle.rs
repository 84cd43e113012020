//! Multi-cycle unit integration tests.
//!
//! The multiplier holds the front end for its three execute cycles and the
//! divider for its eighteen; in both cases the result must reach dependent
//! instructions through the normal bypass network.

use crate::common::builder::instruction::*;
use crate::common::TestContext;

#[test]
fn multiply_stalls_front_end_for_its_latency() {
    let mut ctx = TestContext::new().load_program(&[
        addi(5, 0, 7),
        addi(6, 0, 6),
        mul(7, 5, 6),
        halt(),
    ]);
    ctx.run_to_halt();
    assert_eq!(ctx.get_reg(7), 42);
    // Busy on the issue cycle and one more; the delivery cycle advances.
    assert_eq!(ctx.cpu().stats.stalls_mul, 2);
}

#[test]
fn divide_stalls_front_end_for_its_latency() {
    let mut ctx = TestContext::new().load_program(&[
        addi(5, 0, 100),
        addi(6, 0, 7),
        divu(7, 5, 6),
        halt(),
    ]);
    ctx.run_to_halt();
    assert_eq!(ctx.get_reg(7), 14);
    assert_eq!(ctx.cpu().stats.stalls_div, 17);
}

#[test]
fn dependent_instruction_sees_unit_result() {
    let mut ctx = TestContext::new().load_program(&[
        addi(5, 0, 7),
        addi(6, 0, 6),
        mul(7, 5, 6),
        add(10, 7, 7), // forwarded off the delivery entry
        halt(),
    ]);
    ctx.run_to_halt();
    assert_eq!(ctx.get_reg(10), 84);
}

#[test]
fn back_to_back_mul_and_div() {
    let mut ctx = TestContext::new().load_program(&[
        addi(5, 0, 12),
        addi(6, 0, 5),
        mul(7, 5, 6),  // 60
        div(8, 7, 6),  // 12
        rem(9, 7, 5),  // 0
        halt(),
    ]);
    ctx.run_to_halt();
    assert_eq!(ctx.get_reg(7), 60);
    assert_eq!(ctx.get_reg(8), 12);
    assert_eq!(ctx.get_reg(9), 0);
}

#[test]
fn mul_operands_come_through_forwarding() {
    let mut ctx = TestContext::new().load_program(&[
        addi(5, 0, 3),
        mul(7, 5, 5), // rs values forwarded from the addi still in flight
        halt(),
    ]);
    ctx.run_to_halt();
    assert_eq!(ctx.get_reg(7), 9);
}

#[test]
fn retire_counts_track_unit_instructions() {
    let mut ctx = TestContext::new().load_program(&[
        addi(5, 0, 9),
        mul(6, 5, 5),
        divu(7, 6, 5),
        halt(),
    ]);
    ctx.run_to_halt();
    assert_eq!(ctx.cpu().stats.inst_mul, 1);
    assert_eq!(ctx.cpu().stats.inst_div, 1);
}
