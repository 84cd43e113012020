//! Control hazard tests: flushes, redirects, and prediction training.

use crate::common::builder::instruction::*;
use crate::common::TestContext;

#[test]
fn taken_branch_squashes_wrong_path() {
    let mut ctx = TestContext::new().load_program(&[
        addi(1, 0, 1),
        beq(0, 0, 8), // always taken, skips the poison write
        addi(1, 0, 99),
        addi(2, 0, 7),
        halt(),
    ]);
    ctx.run_to_halt();
    assert_eq!(ctx.get_reg(1), 1);
    assert_eq!(ctx.get_reg(2), 7);
}

#[test]
fn not_taken_branch_falls_through_without_flush() {
    let mut ctx = TestContext::new().load_program(&[
        addi(1, 0, 5),
        bne(0, 0, 8), // never taken
        addi(2, 0, 3),
        halt(),
    ]);
    ctx.run_to_halt();
    assert_eq!(ctx.get_reg(2), 3);
    assert_eq!(ctx.cpu().stats.branch_mispredictions, 0);
    assert_eq!(ctx.cpu().stats.flushes, 0);
}

#[test]
fn jal_links_and_redirects() {
    let mut ctx = TestContext::new().load_program(&[
        jal(5, 8),      // pc=0: link x5=4, jump to pc=8
        addi(1, 0, 99), // squashed
        addi(2, 0, 1),
        halt(),
    ]);
    ctx.run_to_halt();
    assert_eq!(ctx.get_reg(5), 4);
    assert_eq!(ctx.get_reg(1), 0);
    assert_eq!(ctx.get_reg(2), 1);
}

#[test]
fn jalr_clears_bit_zero_of_the_target() {
    let mut ctx = TestContext::new().load_program(&[
        addi(5, 0, 13),  // target 13 -> bit 0 cleared -> 12
        jalr(6, 5, 0),   // pc=4: link x6=8
        addi(1, 0, 99),  // squashed
        addi(2, 0, 1),   // pc=12: landing point
        halt(),
    ]);
    ctx.run_to_halt();
    assert_eq!(ctx.get_reg(6), 8);
    assert_eq!(ctx.get_reg(1), 0);
    assert_eq!(ctx.get_reg(2), 1);
}

#[test]
fn mispredict_redirects_to_the_correct_pc() {
    // First encounter of a taken backward branch: predicted not-taken,
    // resolved taken, so the front end must be steered to the target.
    let mut ctx = TestContext::new().load_program(&[
        addi(1, 0, 0),
        addi(2, 0, 2),
        // loop body at pc=8
        addi(1, 1, 1),
        blt(1, 2, -4), // backward to pc=8 while x1 < 2
        halt(),
    ]);
    ctx.run_to_halt();
    assert_eq!(ctx.get_reg(1), 2);
    // Taken-but-unpredicted once, then the exit iteration mispredicts again.
    assert_eq!(ctx.cpu().stats.branch_mispredictions, 2);
}

#[test]
fn trained_branch_stops_mispredicting() {
    // A 1000-iteration loop: one cold miss entering the loop and one final
    // miss on exit; everything in between rides the trained predictor.
    let mut ctx = TestContext::new().load_program(&[
        addi(5, 0, 0),
        addi(6, 0, 1000),
        // loop body at pc=8
        addi(5, 5, 1),
        blt(5, 6, -4),
        halt(),
    ]);
    ctx.run_to_halt();
    assert_eq!(ctx.get_reg(5), 1000);
    assert_eq!(ctx.cpu().stats.branch_mispredictions, 2);
    assert_eq!(
        ctx.cpu().stats.branch_predictions,
        998,
        "iterations between the cold miss and the exit ride the BTB"
    );
}
