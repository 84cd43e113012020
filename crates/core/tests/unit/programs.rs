//! End-to-end program scenarios.
//!
//! Whole programs assembled with the instruction builders, run to the halt
//! sentinel, with results checked architecturally.

use rv32sim_core::common::Fault;
use rv32sim_core::config::Config;

use crate::common::builder::instruction::*;
use crate::common::TestContext;

#[test]
fn sum_of_zero_to_one_hundred() {
    let mut ctx = TestContext::new().load_program(&[
        addi(5, 0, 0),    // i
        addi(10, 0, 0),   // acc
        addi(6, 0, 101),  // bound
        // loop at pc=12
        add(10, 10, 5),
        addi(5, 5, 1),
        blt(5, 6, -8),
        halt(),
    ]);
    assert_eq!(ctx.run_to_halt(), 5050);
}

#[test]
fn factorial_of_five() {
    let mut ctx = TestContext::new().load_program(&[
        addi(10, 0, 1),
        addi(5, 0, 5),
        // loop at pc=8
        mul(10, 10, 5),
        addi(5, 5, -1),
        blt(0, 5, -8),
        halt(),
    ]);
    assert_eq!(ctx.run_to_halt(), 120);
}

#[test]
fn fifteen_times_seventeen() {
    let mut ctx = TestContext::new().load_program(&[
        addi(5, 0, 15),
        addi(6, 0, 17),
        mul(10, 5, 6),
        halt(),
    ]);
    assert_eq!(ctx.run_to_halt(), 255);
}

#[test]
fn signed_division_overflow() {
    let mut ctx = TestContext::new().load_program(&[
        lui(5, 0x80000),   // INT_MIN
        addi(6, 0, -1),
        div(10, 5, 6),
        rem(11, 5, 6),
        halt(),
    ]);
    assert_eq!(ctx.run_to_halt(), 0x8000_0000);
    assert_eq!(ctx.get_reg(11), 0);
}

#[test]
fn divide_by_zero() {
    let mut ctx = TestContext::new().load_program(&[
        addi(5, 0, 42),
        divu(10, 5, 0),
        remu(11, 5, 0),
        div(12, 5, 0),
        rem(13, 5, 0),
        halt(),
    ]);
    assert_eq!(ctx.run_to_halt(), 0xFFFF_FFFF);
    assert_eq!(ctx.get_reg(11), 42);
    assert_eq!(ctx.get_reg(12), 0xFFFF_FFFF);
    assert_eq!(ctx.get_reg(13), 42);
}

#[test]
fn branch_predictor_warmup() {
    let mut ctx = TestContext::new().load_program(&[
        addi(5, 0, 0),
        addi(6, 0, 1000),
        // loop at pc=8
        addi(5, 5, 1),
        blt(5, 6, -4),
        halt(),
    ]);
    ctx.run_to_halt();
    assert!(
        ctx.cpu().stats.branch_mispredictions <= 2,
        "cold miss and exit miss only, saw {}",
        ctx.cpu().stats.branch_mispredictions
    );
}

#[test]
fn memory_programs_round_trip() {
    let mut ctx = TestContext::new().load_program(&[
        lui(5, 0x12345),       // x5 = 0x12345000
        addi(5, 5, 0x678),     // x5 = 0x12345678
        sw(5, 0, 0x40),
        lb(6, 0, 0x43),        // top byte, sign-extended: 0x12
        lhu(7, 0, 0x40),       // low half: 0x5678
        sb(0, 0, 0x41),        // clear byte 1
        lw(10, 0, 0x40),       // 0x12340078
        halt(),
    ]);
    assert_eq!(ctx.run_to_halt(), 0x1234_0078);
    assert_eq!(ctx.get_reg(6), 0x12);
    assert_eq!(ctx.get_reg(7), 0x5678);
}

#[test]
fn writes_to_x0_never_commit() {
    let mut ctx = TestContext::new().load_program(&[
        addi(0, 0, 55),
        lui(0, 0xFFFFF),
        add(10, 0, 0),
        halt(),
    ]);
    assert_eq!(ctx.run_to_halt(), 0);
}

#[test]
fn auipc_and_shifts_compose() {
    let mut ctx = TestContext::new().load_program(&[
        auipc(5, 1),       // pc=0: x5 = 0x1000
        srli(6, 5, 4),     // 0x100
        slli(7, 6, 8),     // 0x10000
        sub(10, 7, 6),     // 0xFF00
        halt(),
    ]);
    assert_eq!(ctx.run_to_halt(), 0xFF00);
}

#[test]
fn cycle_limit_faults_on_runaway_program() {
    let mut config = Config::default();
    config.general.max_cycles = 200;
    let mut ctx = TestContext::with_config(&config).load_program(&[
        // Spin without the halt sentinel: jal back to the previous word.
        nop(),
        jal(0, -4),
    ]);
    let err = ctx.sim.run().unwrap_err();
    assert_eq!(err, Fault::CycleLimitExceeded(200));
}

#[test]
fn out_of_bounds_store_faults_with_address() {
    let mut ctx = TestContext::new().load_program(&[
        lui(5, 0x80000),  // far beyond the 256 KiB data memory
        sw(5, 5, 0),
        halt(),
    ]);
    let err = ctx.sim.run().unwrap_err();
    assert_eq!(err, Fault::StoreOutOfBounds(0x8000_0000));
}

#[test]
fn misaligned_load_faults_with_address() {
    let mut ctx = TestContext::new().load_program(&[
        addi(5, 0, 2),
        lw(6, 5, 0),
        halt(),
    ]);
    let err = ctx.sim.run().unwrap_err();
    assert_eq!(err, Fault::LoadAddressMisaligned(2));
}

#[test]
fn mulh_family_end_to_end() {
    let mut ctx = TestContext::new().load_program(&[
        addi(5, 0, -1),
        addi(6, 0, -1),
        mulh(10, 5, 6),    // high(-1 * -1) = 0
        mulhu(11, 5, 6),   // high(0xFFFFFFFF^2) = 0xFFFFFFFE
        mulhsu(12, 5, 6),  // high(-1 * 0xFFFFFFFF) = 0xFFFFFFFF
        halt(),
    ]);
    assert_eq!(ctx.run_to_halt(), 0);
    assert_eq!(ctx.get_reg(11), 0xFFFF_FFFE);
    assert_eq!(ctx.get_reg(12), 0xFFFF_FFFF);
}
