//! Branch predictor tests.
//!
//! Verifies the BTB/BHT contract: a cold predictor falls through, a resolved
//! branch trains the entry, the 2-bit counters saturate at both ends, and an
//! update at one index is visible to the next lookup at that index.

use rv32sim_core::core::units::bru::BranchPredictor;

#[test]
fn cold_predictor_falls_through() {
    let bp = BranchPredictor::new(64);
    let pred = bp.predict(0x40);
    assert!(!pred.btb_hit);
    assert!(!pred.taken, "counters start weakly not-taken");
    assert_eq!(pred.predicted_pc, 0x44);
}

#[test]
fn one_taken_outcome_trains_the_entry() {
    let mut bp = BranchPredictor::new(64);
    bp.update(0x40, true, 0x10);

    // Counter moved 1 -> 2 (weakly taken) and the target is installed.
    let pred = bp.predict(0x40);
    assert!(pred.btb_hit);
    assert!(pred.taken);
    assert_eq!(pred.predicted_pc, 0x10);
}

#[test]
fn not_taken_training_keeps_fall_through() {
    let mut bp = BranchPredictor::new(64);
    bp.update(0x40, false, 0x10);

    // The BTB entry exists but the direction counter says not-taken.
    let pred = bp.predict(0x40);
    assert!(pred.btb_hit);
    assert!(!pred.taken);
    assert_eq!(pred.predicted_pc, 0x44);
}

#[test]
fn counters_saturate_at_both_ends() {
    let mut bp = BranchPredictor::new(64);
    for _ in 0..10 {
        bp.update(0x40, true, 0x10);
    }
    assert_eq!(bp.counter(0x40), 3, "taken at strongly-taken stays put");

    for _ in 0..10 {
        bp.update(0x40, false, 0x10);
    }
    assert_eq!(bp.counter(0x40), 0, "not-taken at strongly-not-taken stays put");
}

#[test]
fn entries_are_indexed_by_low_pc_bits() {
    let mut bp = BranchPredictor::new(64);
    bp.update(0x40, true, 0x10);

    // A PC 64 words away aliases to the same entry; a neighbor does not.
    let alias = bp.predict(0x40 + 64 * 4);
    assert!(alias.btb_hit);
    let neighbor = bp.predict(0x44);
    assert!(!neighbor.btb_hit);
}

#[test]
fn later_branch_overwrites_the_alias() {
    let mut bp = BranchPredictor::new(64);
    bp.update(0x40, true, 0x10);
    bp.update(0x40 + 64 * 4, true, 0x99C);
    assert_eq!(bp.predict(0x40).predicted_pc, 0x99C);
}
