// crates/shared-kernel/tests/accumulator_zero_trait.rs
use control_break_shared_kernel::Accumulator;

#[test]
fn zero_matches_default() {
    assert_eq!(Accumulator::<i32>::zero(), Accumulator::default());
    assert_eq!(Accumulator::<f64>::zero(), Accumulator::new(0.0));
    assert!(Accumulator::<u64>::zero().is_zero());
}

#[test]
fn non_zero_after_add() {
    let mut acc = Accumulator::<i64>::zero();
    acc += 1;
    assert!(!acc.is_zero());
}
