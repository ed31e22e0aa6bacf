// crates/shared-kernel/tests/accumulator_display.rs
use control_break_shared_kernel::Accumulator;

#[test]
fn display_delegates_to_inner_value() {
    assert_eq!(Accumulator::new(42).to_string(), "42");
    assert_eq!(format!("{:.1}", Accumulator::new(1.26f64)), "1.3");
    assert_eq!(Accumulator::new("abc".to_string()).to_string(), "abc");
}
