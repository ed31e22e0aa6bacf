// crates/shared-kernel/src/value_objects/mod.rs
pub mod accumulator;

pub use accumulator::Accumulator;
