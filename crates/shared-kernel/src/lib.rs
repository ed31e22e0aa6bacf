// crates/shared-kernel/src/lib.rs
#![allow(clippy::multiple_crate_versions)]

pub use error::{
    BoxError, ContiguityViolation, ControlBreakError, ErrorContext, LevelRef, Report, Result, KEY_SUGGESTION,
    SORT_SUGGESTION,
};

pub mod error;
pub mod format;
pub mod value_objects;

pub use format::{format_currency, format_number};
pub use value_objects::Accumulator;
