// crates/engine/src/lib.rs
//! Control-break processing over pre-grouped record sequences.
//!
//! Declare one [`Level`] per grouping key, outermost first, hand them to a
//! [`BreakProcessor`], and feed it records that are already grouped by the
//! composite key. The processor validates the grouping up front and then
//! fires start, accumulate, end, detail and grand-total callbacks in
//! hierarchical order.
//!
//! [`BreakProcessor::builder`] accepts any closures, including ones that
//! capture `RefCell`s. [`BreakProcessor::sync_builder`] requires
//! `Send + Sync` closures and yields a processor that threads can share.
//!
//! ```
//! use std::cell::RefCell;
//! use control_break_engine::{BreakProcessor, Level};
//!
//! let totals = RefCell::new(Vec::new());
//! let processor = BreakProcessor::builder()
//!     .level(
//!         Level::new(|sale: &(&str, u32)| sale.0)
//!             .memo(|| 0u32, |sum: &mut u32, sale: &(&str, u32)| *sum += sale.1)
//!             .on_end(|dept, sum| totals.borrow_mut().push((dept, sum.unwrap_or_default()))),
//!     )
//!     .build()?;
//!
//! processor.process(&[("A", 1), ("A", 2), ("B", 5)])?;
//! assert_eq!(*totals.borrow(), vec![("A", 3), ("B", 5)]);
//! # Ok::<(), control_break_engine::ControlBreakError>(())
//! ```

mod callback;
mod config;
mod ext;
mod hooks;
mod level;
#[cfg(feature = "parallel")]
pub mod parallel;
mod processor;
mod session;
mod validate;

pub use callback::{CallbackOutcome, Outcome};
pub use config::{ConfigWarning, DEEP_NESTING_THRESHOLD};
pub use control_break_shared_kernel::{
    Accumulator, BoxError, ContiguityViolation, ControlBreakError, ErrorContext, LevelRef, Report, Result,
    format_currency, format_number,
};
pub use ext::{ControlBreakExt, ControlBreakIterExt};
pub use hooks::{ByKey, ByOptionalKey, Memo, NoMemo, OnEnd, OnStart, Set, TryByKey, Unset};
pub use level::Level;
#[cfg(feature = "parallel")]
pub use parallel::{PARALLEL_THRESHOLD, process_chunked};
pub use processor::{BreakProcessor, Local, ProcessorBuilder, Shared, Threading};
