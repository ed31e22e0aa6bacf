//! Chunked parallel processing.
//!
//! The input is split into contiguous chunks and each chunk is processed by
//! its own, freshly built, processor on rayon's pool. Chunks do not share any
//! state: a group that straddles a chunk boundary is reported once per chunk,
//! each time with a partial memo, and `grand_total` runs once per chunk. Use
//! this only when the outermost groups are aligned with the chunks, or when
//! per-chunk results are merged afterwards.
use std::fmt::Debug;

use control_break_shared_kernel::Result;
use log::{debug, warn};
use rayon::prelude::*;

use crate::processor::{BreakProcessor, Threading};

/// Inputs up to this many records are processed sequentially.
pub const PARALLEL_THRESHOLD: usize = 1000;

/// Processes `records` in `parallelism` contiguous chunks (0 = one per CPU).
///
/// `make_processor` is called once per chunk, on the worker thread that
/// processes it, so its callbacks need not be thread-safe. With `Send + Sync`
/// callbacks, one processor from [`BreakProcessor::sync_builder`] can instead
/// be shared by scoped threads.
///
/// # Errors
///
/// The first error returned by a chunk's processor, or by `make_processor`.
pub fn process_chunked<'a, T, F>(records: &[T], parallelism: usize, make_processor: F) -> Result<()>
where
    T: Debug + Sync + 'a,
    F: Fn() -> Result<BreakProcessor<'a, T>> + Sync,
{
    let parallelism = if parallelism == 0 { num_cpus::get() } else { parallelism };
    if records.len() <= PARALLEL_THRESHOLD || parallelism < 2 {
        debug!("processing {} records sequentially", records.len());
        return make_processor()?.process(records);
    }

    let chunk_size = records.len().div_ceil(parallelism);
    let split = split_boundaries(records, chunk_size, &make_processor()?);
    if !split.is_empty() {
        warn!(
            "{} chunk boundaries split an outermost group (first at record #{}); those groups are reported per chunk",
            split.len(),
            split[0]
        );
    }

    debug!("processing {} records in chunks of {chunk_size}", records.len());
    records.par_chunks(chunk_size).try_for_each(|chunk| make_processor()?.process(chunk))
}

/// Indices of the first record of every chunk that continues the outermost
/// group of the previous chunk.
pub fn split_boundaries<'a, T, X>(records: &[T], chunk_size: usize, processor: &BreakProcessor<'a, T, X>) -> Vec<usize>
where
    T: Debug + 'a,
    X: Threading<'a, T>,
{
    if chunk_size == 0 {
        return Vec::new();
    }
    (chunk_size..records.len())
        .step_by(chunk_size)
        .filter(|&start| processor.same_outer_group(&records[start - 1], &records[start]))
        .collect()
}
