use std::fmt::Debug;

use control_break_shared_kernel::Result;

use crate::processor::{BreakProcessor, Threading};

/// Runs a [`BreakProcessor`] directly on a slice or `Vec`.
pub trait ControlBreakExt<T> {
    /// # Errors
    ///
    /// Propagates the processor's error; see [`BreakProcessor::process`].
    fn control_break<'a, X>(&self, processor: &BreakProcessor<'a, T, X>) -> Result<()>
    where
        T: 'a,
        X: Threading<'a, T>;
}

impl<T: Debug> ControlBreakExt<T> for [T] {
    fn control_break<'a, X>(&self, processor: &BreakProcessor<'a, T, X>) -> Result<()>
    where
        T: 'a,
        X: Threading<'a, T>,
    {
        processor.process(self)
    }
}

/// Collects any iterator and runs a [`BreakProcessor`] over the result.
///
/// Validation needs the whole input before the first callback, so the
/// records are materialized first; they are returned once processing succeeds.
pub trait ControlBreakIterExt: Iterator + Sized {
    /// # Errors
    ///
    /// Propagates the processor's error; see [`BreakProcessor::process`].
    fn control_break<'a, X>(self, processor: &BreakProcessor<'a, Self::Item, X>) -> Result<Vec<Self::Item>>
    where
        Self::Item: Debug + 'a,
        X: Threading<'a, Self::Item>,
    {
        let records: Vec<Self::Item> = self.collect();
        processor.process(&records)?;
        Ok(records)
    }
}

impl<I: Iterator> ControlBreakIterExt for I {}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;
    use crate::level::Level;

    #[test]
    fn vec_runs_through_extension() {
        let groups = Cell::new(0);
        let processor = BreakProcessor::builder()
            .level(Level::new(|n: &u32| n / 10).on_start(|_| groups.set(groups.get() + 1)))
            .build()
            .expect("builds");

        let numbers = vec![1, 2, 11, 12, 25];
        numbers.control_break(&processor).expect("processes");
        assert_eq!(groups.get(), 3);
    }

    #[test]
    fn iterator_is_collected_before_processing() {
        let totals = RefCell::new(Vec::new());
        let processor = BreakProcessor::builder()
            .level(
                Level::new(|n: &u32| n / 10)
                    .memo(|| 0, |sum: &mut u32, n: &u32| *sum += n)
                    .on_end(|tens, sum| totals.borrow_mut().push((tens, sum.unwrap_or_default()))),
            )
            .build()
            .expect("builds");

        let records = (1..=25u32).filter(|n| n % 5 == 0).control_break(&processor).expect("processes");

        assert_eq!(records, vec![5, 10, 15, 20, 25]);
        assert_eq!(*totals.borrow(), vec![(0, 5), (1, 25), (2, 45)]);
    }

    #[test]
    fn iterator_errors_surface_after_collection() {
        let processor = BreakProcessor::builder().level(Level::new(|n: &u32| n % 2)).build().expect("builds");
        assert!([1u32, 2, 3].into_iter().control_break(&processor).is_err());
    }
}
