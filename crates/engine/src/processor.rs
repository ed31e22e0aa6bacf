use std::{fmt::Debug, marker::PhantomData};

use control_break_shared_kernel::{BoxError, ControlBreakError, Result};
use log::{debug, trace, warn};

use crate::{
    callback::{CallbackOutcome, Fault, KeyFault, Outcome},
    config::{ConfigWarning, analyze},
    hooks::{Set, Unset},
    level::{BreakLevel, Level},
    session::{LevelSession, Step},
    validate::{level_ref, validate_levels},
};

/// Callback storage of a processor confined to the thread that uses it.
///
/// Callbacks may capture `RefCell`s and other non-thread-safe state.
#[derive(Debug, Clone, Copy, Default)]
pub struct Local;

/// Callback storage of a processor that may be shared between threads.
///
/// Every level and callback must be `Send + Sync`; the built processor is
/// then `Send + Sync` too, and `process` may run concurrently over disjoint
/// inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Shared;

/// How a processor stores its type-erased levels and callbacks.
pub trait Threading<'a, T: 'a> {
    type ErasedLevel: BreakLevel<T> + ?Sized + 'a;
    type Detail: Fn(&T) -> Outcome + ?Sized + 'a;
    type GrandTotal: Fn(&[T]) -> Outcome + ?Sized + 'a;
}

impl<'a, T: 'a> Threading<'a, T> for Local {
    type ErasedLevel = dyn BreakLevel<T> + 'a;
    type Detail = dyn Fn(&T) -> Outcome + 'a;
    type GrandTotal = dyn Fn(&[T]) -> Outcome + 'a;
}

impl<'a, T: 'a> Threading<'a, T> for Shared {
    type ErasedLevel = dyn BreakLevel<T> + Send + Sync + 'a;
    type Detail = dyn Fn(&T) -> Outcome + Send + Sync + 'a;
    type GrandTotal = dyn Fn(&[T]) -> Outcome + Send + Sync + 'a;
}

/// Assembles a [`BreakProcessor`].
///
/// `D` and `G` record whether the detail and grand-total callbacks are set;
/// each can be registered once.
pub struct ProcessorBuilder<'a, T: 'a, X: Threading<'a, T> = Local, D = Unset, G = Unset> {
    levels: Vec<Box<X::ErasedLevel>>,
    detail: Option<Box<X::Detail>>,
    grand_total: Option<Box<X::GrandTotal>>,
    _state: PhantomData<fn() -> (D, G)>,
}

impl<'a, T: 'a, X: Threading<'a, T>, D, G> ProcessorBuilder<'a, T, X, D, G> {
    fn empty() -> Self {
        Self { levels: Vec::new(), detail: None, grand_total: None, _state: PhantomData }
    }

    /// Finishes configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ControlBreakError::Configuration`] when no level was declared.
    pub fn build(self) -> Result<BreakProcessor<'a, T, X>> {
        if self.levels.is_empty() {
            return Err(ControlBreakError::configuration(
                "At least one break level must be defined",
                "add .level(Level::new(|record| /* key */)) to the builder",
            ));
        }

        let warnings = analyze(&self.levels);
        for warning in &warnings {
            warn!("control break configuration: {warning}");
        }

        Ok(BreakProcessor {
            levels: self.levels,
            detail: self.detail,
            grand_total: self.grand_total,
            warnings,
        })
    }

    fn transition<D2, G2>(self) -> ProcessorBuilder<'a, T, X, D2, G2> {
        ProcessorBuilder {
            levels: self.levels,
            detail: self.detail,
            grand_total: self.grand_total,
            _state: PhantomData,
        }
    }
}

impl<'a, T: 'a, D, G> ProcessorBuilder<'a, T, Local, D, G> {
    /// Appends the next, more deeply nested, break level.
    #[must_use]
    pub fn level<K, KS, S, M, E>(mut self, level: Level<T, K, KS, S, M, E>) -> Self
    where
        Level<T, K, KS, S, M, E>: BreakLevel<T> + 'a,
    {
        self.levels.push(Box::new(level));
        self
    }
}

impl<'a, T: 'a, D, G> ProcessorBuilder<'a, T, Shared, D, G> {
    /// Appends the next, more deeply nested, break level.
    #[must_use]
    pub fn level<K, KS, S, M, E>(mut self, level: Level<T, K, KS, S, M, E>) -> Self
    where
        Level<T, K, KS, S, M, E>: BreakLevel<T> + Send + Sync + 'a,
    {
        self.levels.push(Box::new(level));
        self
    }
}

impl<'a, T: 'a, G> ProcessorBuilder<'a, T, Local, Unset, G> {
    /// Called for every record once all level transitions for it are resolved.
    pub fn detail<F, R>(mut self, action: F) -> ProcessorBuilder<'a, T, Local, Set, G>
    where
        F: Fn(&T) -> R + 'a,
        R: CallbackOutcome,
    {
        self.detail = Some(Box::new(move |record: &T| action(record).into_outcome()));
        self.transition()
    }
}

impl<'a, T: 'a, G> ProcessorBuilder<'a, T, Shared, Unset, G> {
    /// Called for every record once all level transitions for it are resolved.
    pub fn detail<F, R>(mut self, action: F) -> ProcessorBuilder<'a, T, Shared, Set, G>
    where
        F: Fn(&T) -> R + Send + Sync + 'a,
        R: CallbackOutcome,
    {
        self.detail = Some(Box::new(move |record: &T| action(record).into_outcome()));
        self.transition()
    }
}

impl<'a, T: 'a, D> ProcessorBuilder<'a, T, Local, D, Unset> {
    /// Called once after every group is closed, with the whole input.
    pub fn grand_total<F, R>(mut self, action: F) -> ProcessorBuilder<'a, T, Local, D, Set>
    where
        F: Fn(&[T]) -> R + 'a,
        R: CallbackOutcome,
    {
        self.grand_total = Some(Box::new(move |records: &[T]| action(records).into_outcome()));
        self.transition()
    }
}

impl<'a, T: 'a, D> ProcessorBuilder<'a, T, Shared, D, Unset> {
    /// Called once after every group is closed, with the whole input.
    pub fn grand_total<F, R>(mut self, action: F) -> ProcessorBuilder<'a, T, Shared, D, Set>
    where
        F: Fn(&[T]) -> R + Send + Sync + 'a,
        R: CallbackOutcome,
    {
        self.grand_total = Some(Box::new(move |records: &[T]| action(records).into_outcome()));
        self.transition()
    }
}

/// Control-break engine over a validated, ordered list of break levels.
///
/// The processor holds configuration only; all grouping state lives in the
/// session created by each [`BreakProcessor::process`] call. A processor from
/// [`BreakProcessor::sync_builder`] is `Sync`, so one instance can serve
/// concurrent `process` calls over disjoint inputs.
pub struct BreakProcessor<'a, T: 'a, X: Threading<'a, T> = Local> {
    levels: Vec<Box<X::ErasedLevel>>,
    detail: Option<Box<X::Detail>>,
    grand_total: Option<Box<X::GrandTotal>>,
    warnings: Vec<ConfigWarning>,
}

impl<'a, T: 'a> BreakProcessor<'a, T> {
    pub fn builder() -> ProcessorBuilder<'a, T> {
        ProcessorBuilder::empty()
    }
}

impl<'a, T: 'a> BreakProcessor<'a, T, Shared> {
    /// Builder whose levels and callbacks must be `Send + Sync`.
    pub fn sync_builder() -> ProcessorBuilder<'a, T, Shared> {
        ProcessorBuilder::empty()
    }
}

impl<'a, T: Debug + 'a, X: Threading<'a, T>> BreakProcessor<'a, T, X> {
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    pub fn warnings(&self) -> &[ConfigWarning] {
        &self.warnings
    }

    /// Checks that `records` are grouped consistently with the declared levels
    /// without firing any callback.
    ///
    /// # Errors
    ///
    /// [`ControlBreakError::Contiguity`] when a group reopens after being
    /// interrupted, [`ControlBreakError::KeySelector`] when a key cannot be computed.
    pub fn validate(&self, records: &[T]) -> Result<()> {
        validate_levels(records, &self.levels)
    }

    /// Runs control-break processing over `records`.
    ///
    /// The first record's key is checked at every level and the whole input is
    /// validated before any callback fires. Start events fire outermost level
    /// first, end events innermost first, and `detail` sees memos that already
    /// include its record.
    ///
    /// # Errors
    ///
    /// Key selector and contiguity errors from the pre-flight checks, or
    /// [`ControlBreakError::Processing`] wrapping the first callback failure.
    pub fn process(&self, records: &[T]) -> Result<()> {
        let Some(first) = records.first() else {
            debug!("empty input: no groups to process");
            return self.finish_grand_total(records);
        };

        self.check_first_record(first)?;
        self.validate(records)?;

        let mut sessions: Vec<_> = self.levels.iter().enumerate().map(|(depth, level)| level.session(depth)).collect();
        for (index, record) in records.iter().enumerate() {
            self.process_record(&mut sessions, index, record)
                .map_err(|fault| self.processing_error(fault, index, Some(record)))?;
        }

        for session in sessions.iter_mut().rev() {
            session
                .finish()
                .map_err(|fault| self.processing_error(fault, records.len(), None))?;
        }

        debug!("processed {} records across {} level(s)", records.len(), self.levels.len());
        self.finish_grand_total(records)
    }

    fn check_first_record(&self, record: &T) -> Result<()> {
        for (depth, level) in self.levels.iter().enumerate() {
            level.check_key(record).map_err(|fault| self.key_error(depth, 0, format!("{record:?}"), fault))?;
        }
        Ok(())
    }

    fn process_record(
        &self,
        sessions: &mut [Box<dyn LevelSession<T> + '_>],
        index: usize,
        record: &T,
    ) -> std::result::Result<(), Fault> {
        let depth = sessions.len();
        let mut reopened = false;

        for level in 0..depth {
            // Levels below a break were reopened with this record's keys already.
            if !reopened {
                match sessions[level].step(record)? {
                    Step::Fresh => sessions[level].open(record)?,
                    Step::Unchanged => {}
                    Step::Break => {
                        trace!("break at level {level} on record #{index}");
                        for inner in (level..depth).rev() {
                            sessions[inner].close()?;
                        }
                        for inner in level..depth {
                            sessions[inner].open(record)?;
                        }
                        reopened = true;
                    }
                }
            }
            sessions[level].accumulate(record)?;
        }

        debug_assert!(sessions.iter().all(|session| session.is_open()));

        if let Some(detail) = &self.detail {
            detail(record).map_err(Fault::Callback)?;
        }
        Ok(())
    }

    fn finish_grand_total(&self, records: &[T]) -> Result<()> {
        match &self.grand_total {
            Some(grand_total) => grand_total(records).map_err(|source| ControlBreakError::Processing {
                record_index: records.len(),
                record: None,
                source,
            }),
            None => Ok(()),
        }
    }

    fn processing_error(&self, fault: Fault, record_index: usize, record: Option<&T>) -> ControlBreakError {
        let record = record.map(|r| format!("{r:?}"));
        let source: BoxError = match fault {
            Fault::Key { level, fault } => Box::new(self.key_error(
                level,
                record_index,
                record.clone().unwrap_or_default(),
                fault,
            )),
            Fault::Callback(err) => err,
        };
        ControlBreakError::Processing { record_index, record, source }
    }

    fn key_error(&self, depth: usize, record_index: usize, record: String, fault: KeyFault) -> ControlBreakError {
        ControlBreakError::KeySelector {
            level: level_ref(&self.levels, depth),
            record_index,
            record,
            source: fault.into_source(),
        }
    }

    /// Whether `a` and `b` fall into the same outermost group.
    pub(crate) fn same_outer_group(&self, a: &T, b: &T) -> bool {
        self.levels[0].same_key(a, b)
    }
}
