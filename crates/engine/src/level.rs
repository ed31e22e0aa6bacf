//! Break level specifications.
//!
//! A [`Level`] describes one tier of the grouping hierarchy. Its optional
//! callbacks are attached through consuming setters whose availability is
//! tracked in the type: once `on_start`, `memo` or `on_end` has been set the
//! setter no longer exists on the returned value, so a level can never be
//! configured twice.
use std::{fmt::Debug, hash::Hash, marker::PhantomData};

use control_break_shared_kernel::BoxError;

use crate::{
    callback::{CallbackOutcome, Fault, KeyFault},
    hooks::{
        ByKey, ByOptionalKey, EndHook, Memo, MemoHook, MemoSlot, NoMemo, OnEnd, OnStart, SelectKey, StartHook,
        TryByKey, Unset,
    },
    session::{LevelSession, TypedSession},
    validate::{KeyTracker, PrefixTracker},
};

/// One tier of the break hierarchy.
///
/// `KS` is the key selector; `S`, `M` and `E` hold the `on_start`, memo and
/// `on_end` slots and stay [`Unset`]/[`NoMemo`] until configured. Closures
/// are stored by value, so a level is `Send + Sync` when all of them are.
pub struct Level<T, K, KS, S = Unset, M = NoMemo, E = Unset> {
    pub(crate) name: Option<String>,
    pub(crate) key: KS,
    pub(crate) on_start: S,
    pub(crate) memo: M,
    pub(crate) on_end: E,
    _types: PhantomData<fn(&T) -> K>,
}

impl<T, K, F> Level<T, K, ByKey<F>>
where
    F: Fn(&T) -> K,
{
    /// Level keyed by an infallible selector.
    pub fn new(key: F) -> Self {
        Self::keyed(ByKey(key))
    }
}

impl<T, K, F, Err> Level<T, K, TryByKey<F, Err>>
where
    F: Fn(&T) -> Result<K, Err>,
    Err: Into<BoxError>,
{
    /// Level keyed by a selector that may fail; an error aborts processing.
    pub fn try_new(key: F) -> Self {
        Self::keyed(TryByKey(key, PhantomData))
    }
}

impl<T, K, F> Level<T, K, ByOptionalKey<F>>
where
    F: Fn(&T) -> Option<K>,
{
    /// Level keyed by a selector that may yield no key; `None` is reported as a key selector error.
    pub fn from_optional(key: F) -> Self {
        Self::keyed(ByOptionalKey(key))
    }
}

impl<T, K, KS> Level<T, K, KS> {
    fn keyed(key: KS) -> Self {
        Self { name: None, key, on_start: Unset, memo: NoMemo, on_end: Unset, _types: PhantomData }
    }
}

impl<T, K, KS, S, M, E> Level<T, K, KS, S, M, E> {
    /// Display name used in diagnostics, e.g. `0 (dept)`.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl<T, K, KS, M, E> Level<T, K, KS, Unset, M, E> {
    /// Called with the key each time a group of this level opens.
    pub fn on_start<F, R>(self, action: F) -> Level<T, K, KS, OnStart<F, R>, M, E>
    where
        F: Fn(&K) -> R,
        R: CallbackOutcome,
    {
        Level {
            name: self.name,
            key: self.key,
            on_start: OnStart(action, PhantomData),
            memo: self.memo,
            on_end: self.on_end,
            _types: PhantomData,
        }
    }
}

impl<T, K, KS, S> Level<T, K, KS, S, NoMemo, Unset> {
    /// Declares the group aggregate: `init` creates a fresh memo for every
    /// group and `update` folds each record of the group into it.
    ///
    /// Must precede [`Level::on_end`], which observes the memo type.
    pub fn memo<M, I, U, R>(self, init: I, update: U) -> Level<T, K, KS, S, Memo<I, U, M, R>, Unset>
    where
        I: Fn() -> M,
        U: Fn(&mut M, &T) -> R,
        R: CallbackOutcome,
    {
        Level {
            name: self.name,
            key: self.key,
            on_start: self.on_start,
            memo: Memo { init, update, _types: PhantomData },
            on_end: Unset,
            _types: PhantomData,
        }
    }
}

impl<T, K, KS, S, M: MemoSlot> Level<T, K, KS, S, M, Unset> {
    /// Called once when a group closes, with its key and final memo (`None` without a memo).
    pub fn on_end<F, R>(self, action: F) -> Level<T, K, KS, S, M, OnEnd<F, R>>
    where
        F: Fn(K, Option<M::Value>) -> R,
        R: CallbackOutcome,
    {
        Level {
            name: self.name,
            key: self.key,
            on_start: self.on_start,
            memo: self.memo,
            on_end: OnEnd(action, PhantomData),
            _types: PhantomData,
        }
    }
}

impl<T, K, KS: SelectKey<T, K>, S, M, E> Level<T, K, KS, S, M, E> {
    pub(crate) fn extract(&self, depth: usize, record: &T) -> Result<K, Fault> {
        self.key.select(record).map_err(|fault| Fault::Key { level: depth, fault })
    }
}

/// Type-erased view of a level, as stored by the processor.
pub trait BreakLevel<T> {
    fn name(&self) -> Option<&str>;

    fn has_memo(&self) -> bool;

    fn has_on_end(&self) -> bool;

    /// Runs the key selector once, discarding the key.
    fn check_key(&self, record: &T) -> Result<(), KeyFault>;

    /// `Debug` rendering of the record's key at this level.
    fn describe_key(&self, record: &T) -> String;

    fn same_key(&self, a: &T, b: &T) -> bool;

    fn tracker(&self) -> Box<dyn PrefixTracker<T> + '_>;

    fn session(&self, depth: usize) -> Box<dyn LevelSession<T> + '_>;
}

impl<T, K, KS, S, M, E> BreakLevel<T> for Level<T, K, KS, S, M, E>
where
    K: Eq + Hash + Debug,
    KS: SelectKey<T, K>,
    S: StartHook<K>,
    M: MemoHook<T>,
    E: EndHook<K, M::Value>,
{
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn has_memo(&self) -> bool {
        M::SET
    }

    fn has_on_end(&self) -> bool {
        E::SET
    }

    fn check_key(&self, record: &T) -> Result<(), KeyFault> {
        self.key.select(record).map(drop)
    }

    fn describe_key(&self, record: &T) -> String {
        match self.key.select(record) {
            Ok(key) => format!("{key:?}"),
            Err(_) => "<unavailable>".to_string(),
        }
    }

    fn same_key(&self, a: &T, b: &T) -> bool {
        matches!((self.key.select(a), self.key.select(b)), (Ok(x), Ok(y)) if x == y)
    }

    fn tracker(&self) -> Box<dyn PrefixTracker<T> + '_> {
        Box::new(KeyTracker::<K, KS>::new(&self.key))
    }

    fn session(&self, depth: usize) -> Box<dyn LevelSession<T> + '_> {
        Box::new(TypedSession::new(self, depth))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Row {
        group: &'static str,
        value: i32,
    }

    fn assert_shareable<L: Send + Sync>(_: &L) {}

    #[test]
    fn builder_records_configured_slots() {
        let level = Level::new(|r: &Row| r.group)
            .named("group")
            .on_start(|_| ())
            .memo(|| 0i32, |sum: &mut i32, r: &Row| *sum += r.value)
            .on_end(|_, _| ());

        assert_eq!(level.name(), Some("group"));
        assert!(level.has_memo());
        assert!(level.has_on_end());
    }

    #[test]
    fn memo_keeps_previous_start_callback() {
        let started = std::cell::Cell::new(0);
        let level = Level::new(|r: &Row| r.group)
            .on_start(|_| started.set(started.get() + 1))
            .memo(Vec::new, |seen: &mut Vec<i32>, r: &Row| seen.push(r.value));
        assert!(level.has_memo());
        assert!(!level.has_on_end());

        let mut session = level.session(0);
        session.open(&Row { group: "A", value: 1 }).ok().expect("opens");
        assert_eq!(started.get(), 1);
    }

    #[test]
    fn optional_selector_reports_missing_key() {
        let level = Level::from_optional(|r: &Row| (!r.group.is_empty()).then_some(r.group));
        assert!(matches!(level.check_key(&Row { group: "", value: 0 }), Err(KeyFault::Missing)));
        assert!(level.check_key(&Row { group: "A", value: 0 }).is_ok());
    }

    #[test]
    fn fallible_selector_keeps_error_source() {
        let level = Level::try_new(|r: &Row| r.group.parse::<u32>());
        match level.check_key(&Row { group: "x", value: 0 }) {
            Err(KeyFault::Failed(err)) => assert!(err.to_string().contains("invalid digit")),
            _ => panic!("expected a failed key"),
        }
    }

    #[test]
    fn describe_key_uses_debug_rendering() {
        let level = Level::new(|r: &Row| (r.group, r.value));
        assert_eq!(level.describe_key(&Row { group: "A", value: 1 }), "(\"A\", 1)");
    }

    #[test]
    fn thread_safe_closures_give_a_thread_safe_level() {
        let level = Level::new(|r: &Row| r.group)
            .memo(|| 0i32, |sum: &mut i32, r: &Row| *sum += r.value)
            .on_end(|_, _| ());
        assert_shareable(&level);
    }
}
