//! Callback slots of a [`Level`](crate::Level).
//!
//! A level keeps its closures by value, one type parameter per slot, so the
//! level is `Send` or `Sync` exactly when its closures are. An unconfigured
//! slot holds [`Unset`] (or [`NoMemo`] for the aggregate) and does nothing.
use std::marker::PhantomData;

use control_break_shared_kernel::BoxError;

use crate::callback::{CallbackOutcome, KeyFault, Outcome};

/// Type-state marker: the slot has not been configured yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unset;

/// Type-state marker: the slot has been configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct Set;

/// Memo slot of a level that declares no aggregate; `on_end` then receives `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoMemo;

/// Infallible key selector.
pub struct ByKey<F>(pub(crate) F);

/// Key selector whose error aborts processing.
pub struct TryByKey<F, Err>(pub(crate) F, pub(crate) PhantomData<fn() -> Err>);

/// Key selector that may yield no key.
pub struct ByOptionalKey<F>(pub(crate) F);

/// Configured `on_start` callback.
pub struct OnStart<F, R>(pub(crate) F, pub(crate) PhantomData<fn() -> R>);

/// Configured memo: `init` builds a fresh `M` per group, `update` folds records into it.
pub struct Memo<I, U, M, R> {
    pub(crate) init: I,
    pub(crate) update: U,
    pub(crate) _types: PhantomData<fn() -> (M, R)>,
}

/// Configured `on_end` callback.
pub struct OnEnd<F, R>(pub(crate) F, pub(crate) PhantomData<fn() -> R>);

pub trait SelectKey<T, K> {
    fn select(&self, record: &T) -> Result<K, KeyFault>;
}

impl<T, K, F> SelectKey<T, K> for ByKey<F>
where
    F: Fn(&T) -> K,
{
    fn select(&self, record: &T) -> Result<K, KeyFault> {
        Ok((self.0)(record))
    }
}

impl<T, K, F, Err> SelectKey<T, K> for TryByKey<F, Err>
where
    F: Fn(&T) -> Result<K, Err>,
    Err: Into<BoxError>,
{
    fn select(&self, record: &T) -> Result<K, KeyFault> {
        (self.0)(record).map_err(|err| KeyFault::Failed(err.into()))
    }
}

impl<T, K, F> SelectKey<T, K> for ByOptionalKey<F>
where
    F: Fn(&T) -> Option<K>,
{
    fn select(&self, record: &T) -> Result<K, KeyFault> {
        (self.0)(record).ok_or(KeyFault::Missing)
    }
}

pub trait StartHook<K> {
    const SET: bool;

    fn start(&self, key: &K) -> Outcome;
}

impl<K> StartHook<K> for Unset {
    const SET: bool = false;

    fn start(&self, _: &K) -> Outcome {
        Ok(())
    }
}

impl<K, F, R> StartHook<K> for OnStart<F, R>
where
    F: Fn(&K) -> R,
    R: CallbackOutcome,
{
    const SET: bool = true;

    fn start(&self, key: &K) -> Outcome {
        (self.0)(key).into_outcome()
    }
}

/// Memo value type of a slot, independent of the record type.
pub trait MemoSlot {
    type Value;
}

impl MemoSlot for NoMemo {
    type Value = NoMemo;
}

impl<I, U, M, R> MemoSlot for Memo<I, U, M, R> {
    type Value = M;
}

pub trait MemoHook<T>: MemoSlot {
    const SET: bool;

    /// Fresh memo for a new group; `None` when the level has no aggregate.
    fn init(&self) -> Option<Self::Value>;

    fn update(&self, memo: &mut Self::Value, record: &T) -> Outcome;
}

impl<T> MemoHook<T> for NoMemo {
    const SET: bool = false;

    fn init(&self) -> Option<NoMemo> {
        None
    }

    fn update(&self, _: &mut NoMemo, _: &T) -> Outcome {
        Ok(())
    }
}

impl<T, I, U, M, R> MemoHook<T> for Memo<I, U, M, R>
where
    I: Fn() -> M,
    U: Fn(&mut M, &T) -> R,
    R: CallbackOutcome,
{
    const SET: bool = true;

    fn init(&self) -> Option<M> {
        Some((self.init)())
    }

    fn update(&self, memo: &mut M, record: &T) -> Outcome {
        (self.update)(memo, record).into_outcome()
    }
}

pub trait EndHook<K, M> {
    const SET: bool;

    fn end(&self, key: K, memo: Option<M>) -> Outcome;
}

impl<K, M> EndHook<K, M> for Unset {
    const SET: bool = false;

    fn end(&self, _: K, _: Option<M>) -> Outcome {
        Ok(())
    }
}

impl<K, M, F, R> EndHook<K, M> for OnEnd<F, R>
where
    F: Fn(K, Option<M>) -> R,
    R: CallbackOutcome,
{
    const SET: bool = true;

    fn end(&self, key: K, memo: Option<M>) -> Outcome {
        (self.0)(key, memo).into_outcome()
    }
}
