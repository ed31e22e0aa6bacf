// crates/shared-kernel/src/value_objects/accumulator.rs
use std::{
    iter::Sum,
    ops::{AddAssign, Deref, SubAssign},
};

use num_traits::Zero;
use serde::{Deserialize, Serialize};

/// Running aggregate for a break level's memo.
///
/// The arithmetic is whatever `AddAssign`/`SubAssign` the wrapped type provides,
/// so `Accumulator<String>` accepts `+= &str` but has no `-=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Accumulator<V>(V);

impl<V> Accumulator<V> {
    #[inline]
    pub const fn new(initial: V) -> Self {
        Self(initial)
    }

    #[inline]
    pub const fn value(&self) -> &V {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> V {
        self.0
    }
}

impl<V: Zero> Accumulator<V> {
    #[inline]
    pub fn zero() -> Self {
        Self(V::zero())
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl<V, R> AddAssign<R> for Accumulator<V>
where
    V: AddAssign<R>,
{
    fn add_assign(&mut self, rhs: R) {
        self.0 += rhs;
    }
}

impl<V, R> SubAssign<R> for Accumulator<V>
where
    V: SubAssign<R>,
{
    fn sub_assign(&mut self, rhs: R) {
        self.0 -= rhs;
    }
}

impl<V> Deref for Accumulator<V> {
    type Target = V;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<V> From<V> for Accumulator<V> {
    fn from(value: V) -> Self {
        Self::new(value)
    }
}

impl<V> Sum<V> for Accumulator<V>
where
    V: AddAssign + Default,
{
    fn sum<I: Iterator<Item = V>>(iter: I) -> Self {
        let mut acc = Self::default();
        for value in iter {
            acc += value;
        }
        acc
    }
}

impl<V> FromIterator<V> for Accumulator<V>
where
    V: AddAssign + Default,
{
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        iter.into_iter().sum()
    }
}

mod display {
    use std::fmt;

    use super::Accumulator;

    impl<V: fmt::Display> fmt::Display for Accumulator<V> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            self.0.fmt(f)
        }
    }
}
