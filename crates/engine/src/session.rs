//! Per-call level state.
//!
//! A session slot owns the open group's key and memo for one level while a
//! single `process` call runs. The processor keeps one slot per depth in a
//! `Vec` and drives them top-down for every record.
use crate::{
    callback::{Fault, Outcome},
    hooks::{EndHook, MemoHook, MemoSlot, SelectKey, StartHook},
    level::Level,
};

/// How a record relates to the group currently open at a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// No group was open; the record's key is staged for [`LevelSession::open`].
    Fresh,
    Unchanged,
    /// The key differs from the open group's key; the new key is staged.
    Break,
}

pub trait LevelSession<T> {
    fn is_open(&self) -> bool;

    /// Computes the record's key and compares it with the open group.
    fn step(&mut self, record: &T) -> Result<Step, Fault>;

    /// Opens a group with the staged key, or the record's key when nothing is staged.
    fn open(&mut self, record: &T) -> Result<(), Fault>;

    /// Fires `on_end` for the open group and starts a fresh memo.
    fn close(&mut self) -> Result<(), Fault>;

    /// Folds the record into the memo.
    fn accumulate(&mut self, record: &T) -> Result<(), Fault>;

    /// Fires `on_end` for the open group, if any, without starting a new memo.
    fn finish(&mut self) -> Result<(), Fault>;
}

pub(crate) struct TypedSession<'s, T, K, KS, S, M: MemoSlot, E> {
    level: &'s Level<T, K, KS, S, M, E>,
    depth: usize,
    previous: Option<K>,
    staged: Option<K>,
    memo: Option<M::Value>,
}

impl<'s, T, K, KS, S, M, E> TypedSession<'s, T, K, KS, S, M, E>
where
    M: MemoHook<T>,
    E: EndHook<K, M::Value>,
{
    pub(crate) fn new(level: &'s Level<T, K, KS, S, M, E>, depth: usize) -> Self {
        Self { level, depth, previous: None, staged: None, memo: level.memo.init() }
    }

    fn end_group(&mut self) -> Outcome {
        let Some(key) = self.previous.take() else {
            return Ok(());
        };
        let memo = self.memo.take();
        self.level.on_end.end(key, memo)
    }
}

impl<T, K, KS, S, M, E> LevelSession<T> for TypedSession<'_, T, K, KS, S, M, E>
where
    K: PartialEq,
    KS: SelectKey<T, K>,
    S: StartHook<K>,
    M: MemoHook<T>,
    E: EndHook<K, M::Value>,
{
    fn is_open(&self) -> bool {
        self.previous.is_some()
    }

    fn step(&mut self, record: &T) -> Result<Step, Fault> {
        let key = self.level.extract(self.depth, record)?;
        let step = match &self.previous {
            None => Step::Fresh,
            Some(previous) if *previous == key => Step::Unchanged,
            Some(_) => Step::Break,
        };
        if step != Step::Unchanged {
            self.staged = Some(key);
        }
        Ok(step)
    }

    fn open(&mut self, record: &T) -> Result<(), Fault> {
        let key = match self.staged.take() {
            Some(key) => key,
            None => self.level.extract(self.depth, record)?,
        };
        let key = self.previous.insert(key);
        self.level.on_start.start(key).map_err(Fault::Callback)
    }

    fn close(&mut self) -> Result<(), Fault> {
        self.end_group().map_err(Fault::Callback)?;
        self.memo = self.level.memo.init();
        Ok(())
    }

    fn accumulate(&mut self, record: &T) -> Result<(), Fault> {
        if let Some(memo) = self.memo.as_mut() {
            self.level.memo.update(memo, record).map_err(Fault::Callback)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), Fault> {
        self.end_group().map_err(Fault::Callback)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::level::Level;

    #[test]
    fn step_stages_key_until_open() {
        let level = Level::new(|r: &(char, i32)| r.0);
        let mut session = TypedSession::new(&level, 0);

        assert!(!session.is_open());
        assert_eq!(session.step(&('A', 1)).ok(), Some(Step::Fresh));
        session.open(&('A', 1)).ok().expect("opens");
        assert!(session.is_open());
        assert_eq!(session.step(&('A', 2)).ok(), Some(Step::Unchanged));
        assert_eq!(session.step(&('B', 3)).ok(), Some(Step::Break));
    }

    #[test]
    fn close_hands_over_memo_and_resets_it() {
        let ended = RefCell::new(Vec::new());
        let level = Level::new(|r: &(char, i32)| r.0)
            .memo(|| 0, |sum: &mut i32, r: &(char, i32)| *sum += r.1)
            .on_end(|key, sum| ended.borrow_mut().push((key, sum)));
        let mut session = TypedSession::new(&level, 0);

        for record in [('A', 1), ('A', 2)] {
            if session.step(&record).ok() == Some(Step::Fresh) {
                session.open(&record).ok().expect("opens");
            }
            session.accumulate(&record).ok().expect("accumulates");
        }
        session.close().ok().expect("closes");

        assert!(!session.is_open());
        assert_eq!(session.memo, Some(0));
        assert_eq!(*ended.borrow(), vec![('A', Some(3))]);
    }

    #[test]
    fn finish_without_open_group_is_silent() {
        let ended = RefCell::new(0);
        let level = Level::new(|r: &i32| *r).on_end(|_, _| *ended.borrow_mut() += 1);
        let mut session = TypedSession::new(&level, 0);
        session.finish().ok().expect("finishes");
        assert_eq!(*ended.borrow(), 0);
    }
}
