//! Contiguity validation.
//!
//! Every composite key prefix (the keys of levels `0..=L`) must occupy a single
//! contiguous run of records. Keys only need equality and hashing; the input
//! does not have to be sorted in any particular order, only grouped.
use std::{fmt::Debug, hash::Hash};

use control_break_shared_kernel::{ContiguityViolation, ControlBreakError, LevelRef, Result};
use hashbrown::{HashMap, hash_map::Entry};
use log::debug;

use crate::{callback::KeyFault, hooks::SelectKey, level::BreakLevel};

/// Dense id of a composite key prefix at one level. Level 0 groups share the root parent.
pub type GroupId = usize;

const ROOT: GroupId = 0;

pub enum TrackFault {
    Key(KeyFault),
    Reopened { last_seen: usize },
}

pub trait PrefixTracker<T> {
    /// Registers the record at `index` under `parent` and returns the id of its prefix at this level.
    fn observe(&mut self, parent: GroupId, record: &T, index: usize) -> std::result::Result<GroupId, TrackFault>;
}

#[derive(Debug, Clone, Copy)]
struct Run {
    id: GroupId,
    last: usize,
}

/// Identifies a prefix by its parent's id plus this level's key, which is
/// equivalent to the full key tuple without cloning outer keys.
pub(crate) struct KeyTracker<'s, K, KS> {
    selector: &'s KS,
    runs: HashMap<(GroupId, K), Run>,
    next_id: GroupId,
}

impl<'s, K, KS> KeyTracker<'s, K, KS> {
    pub(crate) fn new(selector: &'s KS) -> Self {
        Self { selector, runs: HashMap::new(), next_id: 0 }
    }
}

impl<T, K, KS> PrefixTracker<T> for KeyTracker<'_, K, KS>
where
    K: Eq + Hash,
    KS: SelectKey<T, K>,
{
    fn observe(&mut self, parent: GroupId, record: &T, index: usize) -> std::result::Result<GroupId, TrackFault> {
        let key = self.selector.select(record).map_err(TrackFault::Key)?;
        match self.runs.entry((parent, key)) {
            Entry::Occupied(mut entry) => {
                let run = entry.get_mut();
                if run.last + 1 != index {
                    return Err(TrackFault::Reopened { last_seen: run.last });
                }
                run.last = index;
                Ok(run.id)
            }
            Entry::Vacant(entry) => {
                let id = self.next_id;
                self.next_id += 1;
                entry.insert(Run { id, last: index });
                Ok(id)
            }
        }
    }
}

/// Checks that `records` are grouped consistently with `levels`.
///
/// Empty and single-record inputs are trivially valid.
pub(crate) fn validate_levels<T, L>(records: &[T], levels: &[Box<L>]) -> Result<()>
where
    T: Debug,
    L: BreakLevel<T> + ?Sized,
{
    if records.len() < 2 {
        debug!("skipping contiguity validation for {} record(s)", records.len());
        return Ok(());
    }

    let mut trackers: Vec<_> = levels.iter().map(|level| level.tracker()).collect();
    for (index, record) in records.iter().enumerate() {
        let mut parent = ROOT;
        for (depth, tracker) in trackers.iter_mut().enumerate() {
            parent = match tracker.observe(parent, record, index) {
                Ok(id) => id,
                Err(TrackFault::Key(fault)) => {
                    return Err(ControlBreakError::KeySelector {
                        level: level_ref(levels, depth),
                        record_index: index,
                        record: format!("{record:?}"),
                        source: fault.into_source(),
                    });
                }
                Err(TrackFault::Reopened { last_seen }) => {
                    return Err(violation(records, levels, depth, index, last_seen).into());
                }
            };
        }
    }

    debug!("contiguity validated for {} records across {} level(s)", records.len(), levels.len());
    Ok(())
}

fn violation<T: Debug, L: BreakLevel<T> + ?Sized>(
    records: &[T],
    levels: &[Box<L>],
    depth: usize,
    index: usize,
    last_seen: usize,
) -> ContiguityViolation {
    let record = &records[index];
    let level = &levels[depth];
    ContiguityViolation {
        level: level_ref(levels, depth),
        record_index: index,
        record: format!("{record:?}"),
        previous_key: level.describe_key(&records[index - 1]),
        current_key: level.describe_key(record),
        prefix: levels[..=depth].iter().map(|l| l.describe_key(record)).collect(),
        last_seen,
    }
}

pub(crate) fn level_ref<T, L: BreakLevel<T> + ?Sized>(levels: &[Box<L>], depth: usize) -> LevelRef {
    LevelRef::new(depth, levels[depth].name())
}
