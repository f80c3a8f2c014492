//! Delayed and repeating task queue over the game clock.
//!
//! Tasks are ordered by (due time, scheduling sequence), so two tasks due
//! at the same instant fire in the order they were queued. A repeating
//! task is re-queued (with a fresh sequence) one period after it fires and
//! keeps its TimerId until cancelled. Nothing here blocks: callers drain due tasks with `pop_due`.

use crate::{clock::GameClock, types::Millis};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Handle for a scheduled task. Stable across repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Entry<T> {
    id:     TimerId,
    period: Option<Millis>,
    task:   T,
}

/// A task whose due time has been reached.
#[derive(Debug, Clone, PartialEq)]
pub struct Fired<T> {
    pub id:   TimerId,
    pub at:   Millis,
    pub task: T,
}

pub struct Scheduler<T> {
    clock:    GameClock,
    queue:    BTreeMap<(Millis, u64), Entry<T>>,
    index:    HashMap<TimerId, (Millis, u64)>,
    next_seq: u64,
}

impl<T: Clone> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            clock:    GameClock::new(),
            queue:    BTreeMap::new(),
            index:    HashMap::new(),
            next_seq: 0,
        }
    }

    pub fn now(&self) -> Millis {
        self.clock.now()
    }

    /// Run `task` once, `delay` ms from now.
    pub fn schedule_once(&mut self, delay: Millis, task: T) -> TimerId {
        self.insert(delay, None, task)
    }

    /// Run `task` every `period` ms, first firing one period from now.
    pub fn schedule_repeating(&mut self, period: Millis, task: T) -> TimerId {
        assert!(period > 0, "repeating timer needs a non-zero period");
        self.insert(period, Some(period), task)
    }

    /// Cancel a pending task. Returns false if it already fired (one-shot)
    /// or was never scheduled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.index.remove(&id) {
            Some(key) => {
                self.queue.remove(&key);
                true
            }
            None => false,
        }
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.index.contains_key(&id)
    }

    /// Number of queued tasks, repeating ones included.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Number of queued one-shot tasks.
    pub fn pending_one_shots(&self) -> usize {
        self.queue.values().filter(|e| e.period.is_none()).count()
    }

    pub fn next_due(&self) -> Option<Millis> {
        self.queue.keys().next().map(|(due, _)| *due)
    }

    /// Take the earliest task due at or before `until`, moving the clock
    /// to its due time. Repeating tasks are re-queued before returning.
    pub fn pop_due(&mut self, until: Millis) -> Option<Fired<T>> {
        let (&key, _) = self.queue.iter().next()?;
        if key.0 > until {
            return None;
        }
        let entry = self.queue.remove(&key)?;
        self.index.remove(&entry.id);
        self.clock.advance_to(key.0);

        if let Some(period) = entry.period {
            match key.0.checked_add(period) {
                Some(next_due) => {
                    let seq = self.bump_seq();
                    let next_key = (next_due, seq);
                    self.index.insert(entry.id, next_key);
                    self.queue.insert(next_key, entry.clone());
                }
                None => log::warn!("timer {:?} ran past the end of time; dropped", entry.id),
            }
        }

        Some(Fired { id: entry.id, at: key.0, task: entry.task })
    }

    /// Move the clock to `t` once every task due by then has been popped.
    pub fn advance_to(&mut self, t: Millis) {
        debug_assert!(self.next_due().map_or(true, |due| due > t));
        self.clock.advance_to(t);
    }

    fn insert(&mut self, delay: Millis, period: Option<Millis>, task: T) -> TimerId {
        let seq = self.bump_seq();
        let id = TimerId(seq);
        let key = (self.clock.now().saturating_add(delay), seq);
        self.index.insert(id, key);
        self.queue.insert(key, Entry { id, period, task });
        id
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}

impl<T: Clone> Default for Scheduler<T> {
    fn default() -> Self { Self::new() }
}
