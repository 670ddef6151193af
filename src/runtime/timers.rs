use std::collections::BTreeMap;

use crate::foundation::core::Millis;

/// Handle to a scheduled timer, used to cancel it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId {
    due: Millis,
    seq: u64,
}

impl TimerId {
    pub fn due(self) -> Millis {
        self.due
    }
}

/// Virtual-time timer queue. Timers fire in due-time order, ties in scheduling order.
#[derive(Clone, Debug)]
pub struct TimerQueue<E> {
    entries: BTreeMap<TimerId, E>,
    next_seq: u64,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_seq: 0,
        }
    }
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: Millis, event: E) -> TimerId {
        let id = TimerId {
            due,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.entries.insert(id, event);
        id
    }

    pub fn cancel(&mut self, id: TimerId) -> Option<E> {
        self.entries.remove(&id)
    }

    /// Removes and returns the earliest timer due at or before `now`.
    pub fn pop_due(&mut self, now: Millis) -> Option<(Millis, E)> {
        let first = self.entries.first_key_value().map(|(id, _)| *id)?;
        if first.due > now {
            return None;
        }
        self.entries.remove(&first).map(|e| (first.due, e))
    }

    pub fn next_due(&self) -> Option<Millis> {
        self.entries.keys().next().map(|id| id.due)
    }

    /// Drops every pending timer whose event matches.
    pub fn cancel_where(&mut self, mut pred: impl FnMut(&E) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, e| !pred(e));
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/timers.rs"]
mod tests;
