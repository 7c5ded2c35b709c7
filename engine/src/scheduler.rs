//! A single-threaded timer queue on a virtual clock.
//!
//! Nothing here sleeps. The owner decides how virtual milliseconds map to
//! real time (tests jump the clock, the CLI sleeps until [`Scheduler::next_deadline`]).
//! Tasks with equal deadlines fire in the order they were scheduled.

use std::collections::BTreeMap;

use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

#[derive(Debug)]
pub struct Scheduler<T> {
    now: u64,
    next_seq: u64,
    queue: BTreeMap<(u64, u64), T>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: 0,
            next_seq: 0,
            queue: BTreeMap::new(),
        }
    }

    /// Current virtual time in milliseconds.
    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.queue.keys().next().map(|&(deadline, _)| deadline)
    }

    pub fn schedule(&mut self, delay_ms: u64, task: T) -> TaskId {
        let seq = self.next_seq;
        self.next_seq += 1;
        let deadline = self.now.saturating_add(delay_ms);
        self.queue.insert((deadline, seq), task);
        trace!(task = seq, deadline, "scheduled");
        TaskId(seq)
    }

    /// Remove a task that has not fired yet.
    pub fn cancel(&mut self, id: TaskId) -> Option<T> {
        let key = self.queue.keys().find(|&&(_, seq)| seq == id.0).copied()?;
        trace!(task = id.0, "cancelled");
        self.queue.remove(&key)
    }

    /// Move the clock forward by `ms` and return every task that came due, in firing order.
    pub fn advance(&mut self, ms: u64) -> Vec<T> {
        let until = self.now.saturating_add(ms);
        let mut due = Vec::new();
        while let Some(entry) = self.queue.first_entry() {
            if entry.key().0 > until {
                break;
            }
            due.push(entry.remove());
        }
        self.now = until;
        due
    }

    /// Jump to the last deadline and return everything that was queued.
    pub fn run_until_idle(&mut self) -> Vec<T> {
        match self.queue.keys().next_back() {
            Some(&(last, _)) => {
                let ms = last.saturating_sub(self.now);
                self.advance(ms)
            }
            None => Vec::new(),
        }
    }
}
