//! One-shot cancellable timers.
//!
//! A ticket fires at most once: draining or cancelling removes it for good.
//! Scheduling a ticket that is already queued replaces the earlier deadline.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::time::Duration;

use tracing::trace;

use crate::clock::Clock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<T> {
    pub ticket: u64,
    pub payload: T,
    pub deadline: Duration,
}

/// Deadline first, then insertion order for timers due at the same instant.
type SlotKey = (Duration, u64);

pub struct TimerQueue<T> {
    clock: Box<dyn Clock>,
    next_seq: u64,
    slots: BTreeMap<SlotKey, (u64, T)>,
    index: HashMap<u64, SlotKey>,
}

impl<T> TimerQueue<T> {
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self {
            clock: Box::new(clock),
            next_seq: 0,
            slots: BTreeMap::new(),
            index: HashMap::new(),
        }
    }

    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    pub fn schedule(&mut self, ticket: u64, payload: T, after: Duration) {
        self.cancel(ticket);
        let key = (self.clock.now() + after, self.next_seq);
        self.next_seq += 1;
        trace!(ticket, deadline_ms = key.0.as_millis() as u64, "timer scheduled");
        self.slots.insert(key, (ticket, payload));
        self.index.insert(ticket, key);
    }

    /// Returns false when the ticket already fired, was cancelled, or never existed.
    pub fn cancel(&mut self, ticket: u64) -> bool {
        match self.index.remove(&ticket) {
            Some(key) => {
                self.slots.remove(&key);
                trace!(ticket, "timer cancelled");
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&mut self) -> usize {
        let count = self.slots.len();
        self.slots.clear();
        self.index.clear();
        count
    }

    /// Removes and returns every timer whose deadline has passed, earliest first.
    pub fn drain_due(&mut self) -> Vec<Fired<T>> {
        let now = self.clock.now();
        let mut fired = Vec::new();
        while let Some(entry) = self.slots.first_entry() {
            if entry.key().0 > now {
                break;
            }
            let ((deadline, _), (ticket, payload)) = entry.remove_entry();
            self.index.remove(&ticket);
            fired.push(Fired {
                ticket,
                payload,
                deadline,
            });
        }
        fired
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.slots.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Time left before the earliest timer is due; zero if one is overdue.
    pub fn time_until_next(&self) -> Option<Duration> {
        let now = self.clock.now();
        self.next_deadline()
            .map(|deadline| deadline.saturating_sub(now))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
