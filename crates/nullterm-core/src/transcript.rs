use std::collections::VecDeque;

use serde::Deserialize;
use serde::Serialize;

pub const DEFAULT_TRANSCRIPT_CAPACITY: usize = 2_000;

pub const SEED_LINES: [&str; 3] = [
    "> System initialized...",
    "> Welcome to NULL EEC Terminal",
    "> Type \"help\" for available commands",
];

/// Terminal output pane contents. Oldest lines are evicted once `cap` is hit.
///
/// Every pushed line gets the next sequence number, so [`Transcript::mark`]
/// and [`Transcript::lines_since`] find what was written after a point even
/// when eviction or `clear` changed the front.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    cap: usize,
    next_seq: u64,
    lines: VecDeque<(u64, String)>,
}

impl Transcript {
    pub fn new(cap: usize) -> Self {
        let cap = cap.max(1);
        Self {
            cap,
            next_seq: 0,
            lines: VecDeque::with_capacity(cap.min(256)),
        }
    }

    pub fn seeded(cap: usize) -> Self {
        let mut transcript = Self::new(cap);
        transcript.extend(SEED_LINES.iter().map(|line| line.to_string()));
        transcript
    }

    pub fn push(&mut self, line: impl Into<String>) {
        if self.lines.len() == self.cap {
            self.lines.pop_front();
        }
        self.lines.push_back((self.next_seq, line.into()));
        self.next_seq += 1;
    }

    pub fn extend<I>(&mut self, lines: I)
    where
        I: IntoIterator<Item = String>,
    {
        for line in lines {
            self.push(line);
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Removes every line not matching `pred`, wherever it sits.
    pub fn retain(&mut self, pred: impl Fn(&str) -> bool) {
        self.lines.retain(|(_, line)| pred(line));
    }

    /// Overwrites the most recent line matching `pred`. Returns false when no line matched.
    pub fn replace_last_if(
        &mut self,
        pred: impl Fn(&str) -> bool,
        line: impl Into<String>,
    ) -> bool {
        match self.lines.iter_mut().rev().find(|(_, existing)| pred(existing)) {
            Some((_, existing)) => {
                *existing = line.into();
                true
            }
            None => false,
        }
    }

    pub fn lines(&self) -> impl DoubleEndedIterator<Item = &str> + ExactSizeIterator {
        self.lines.iter().map(|(_, line)| line.as_str())
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.lines().map(str::to_string).collect()
    }

    /// Position after the newest line ever pushed.
    pub fn mark(&self) -> u64 {
        self.next_seq
    }

    /// Lines pushed at or after `mark` that are still held.
    pub fn lines_since(&self, mark: u64) -> impl Iterator<Item = &str> {
        self.lines
            .iter()
            .filter(move |(seq, _)| *seq >= mark)
            .map(|(_, line)| line.as_str())
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::seeded(DEFAULT_TRANSCRIPT_CAPACITY)
    }
}
