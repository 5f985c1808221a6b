//! Virtual-clock timer queue
//!
//! Timers fire in (due, seq) order. Each timer belongs to one page visit and
//! is dropped when that visit ends.

use std::collections::BTreeMap;

/// Work to run when a timer fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTask {
    /// Show page `n` (entry gate)
    ShowPage(usize),
    /// Fade in future-list item `n`
    RevealItem(usize),
    /// Start typing the letter
    StartTyping,
    /// Type the next letter character
    TypeTick,
}

/// A scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    pub due_ms: u64,
    /// Page that scheduled it
    pub page: usize,
    /// Visit that scheduled it
    pub visit: u64,
    pub task: TimerTask,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    now_ms: u64,
    seq: u64,
    queue: BTreeMap<(u64, u64), Timer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Schedule `task` after `delay_ms`; returns the due time
    pub fn schedule(&mut self, delay_ms: u64, page: usize, visit: u64, task: TimerTask) -> u64 {
        let due_ms = self.now_ms.saturating_add(delay_ms);
        self.seq += 1;
        self.queue.insert(
            (due_ms, self.seq),
            Timer {
                due_ms,
                page,
                visit,
                task,
            },
        );
        due_ms
    }

    /// Pop the earliest timer due at or before `until_ms`, moving the clock to it
    pub fn pop_due(&mut self, until_ms: u64) -> Option<Timer> {
        let (&key, _) = self.queue.first_key_value()?;
        if key.0 > until_ms {
            return None;
        }
        let timer = self.queue.remove(&key)?;
        self.now_ms = self.now_ms.max(timer.due_ms);
        Some(timer)
    }

    /// Move the clock to `until_ms` once no more timers are due
    pub fn settle(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }

    /// Drop every timer of `visit`; returns how many were dropped
    pub fn cancel_visit(&mut self, visit: u64) -> usize {
        let before = self.queue.len();
        self.queue.retain(|_, timer| timer.visit != visit);
        before - self.queue.len()
    }

    /// Due time of the earliest pending timer
    pub fn next_deadline(&self) -> Option<u64> {
        self.queue.keys().next().map(|(due, _)| *due)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
