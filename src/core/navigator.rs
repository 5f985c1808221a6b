//! Navigator: current page, bounds, visits
//!
//! Every time a page is shown a new visit starts. Timers scheduled by a page
//! are tied to the visit that scheduled them.

use crate::types::ReasonCode;

/// Tracks the current page of a fixed-size deck
#[derive(Debug, Clone)]
pub struct Navigator {
    /// Active page
    current: usize,
    /// Number of pages
    page_count: usize,
    /// Visit counter, 0 until the first page is shown
    visit: u64,
}

impl Navigator {
    /// Create navigator for `page_count` pages, nothing shown yet
    pub fn new(page_count: usize) -> Self {
        Self {
            current: 0,
            page_count,
            visit: 0,
        }
    }

    /// Make `index` the active page and start a new visit
    pub fn enter(&mut self, index: usize) -> Result<u64, ReasonCode> {
        if index >= self.page_count {
            return Err(ReasonCode::N003_OUT_OF_RANGE);
        }
        self.current = index;
        self.visit += 1;
        Ok(self.visit)
    }

    /// Index one past the current page
    pub fn next_index(&self) -> Result<usize, ReasonCode> {
        if self.current + 1 < self.page_count {
            Ok(self.current + 1)
        } else {
            Err(ReasonCode::N002_AT_LAST_PAGE)
        }
    }

    /// Index one before the current page
    pub fn prev_index(&self) -> Result<usize, ReasonCode> {
        if self.current > 0 {
            Ok(self.current - 1)
        } else {
            Err(ReasonCode::N002_AT_FIRST_PAGE)
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Current visit token (0 before the first page was shown)
    pub fn visit(&self) -> u64 {
        self.visit
    }

    /// Has any page been shown yet?
    pub fn started(&self) -> bool {
        self.visit > 0
    }

    pub fn is_terminal(&self) -> bool {
        self.current + 1 == self.page_count
    }

    /// Back affordance is hidden on the first page only
    pub fn back_visible(&self) -> bool {
        self.current != 0
    }

    /// Active flag per page: exactly one true
    pub fn active_pages(&self) -> Vec<bool> {
        (0..self.page_count).map(|i| i == self.current).collect()
    }
}
