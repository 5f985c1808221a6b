//! Unlock Gate: which heart is visible
//!
//! Visibility is derived, never patched: every evaluation hides all hearts and
//! then shows the active page's heart if its unlock kind is satisfied.

use crate::types::{OneShotFlags, ReasonCode, UnlockKind, UnlockSignal};

/// Per-page unlock kinds and one-shot flags
#[derive(Debug, Clone)]
pub struct UnlockGate {
    kinds: Vec<UnlockKind>,
    flags: Vec<OneShotFlags>,
    /// Result of the last evaluation
    visible: Option<usize>,
}

impl UnlockGate {
    pub fn new(kinds: Vec<UnlockKind>) -> Self {
        let flags = vec![OneShotFlags::default(); kinds.len()];
        Self {
            kinds,
            flags,
            visible: None,
        }
    }

    /// Set a one-shot flag; returns true if it was newly set
    pub fn record(&mut self, page: usize, signal: UnlockSignal) -> Result<bool, ReasonCode> {
        let flags = self.flags.get_mut(page).ok_or(ReasonCode::N003_OUT_OF_RANGE)?;
        Ok(flags.record(signal))
    }

    /// Does `page`'s unlock kind hold right now?
    pub fn is_unlocked(&self, page: usize) -> bool {
        match (self.kinds.get(page), self.flags.get(page)) {
            (Some(kind), Some(flags)) => flags.satisfies(*kind),
            _ => false,
        }
    }

    /// Hide all, then show the heart of `active` if it is unlocked
    pub fn evaluate(&mut self, active: usize) -> Option<usize> {
        self.visible = None;
        if self.is_unlocked(active) {
            self.visible = Some(active);
        }
        self.visible
    }

    /// Visible heart as of the last evaluation
    pub fn visible(&self) -> Option<usize> {
        self.visible
    }

    /// Visibility per page: at most one true
    pub fn visibility(&self) -> Vec<bool> {
        (0..self.kinds.len()).map(|i| self.visible == Some(i)).collect()
    }

    pub fn flags(&self, page: usize) -> Option<&OneShotFlags> {
        self.flags.get(page)
    }
}
