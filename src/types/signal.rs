//! One-shot unlock signals

use serde::{Deserialize, Serialize};

use crate::types::UnlockKind;

/// A triggering event that sets a one-shot flag on a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnlockSignal {
    Interaction,
    MediaPlayed,
    MediaEnded,
    TypingDone,
}

/// Per-page one-shot flags. Once set, a flag stays set for the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneShotFlags {
    pub interacted: bool,
    pub media_played: bool,
    pub media_ended: bool,
    pub typing_done: bool,
}

impl OneShotFlags {
    /// Set the flag for `signal`; returns true if it was not already set
    pub fn record(&mut self, signal: UnlockSignal) -> bool {
        let slot = match signal {
            UnlockSignal::Interaction => &mut self.interacted,
            UnlockSignal::MediaPlayed => &mut self.media_played,
            UnlockSignal::MediaEnded => &mut self.media_ended,
            UnlockSignal::TypingDone => &mut self.typing_done,
        };
        let fresh = !*slot;
        *slot = true;
        fresh
    }

    /// Does `kind` hold given these flags?
    pub fn satisfies(&self, kind: UnlockKind) -> bool {
        match kind {
            UnlockKind::AlwaysVisible => true,
            UnlockKind::OnInteraction => self.interacted,
            UnlockKind::OnMediaEnd => self.media_ended,
            UnlockKind::OnMediaPlay => self.media_played,
            UnlockKind::OnTypingComplete => self.typing_done,
            UnlockKind::Never => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_is_one_shot() {
        let mut flags = OneShotFlags::default();
        assert!(flags.record(UnlockSignal::MediaEnded));
        assert!(!flags.record(UnlockSignal::MediaEnded));
        assert!(flags.media_ended);
    }

    #[test]
    fn test_never_is_never_satisfied() {
        let flags = OneShotFlags {
            interacted: true,
            media_played: true,
            media_ended: true,
            typing_done: true,
        };
        assert!(!flags.satisfies(UnlockKind::Never));
        assert!(flags.satisfies(UnlockKind::OnTypingComplete));
    }

    #[test]
    fn test_media_end_does_not_satisfy_play() {
        let mut flags = OneShotFlags::default();
        flags.record(UnlockSignal::MediaEnded);
        assert!(!flags.satisfies(UnlockKind::OnMediaPlay));
        assert!(flags.satisfies(UnlockKind::OnMediaEnd));
    }
}
