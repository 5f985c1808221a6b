//! Stage: the visual host the controller drives
//!
//! Fallible methods are best-effort; the controller swallows their errors.

use crate::error::StageError;
use crate::types::{FocusTarget, StageEffect};

/// Output side of the presentation
pub trait Stage {
    /// Mark `page` active and every other page inert
    fn activate_page(&mut self, page: usize);
    /// Show the heart of `page` and hide all others (`None` hides all)
    fn show_affordance(&mut self, page: Option<usize>);
    fn set_back_visible(&mut self, visible: bool);
    /// Drop focus before pages are hidden
    fn blur(&mut self);
    fn focus(&mut self, target: FocusTarget) -> Result<(), StageError>;
    fn play_ambient(&mut self) -> Result<(), StageError>;
    fn pause_ambient(&mut self);
    fn set_ambient_volume(&mut self, volume: f32);
    fn play_media(&mut self, page: usize) -> Result<(), StageError>;
    fn pause_media(&mut self, page: usize);
    /// Brief visual acknowledgment of the entry action
    fn acknowledge_entry(&mut self);
    /// Hide every list item before the staggered reveal
    fn reset_list(&mut self, page: usize);
    fn reveal_list_item(&mut self, page: usize, item: usize, text: &str);
    fn clear_text(&mut self, page: usize);
    fn append_text(&mut self, page: usize, ch: char);
}

/// Stage that records every applied effect
///
/// Used by the terminal host and by tests. Can simulate an environment that
/// blocks autoplay, rejects media playback or refuses focus.
#[derive(Debug, Default)]
pub struct RecordingStage {
    effects: Vec<StageEffect>,
    autoplay_blocked: bool,
    media_rejected: bool,
    unfocusable: Vec<FocusTarget>,
}

impl RecordingStage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse every ambient play request
    pub fn with_autoplay_blocked(mut self) -> Self {
        self.autoplay_blocked = true;
        self
    }

    /// Refuse every page media play request
    pub fn with_media_rejected(mut self) -> Self {
        self.media_rejected = true;
        self
    }

    /// Refuse focus on `target`
    pub fn with_unfocusable(mut self, target: FocusTarget) -> Self {
        self.unfocusable.push(target);
        self
    }

    pub fn set_autoplay_blocked(&mut self, blocked: bool) {
        self.autoplay_blocked = blocked;
    }

    /// All effects recorded so far
    pub fn effects(&self) -> &[StageEffect] {
        &self.effects
    }

    /// Take the recorded effects, leaving the log empty
    pub fn drain(&mut self) -> Vec<StageEffect> {
        std::mem::take(&mut self.effects)
    }

    /// Text currently shown on `page`, rebuilt from clear/append effects
    pub fn text(&self, page: usize) -> String {
        let mut text = String::new();
        for effect in &self.effects {
            match effect {
                StageEffect::ClearText { page: p } if *p == page => text.clear(),
                StageEffect::AppendText { page: p, ch } if *p == page => text.push(*ch),
                _ => {}
            }
        }
        text
    }

    /// Last focus target that was accepted
    pub fn focused(&self) -> Option<FocusTarget> {
        self.effects.iter().rev().find_map(|effect| match effect {
            StageEffect::Blur => Some(None),
            StageEffect::Focus { target } => Some(Some(*target)),
            _ => None,
        })?
    }

    fn push(&mut self, effect: StageEffect) {
        self.effects.push(effect);
    }
}

impl Stage for RecordingStage {
    fn activate_page(&mut self, page: usize) {
        self.push(StageEffect::ActivatePage { page });
    }

    fn show_affordance(&mut self, page: Option<usize>) {
        self.push(StageEffect::ShowAffordance { page });
    }

    fn set_back_visible(&mut self, visible: bool) {
        self.push(StageEffect::BackVisible { visible });
    }

    fn blur(&mut self) {
        self.push(StageEffect::Blur);
    }

    fn focus(&mut self, target: FocusTarget) -> Result<(), StageError> {
        if self.unfocusable.contains(&target) {
            return Err(StageError::NotFocusable(target));
        }
        self.push(StageEffect::Focus { target });
        Ok(())
    }

    fn play_ambient(&mut self) -> Result<(), StageError> {
        if self.autoplay_blocked {
            return Err(StageError::AutoplayBlocked);
        }
        self.push(StageEffect::PlayAmbient);
        Ok(())
    }

    fn pause_ambient(&mut self) {
        self.push(StageEffect::PauseAmbient);
    }

    fn set_ambient_volume(&mut self, volume: f32) {
        self.push(StageEffect::AmbientVolume { volume });
    }

    fn play_media(&mut self, page: usize) -> Result<(), StageError> {
        if self.media_rejected {
            return Err(StageError::PlaybackRejected {
                page,
                detail: "not allowed".to_string(),
            });
        }
        self.push(StageEffect::PlayMedia { page });
        Ok(())
    }

    fn pause_media(&mut self, page: usize) {
        self.push(StageEffect::PauseMedia { page });
    }

    fn acknowledge_entry(&mut self) {
        self.push(StageEffect::AcknowledgeEntry);
    }

    fn reset_list(&mut self, page: usize) {
        self.push(StageEffect::ResetList { page });
    }

    fn reveal_list_item(&mut self, page: usize, item: usize, text: &str) {
        self.push(StageEffect::RevealItem {
            page,
            item,
            text: text.to_string(),
        });
    }

    fn clear_text(&mut self, page: usize) {
        self.push(StageEffect::ClearText { page });
    }

    fn append_text(&mut self, page: usize, ch: char) {
        self.push(StageEffect::AppendText { page, ch });
    }
}
