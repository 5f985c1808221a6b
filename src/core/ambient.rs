//! Ambient background track

use serde::Serialize;
use tracing::debug;

use crate::core::Stage;
use crate::FULL_VOLUME;

/// Mirror of the single ambient audio element
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AmbientTrack {
    pub playing: bool,
    pub volume: f32,
}

impl Default for AmbientTrack {
    fn default() -> Self {
        Self {
            playing: false,
            volume: FULL_VOLUME,
        }
    }
}

impl AmbientTrack {
    /// Best-effort start; a refusal leaves the track silent
    pub fn play<S: Stage>(&mut self, stage: &mut S) {
        match stage.play_ambient() {
            Ok(()) => self.playing = true,
            Err(e) => debug!(error = %e, "ambient play refused"),
        }
    }

    pub fn pause<S: Stage>(&mut self, stage: &mut S) {
        stage.pause_ambient();
        self.playing = false;
    }

    pub fn set_volume<S: Stage>(&mut self, stage: &mut S, volume: f32) {
        stage.set_ambient_volume(volume);
        self.volume = volume;
    }
}
