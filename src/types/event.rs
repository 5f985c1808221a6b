//! Input events consumed by the controller

use serde::{Deserialize, Serialize};

/// An input delivered by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Event {
    /// Entry action on the gift page
    OpenGift,
    /// Heart on page `n` activated
    Affordance(usize),
    /// Global back affordance activated
    Back,
    /// User interacted with the content of page `n` (e.g. flipped a card)
    Interaction(usize),
    /// Media on page `n` started playing
    MediaPlay(usize),
    /// Media on page `n` played to the end
    MediaEnded(usize),
    /// Key pressed, by DOM key name
    Key(String),
}

impl Event {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Event::OpenGift => "open_gift",
            Event::Affordance(_) => "affordance",
            Event::Back => "back",
            Event::Interaction(_) => "interaction",
            Event::MediaPlay(_) => "media_play",
            Event::MediaEnded(_) => "media_ended",
            Event::Key(_) => "key",
        }
    }
}

/// What a bound key does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    Forward,
    Confirm,
    Backward,
}
