//! Core types for Keepsake

mod page;
mod signal;
mod event;
mod reason;
mod output;

pub use page::{Deck, PageRole, PageSpec, UnlockKind};
pub use signal::{OneShotFlags, UnlockSignal};
pub use event::{Event, KeyAction};
pub use reason::ReasonCode;
pub use output::{EventOutcome, FocusTarget, StageEffect, StatusOutput};
