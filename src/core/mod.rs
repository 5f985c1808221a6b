//! Core modules for Keepsake

pub mod ambient;
pub mod command;
pub mod controller;
pub mod gate;
pub mod navigator;
pub mod scheduler;
pub mod stage;
pub mod typing;

pub use ambient::AmbientTrack;
pub use command::{Command, CommandParser};
pub use controller::PresentationController;
pub use gate::UnlockGate;
pub use navigator::Navigator;
pub use scheduler::{Scheduler, Timer, TimerTask};
pub use stage::{RecordingStage, Stage};
pub use typing::{LetterTyper, TypeStep, TypingSession};
