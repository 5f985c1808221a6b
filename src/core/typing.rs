//! Letter typing: one character per tick, once

use crate::types::ReasonCode;

/// A running character-by-character reveal
#[derive(Debug, Clone)]
pub struct TypingSession {
    chars: Vec<char>,
    cursor: usize,
    tick_ms: u64,
}

impl TypingSession {
    pub fn new(text: &str, tick_ms: u64) -> Self {
        Self {
            chars: text.chars().collect(),
            cursor: 0,
            tick_ms,
        }
    }

    /// Emit the next character
    pub fn next_char(&mut self) -> Option<char> {
        let ch = self.chars.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(ch)
    }

    pub fn is_complete(&self) -> bool {
        self.cursor >= self.chars.len()
    }

    /// Characters emitted so far
    pub fn typed(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn tick_ms(&self) -> u64 {
        self.tick_ms
    }
}

/// One emitted character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeStep {
    pub ch: char,
    /// This was the last character
    pub complete: bool,
}

#[derive(Debug, Clone, Default)]
enum TyperState {
    #[default]
    Idle,
    Running(TypingSession),
    Done { len: usize },
}

/// Owns at most one typing session over the whole presentation
#[derive(Debug, Clone, Default)]
pub struct LetterTyper {
    state: TyperState,
}

impl LetterTyper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start typing `text`; ignored while running or after completion.
    /// Empty text is done at once.
    pub fn start(&mut self, text: &str, tick_ms: u64) -> Result<(), ReasonCode> {
        match self.state {
            TyperState::Running(_) => Err(ReasonCode::T001_TYPING_ALREADY_RUNNING),
            TyperState::Done { .. } => Err(ReasonCode::T002_TYPING_ALREADY_DONE),
            TyperState::Idle => {
                let session = TypingSession::new(text, tick_ms);
                self.state = if session.is_empty() {
                    TyperState::Done { len: 0 }
                } else {
                    TyperState::Running(session)
                };
                Ok(())
            }
        }
    }

    /// Emit one character of the running session
    pub fn tick(&mut self) -> Option<TypeStep> {
        let TyperState::Running(session) = &mut self.state else {
            return None;
        };
        let ch = session.next_char()?;
        let complete = session.is_complete();
        if complete {
            let len = session.len();
            self.state = TyperState::Done { len };
        }
        Some(TypeStep { ch, complete })
    }

    /// Drop an unfinished session; a completed one is kept
    pub fn abandon(&mut self) -> bool {
        if matches!(self.state, TyperState::Running(_)) {
            self.state = TyperState::Idle;
            true
        } else {
            false
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self.state, TyperState::Done { .. })
    }

    /// Characters emitted by the current or completed session
    pub fn typed(&self) -> usize {
        match &self.state {
            TyperState::Idle => 0,
            TyperState::Running(session) => session.typed(),
            TyperState::Done { len } => *len,
        }
    }

    /// Tick interval of the running session
    pub fn tick_ms(&self) -> Option<u64> {
        match &self.state {
            TyperState::Running(session) => Some(session.tick_ms()),
            _ => None,
        }
    }
}
