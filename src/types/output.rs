//! Output structures: stage effects, outcomes, status

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::types::{PageRole, ReasonCode};

/// Where interactive focus goes after a page change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "page", rename_all = "snake_case")]
pub enum FocusTarget {
    /// The heart of page `n`
    Affordance(usize),
    /// The container of page `n`
    Page(usize),
}

impl std::fmt::Display for FocusTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FocusTarget::Affordance(page) => write!(f, "heart#{}", page),
            FocusTarget::Page(page) => write!(f, "page#{}", page),
        }
    }
}

/// One effect applied to the stage
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum StageEffect {
    ActivatePage { page: usize },
    ShowAffordance { page: Option<usize> },
    BackVisible { visible: bool },
    Blur,
    Focus { target: FocusTarget },
    PlayAmbient,
    PauseAmbient,
    AmbientVolume { volume: f32 },
    PlayMedia { page: usize },
    PauseMedia { page: usize },
    AcknowledgeEntry,
    ResetList { page: usize },
    RevealItem { page: usize, item: usize, text: String },
    ClearText { page: usize },
    AppendText { page: usize, ch: char },
}

impl StageEffect {
    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        match self {
            StageEffect::ActivatePage { page } => {
                format!("▶ page {} active", page).bold().to_string()
            }
            StageEffect::ShowAffordance { page: Some(page) } => {
                format!("♥ heart {} visible", page).red().bold().to_string()
            }
            StageEffect::ShowAffordance { page: None } => "♡ hearts hidden".dimmed().to_string(),
            StageEffect::AcknowledgeEntry => "🎁 gift opens".yellow().to_string(),
            StageEffect::RevealItem { item, text, .. } => {
                format!("  {}. {}", item + 1, text).cyan().to_string()
            }
            StageEffect::PlayAmbient | StageEffect::PauseAmbient | StageEffect::AmbientVolume { .. } => {
                format!("♪ {}", self.to_parseable_string()).magenta().to_string()
            }
            _ => self.to_parseable_string().dimmed().to_string(),
        }
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        match self {
            StageEffect::ActivatePage { page } => format!("activate page={}", page),
            StageEffect::ShowAffordance { page: Some(page) } => format!("heart page={}", page),
            StageEffect::ShowAffordance { page: None } => "heart page=none".to_string(),
            StageEffect::BackVisible { visible } => format!("back visible={}", visible),
            StageEffect::Blur => "blur".to_string(),
            StageEffect::Focus { target } => format!("focus target={}", target),
            StageEffect::PlayAmbient => "ambient play".to_string(),
            StageEffect::PauseAmbient => "ambient pause".to_string(),
            StageEffect::AmbientVolume { volume } => format!("ambient volume={:.2}", volume),
            StageEffect::PlayMedia { page } => format!("media play page={}", page),
            StageEffect::PauseMedia { page } => format!("media pause page={}", page),
            StageEffect::AcknowledgeEntry => "entry acknowledged".to_string(),
            StageEffect::ResetList { page } => format!("list reset page={}", page),
            StageEffect::RevealItem { page, item, text } => {
                format!("list reveal page={} item={} text={:?}", page, item, text)
            }
            StageEffect::ClearText { page } => format!("text clear page={}", page),
            StageEffect::AppendText { page, ch } => format!("text append page={} ch={:?}", page, ch),
        }
    }
}

/// Result of handling one event or timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EventOutcome {
    /// Why the controller did what it did
    pub reason: ReasonCode,
    /// Current page after handling
    pub current: usize,
    /// Visible heart after handling
    pub affordance: Option<usize>,
}

impl EventOutcome {
    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let line = self.to_parseable_string();
        if self.reason.is_navigation() {
            line.green().to_string()
        } else if matches!(self.reason, ReasonCode::U001_UNLOCKED) {
            line.red().to_string()
        } else {
            line.bright_black().to_string()
        }
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "page={} | heart={} | {}",
            self.current,
            display_heart(self.affordance),
            self.reason.code()
        )
    }
}

/// Snapshot of the presentation for display
#[derive(Debug, Clone, Serialize)]
pub struct StatusOutput {
    pub timestamp: DateTime<Utc>,
    /// Virtual clock (ms since start)
    pub clock_ms: u64,
    pub current: usize,
    pub role: PageRole,
    pub title: String,
    /// Visible heart, if any
    pub affordance: Option<usize>,
    pub back_visible: bool,
    pub engaged: bool,
    pub ambient_playing: bool,
    pub ambient_volume: f32,
    /// Letter characters emitted so far
    pub letter_typed: usize,
    pub letter_len: usize,
    /// Timers still pending
    pub pending_timers: usize,
}

impl StatusOutput {
    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let heart = match self.affordance {
            Some(_) => "♥".red().bold().to_string(),
            None => "♡".dimmed().to_string(),
        };
        format!(
            "{} {} [{}/{}] {} | t={:.1}s | ambient={} vol={:.1} | letter={}/{}",
            heart,
            self.role.label().bold(),
            self.current + 1,
            crate::PAGE_COUNT,
            self.title.italic(),
            self.clock_ms as f64 / 1000.0,
            if self.ambient_playing { "on" } else { "off" },
            self.ambient_volume,
            self.letter_typed,
            self.letter_len
        )
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "page={} | role={} | heart={} | back={} | t={}ms | ambient={} | volume={:.2} | letter={}/{} | timers={}",
            self.current,
            self.role,
            display_heart(self.affordance),
            self.back_visible,
            self.clock_ms,
            if self.ambient_playing { "playing" } else { "paused" },
            self.ambient_volume,
            self.letter_typed,
            self.letter_len,
            self.pending_timers
        )
    }
}

fn display_heart(affordance: Option<usize>) -> String {
    affordance.map(|p| p.to_string()).unwrap_or_else(|| "none".to_string())
}
