//! Reason codes for every handled event and timer

use serde::{Deserialize, Serialize};

/// Why the controller did (or did not) change state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ReasonCode {
    // =========================================================================
    // N: Navigation
    // =========================================================================
    /// Moved forward one page
    N001_ADVANCED,
    /// Moved back one page
    N001_RETREATED,
    /// Showed a page directly
    N001_SHOWN,
    /// Advance requested on the last page
    N002_AT_LAST_PAGE,
    /// Retreat requested on the first page
    N002_AT_FIRST_PAGE,
    /// Requested page does not exist
    N003_OUT_OF_RANGE,

    // =========================================================================
    // G: Heart gate
    // =========================================================================
    /// Heart belongs to a page that is not active
    G001_NOT_ACTIVE_PAGE,
    /// Heart activated on the terminal page
    G002_TERMINAL_PAGE,
    /// Heart activated while its page is still locked
    G003_AFFORDANCE_HIDDEN,

    // =========================================================================
    // U: Unlock flags
    // =========================================================================
    /// Flag recorded and the active page's heart is now visible
    U001_UNLOCKED,
    /// Flag recorded, visibility unchanged
    U002_FLAG_RECORDED,
    /// Flag was already set
    U003_FLAG_ALREADY_SET,

    // =========================================================================
    // E: Entry gate
    // =========================================================================
    /// Gift opened, first page scheduled
    E001_ENTRY_SCHEDULED,
    /// Gift already opened once
    E002_ALREADY_ENGAGED,

    // =========================================================================
    // I / M / K: Input filtering
    // =========================================================================
    /// Input aimed at an inert page
    I001_PAGE_INERT,
    /// Media event for a page without media
    M001_NO_MEDIA,
    /// Key is not bound to any action
    K001_UNBOUND_KEY,

    // =========================================================================
    // T: Timers and typing
    // =========================================================================
    /// Timer fired for a visit that already ended
    T000_TIMER_STALE,
    /// Letter typing started
    T001_TYPING_STARTED,
    /// Typing start ignored, a session is running
    T001_TYPING_ALREADY_RUNNING,
    /// Typing start ignored, the letter was already typed
    T002_TYPING_ALREADY_DONE,
    /// One character typed
    T003_TYPED,
    /// Last character typed
    T004_TYPING_COMPLETE,
    /// Future-list item revealed
    T005_ITEM_REVEALED,
}

impl ReasonCode {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::N001_ADVANCED => "N001_ADVANCED",
            Self::N001_RETREATED => "N001_RETREATED",
            Self::N001_SHOWN => "N001_SHOWN",
            Self::N002_AT_LAST_PAGE => "N002_AT_LAST_PAGE",
            Self::N002_AT_FIRST_PAGE => "N002_AT_FIRST_PAGE",
            Self::N003_OUT_OF_RANGE => "N003_OUT_OF_RANGE",
            Self::G001_NOT_ACTIVE_PAGE => "G001_NOT_ACTIVE_PAGE",
            Self::G002_TERMINAL_PAGE => "G002_TERMINAL_PAGE",
            Self::G003_AFFORDANCE_HIDDEN => "G003_AFFORDANCE_HIDDEN",
            Self::U001_UNLOCKED => "U001_UNLOCKED",
            Self::U002_FLAG_RECORDED => "U002_FLAG_RECORDED",
            Self::U003_FLAG_ALREADY_SET => "U003_FLAG_ALREADY_SET",
            Self::E001_ENTRY_SCHEDULED => "E001_ENTRY_SCHEDULED",
            Self::E002_ALREADY_ENGAGED => "E002_ALREADY_ENGAGED",
            Self::I001_PAGE_INERT => "I001_PAGE_INERT",
            Self::M001_NO_MEDIA => "M001_NO_MEDIA",
            Self::K001_UNBOUND_KEY => "K001_UNBOUND_KEY",
            Self::T000_TIMER_STALE => "T000_TIMER_STALE",
            Self::T001_TYPING_STARTED => "T001_TYPING_STARTED",
            Self::T001_TYPING_ALREADY_RUNNING => "T001_TYPING_ALREADY_RUNNING",
            Self::T002_TYPING_ALREADY_DONE => "T002_TYPING_ALREADY_DONE",
            Self::T003_TYPED => "T003_TYPED",
            Self::T004_TYPING_COMPLETE => "T004_TYPING_COMPLETE",
            Self::T005_ITEM_REVEALED => "T005_ITEM_REVEALED",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::N001_ADVANCED => "Moved to next page",
            Self::N001_RETREATED => "Moved to previous page",
            Self::N001_SHOWN => "Page shown",
            Self::N002_AT_LAST_PAGE => "Already on the last page",
            Self::N002_AT_FIRST_PAGE => "Already on the first page",
            Self::N003_OUT_OF_RANGE => "No such page",
            Self::G001_NOT_ACTIVE_PAGE => "Heart belongs to another page",
            Self::G002_TERMINAL_PAGE => "Final page has no next page",
            Self::G003_AFFORDANCE_HIDDEN => "Heart is still locked",
            Self::U001_UNLOCKED => "Heart unlocked",
            Self::U002_FLAG_RECORDED => "Progress recorded",
            Self::U003_FLAG_ALREADY_SET => "Nothing new",
            Self::E001_ENTRY_SCHEDULED => "Gift opened",
            Self::E002_ALREADY_ENGAGED => "Gift already opened",
            Self::I001_PAGE_INERT => "Page is not active",
            Self::M001_NO_MEDIA => "Page has no media",
            Self::K001_UNBOUND_KEY => "Key not bound",
            Self::T000_TIMER_STALE => "Timer outlived its page",
            Self::T001_TYPING_STARTED => "Letter typing started",
            Self::T001_TYPING_ALREADY_RUNNING => "Letter is already being typed",
            Self::T002_TYPING_ALREADY_DONE => "Letter already typed",
            Self::T003_TYPED => "Character typed",
            Self::T004_TYPING_COMPLETE => "Letter complete",
            Self::T005_ITEM_REVEALED => "List item revealed",
        }
    }

    /// Did the current page change?
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Self::N001_ADVANCED | Self::N001_RETREATED | Self::N001_SHOWN
        )
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}
