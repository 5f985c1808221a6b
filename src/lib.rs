//! Keepsake: guided page-by-page gift presentation
//!
//! A fixed sequence of pages, each with a single "heart" that unlocks once the
//! page's completion condition holds. The controller is headless; hosts plug
//! in through [`core::Stage`].

pub mod config;
pub mod core;
pub mod error;
pub mod types;

// =============================================================================
// DECK
// =============================================================================

/// Number of pages in the presentation (fixed at startup)
pub const PAGE_COUNT: usize = 7;

// =============================================================================
// TIMINGS [ms] - defaults for PresentationConfig
// =============================================================================

/// Delay between opening the gift and showing the first card page
pub const ENTRY_DELAY_MS: u64 = 600;

/// Delay between entering the letter page and the first typed character
pub const TYPING_START_DELAY_MS: u64 = 600;

/// Interval between two typed characters
pub const TYPING_TICK_MS: u64 = 26;

/// Delay before the first future-list item fades in
pub const LIST_BASE_DELAY_MS: u64 = 300;

/// Additional delay per future-list item
pub const LIST_STAGGER_MS: u64 = 180;

// =============================================================================
// AUDIO
// =============================================================================

/// Ambient volume at startup
pub const FULL_VOLUME: f32 = 1.0;

/// Ambient volume while the letter is being read
pub const REDUCED_VOLUME: f32 = 0.3;

// =============================================================================
// KEYS - DOM key names
// =============================================================================

pub const KEY_FORWARD: &str = "ArrowRight";
pub const KEY_CONFIRM: &str = "Enter";
pub const KEY_BACKWARD: &str = "ArrowLeft";

// =============================================================================
// CONTENT
// =============================================================================

/// Letter typed out on the letter page
pub const LETTER_TEXT: &str = "I love the way you make small things important. I love your courage, the warmth you bring, the way you make me feel seen. Today I celebrate you \u{2014} every little and huge thing that is you.";

/// Items of the future-plans list
pub const FUTURE_ITEMS: [&str; 5] = [
    "Watch the sunrise somewhere new",
    "Cook the recipe we keep postponing",
    "Finally take that road trip",
    "Build a home full of plants and music",
    "Keep choosing each other, every day",
];

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
