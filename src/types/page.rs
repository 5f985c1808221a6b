//! Page definitions and the fixed deck

use serde::{Deserialize, Serialize};

use crate::PAGE_COUNT;

/// When a page's heart may be shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnlockKind {
    /// Shown as soon as the page is active
    AlwaysVisible,
    /// Shown once the user interacted with the page content
    OnInteraction,
    /// Shown once the page's media played to the end
    OnMediaEnd,
    /// Shown once the page's media started playing
    OnMediaPlay,
    /// Shown once the page's letter finished typing
    OnTypingComplete,
    /// Never shown (terminal page)
    Never,
}

/// What a page is, which decides its entry effects and media policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PageRole {
    /// Locked gift with the entry action
    Gift,
    /// Flippable photo cards
    Cards,
    /// Short edit video, unlocks when it ends
    Clip,
    /// Cinematic video, unlocks on play and ducks the ambient track
    Cinema,
    /// Future plans list with staggered fade-in
    Future,
    /// Typed letter
    Letter,
    /// Final page
    Finale,
}

impl PageRole {
    /// Does this page carry its own media element?
    pub fn has_media(&self) -> bool {
        matches!(self, PageRole::Clip | PageRole::Cinema)
    }

    /// Short label for terminal display
    pub fn label(&self) -> &'static str {
        match self {
            PageRole::Gift => "gift",
            PageRole::Cards => "cards",
            PageRole::Clip => "clip",
            PageRole::Cinema => "cinema",
            PageRole::Future => "future",
            PageRole::Letter => "letter",
            PageRole::Finale => "finale",
        }
    }
}

impl std::fmt::Display for PageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One page of the deck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageSpec {
    pub role: PageRole,
    pub title: &'static str,
    pub unlock: UnlockKind,
}

impl PageSpec {
    pub const fn new(role: PageRole, title: &'static str, unlock: UnlockKind) -> Self {
        Self { role, title, unlock }
    }
}

/// Ordered, fixed table of pages
#[derive(Debug, Clone)]
pub struct Deck {
    pages: [PageSpec; PAGE_COUNT],
}

impl Default for Deck {
    fn default() -> Self {
        Self::birthday()
    }
}

impl Deck {
    /// The birthday presentation
    pub fn birthday() -> Self {
        Self {
            pages: [
                PageSpec::new(PageRole::Gift, "A little something", UnlockKind::AlwaysVisible),
                PageSpec::new(PageRole::Cards, "Our moments", UnlockKind::OnInteraction),
                PageSpec::new(PageRole::Clip, "A short edit", UnlockKind::OnMediaEnd),
                PageSpec::new(PageRole::Cinema, "Our film", UnlockKind::OnMediaPlay),
                PageSpec::new(PageRole::Future, "What comes next", UnlockKind::AlwaysVisible),
                PageSpec::new(PageRole::Letter, "A letter", UnlockKind::OnTypingComplete),
                PageSpec::new(PageRole::Finale, "Happy birthday", UnlockKind::Never),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PageSpec> {
        self.pages.get(index)
    }

    /// Unlock kinds in page order
    pub fn unlock_kinds(&self) -> Vec<UnlockKind> {
        self.pages.iter().map(|p| p.unlock).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PageSpec> {
        self.pages.iter()
    }
}
