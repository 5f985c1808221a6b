//! Integration tests for navigation
//!
//! Active/inert state, back affordance, bounds, heart ownership, keyboard.

use keepsake::config::PresentationConfig;
use keepsake::core::{PresentationController, RecordingStage};
use keepsake::types::{Event, FocusTarget, ReasonCode, StageEffect};
use keepsake::PAGE_COUNT;
use pretty_assertions::assert_eq;

fn controller() -> PresentationController<RecordingStage> {
    PresentationController::new(PresentationConfig::default(), RecordingStage::new())
}

fn key(name: &str) -> Event {
    Event::Key(name.to_string())
}

/// After show_page(i) exactly one page is active and back is hidden iff i == 0
#[test]
fn test_show_page_exactly_one_active() {
    let mut ctrl = controller();

    for i in (0..PAGE_COUNT).chain((0..PAGE_COUNT).rev()) {
        let outcome = ctrl.show_page(i);
        assert_eq!(outcome.reason, ReasonCode::N001_SHOWN);

        let active = ctrl.active_pages();
        assert_eq!(active.iter().filter(|a| **a).count(), 1, "page {}", i);
        assert!(active[i]);
        assert_eq!(ctrl.back_visible(), i != 0);
    }
}

/// The stage sees the same active page and back visibility
#[test]
fn test_show_page_effects_reach_stage() {
    let mut ctrl = controller();
    ctrl.stage_mut().drain();

    ctrl.show_page(4);
    let effects = ctrl.stage_mut().drain();

    assert_eq!(effects[0], StageEffect::Blur);
    assert_eq!(effects[1], StageEffect::ActivatePage { page: 4 });
    assert_eq!(effects[2], StageEffect::BackVisible { visible: true });
    assert_eq!(effects[3], StageEffect::ShowAffordance { page: Some(4) });
    assert_eq!(effects[4], StageEffect::Focus { target: FocusTarget::Affordance(4) });
}

/// Locked pages get focus on the page container
#[test]
fn test_focus_falls_back_to_page() {
    let mut ctrl = controller();
    ctrl.show_page(1);
    assert_eq!(ctrl.stage().focused(), Some(FocusTarget::Page(1)));

    ctrl.show_page(6);
    assert_eq!(ctrl.stage().focused(), Some(FocusTarget::Page(6)));
}

/// advance() on the last page and retreat() on the first page change nothing
#[test]
fn test_bounds_are_silent_noops() {
    let mut ctrl = controller();

    let outcome = ctrl.retreat();
    assert_eq!(outcome.reason, ReasonCode::N002_AT_FIRST_PAGE);
    assert_eq!(ctrl.current(), 0);

    ctrl.show_page(PAGE_COUNT - 1);
    let effects_before = ctrl.stage().effects().len();
    let outcome = ctrl.advance();
    assert_eq!(outcome.reason, ReasonCode::N002_AT_LAST_PAGE);
    assert_eq!(ctrl.current(), PAGE_COUNT - 1);
    assert_eq!(ctrl.stage().effects().len(), effects_before);
}

/// Back affordance retreats one page
#[test]
fn test_back_retreats() {
    let mut ctrl = controller();
    ctrl.show_page(3);
    assert_eq!(ctrl.handle(Event::Back).reason, ReasonCode::N001_RETREATED);
    assert_eq!(ctrl.current(), 2);
}

/// Clicking a heart of another page never moves
#[test]
fn test_foreign_heart_never_navigates() {
    let mut ctrl = controller();
    ctrl.show_page(4);

    for page in 0..PAGE_COUNT {
        if page == 4 {
            continue;
        }
        let outcome = ctrl.handle(Event::Affordance(page));
        assert_eq!(outcome.reason, ReasonCode::G001_NOT_ACTIVE_PAGE);
        assert_eq!(ctrl.current(), 4);
    }

    assert_eq!(ctrl.handle(Event::Affordance(99)).reason, ReasonCode::N003_OUT_OF_RANGE);
    assert_eq!(ctrl.current(), 4);
}

/// The active, unlocked heart advances exactly one page
#[test]
fn test_own_heart_advances_once() {
    let mut ctrl = controller();
    ctrl.show_page(4);
    let outcome = ctrl.handle(Event::Affordance(4));
    assert_eq!(outcome.reason, ReasonCode::N001_ADVANCED);
    assert_eq!(ctrl.current(), 5);

    // the old heart is now stale
    assert_eq!(ctrl.handle(Event::Affordance(4)).reason, ReasonCode::G001_NOT_ACTIVE_PAGE);
    assert_eq!(ctrl.current(), 5);
}

/// A locked heart cannot be clicked through
#[test]
fn test_locked_heart_ignored() {
    let mut ctrl = controller();
    ctrl.show_page(1);
    assert_eq!(ctrl.handle(Event::Affordance(1)).reason, ReasonCode::G003_AFFORDANCE_HIDDEN);
    assert_eq!(ctrl.current(), 1);
}

/// The terminal page's heart is ignored
#[test]
fn test_terminal_heart_ignored() {
    let mut ctrl = controller();
    ctrl.show_page(6);
    assert_eq!(ctrl.handle(Event::Affordance(6)).reason, ReasonCode::G002_TERMINAL_PAGE);
    assert_eq!(ctrl.current(), 6);
}

/// Forward key moves exactly one page regardless of heart visibility
#[test]
fn test_forward_key_bypasses_heart() {
    let mut ctrl = controller();

    for i in 0..PAGE_COUNT - 1 {
        ctrl.show_page(i);
        let outcome = ctrl.handle(key("ArrowRight"));
        assert_eq!(outcome.reason, ReasonCode::N001_ADVANCED);
        assert_eq!(ctrl.current(), i + 1);
    }

    assert_eq!(ctrl.handle(key("ArrowRight")).reason, ReasonCode::N002_AT_LAST_PAGE);
    assert_eq!(ctrl.current(), PAGE_COUNT - 1);
}

/// Confirm key advances and backward key retreats
#[test]
fn test_confirm_and_backward_keys() {
    let mut ctrl = controller();
    ctrl.show_page(1);

    ctrl.handle(key("Enter"));
    assert_eq!(ctrl.current(), 2);

    ctrl.handle(key("ArrowLeft"));
    ctrl.handle(key("ArrowLeft"));
    assert_eq!(ctrl.current(), 0);

    assert_eq!(ctrl.handle(key("ArrowLeft")).reason, ReasonCode::N002_AT_FIRST_PAGE);
}

/// Custom key bindings replace the defaults
#[test]
fn test_custom_key_bindings() {
    let config: PresentationConfig =
        serde_json::from_str(r#"{"keys": {"forward": ["l"], "backward": ["h"], "confirm": []}}"#).unwrap();
    let mut ctrl = PresentationController::new(config, RecordingStage::new());

    assert_eq!(ctrl.handle(key("ArrowRight")).reason, ReasonCode::K001_UNBOUND_KEY);
    assert_eq!(ctrl.handle(key("Enter")).reason, ReasonCode::K001_UNBOUND_KEY);
    ctrl.handle(key("l"));
    ctrl.handle(key("l"));
    ctrl.handle(key("h"));
    assert_eq!(ctrl.current(), 1);
}
