//! Integration tests for timed scenarios
//!
//! Entry gate, list reveal, letter typing, best-effort media and focus.

use keepsake::config::PresentationConfig;
use keepsake::core::{PresentationController, RecordingStage};
use keepsake::types::{Event, FocusTarget, ReasonCode, StageEffect};
use keepsake::{ENTRY_DELAY_MS, LETTER_TEXT, REDUCED_VOLUME};
use pretty_assertions::assert_eq;

fn controller() -> PresentationController<RecordingStage> {
    PresentationController::new(PresentationConfig::default(), RecordingStage::new())
}

fn revealed_items(ctrl: &PresentationController<RecordingStage>) -> Vec<usize> {
    ctrl.stage()
        .effects()
        .iter()
        .filter_map(|e| match e {
            StageEffect::RevealItem { item, .. } => Some(*item),
            _ => None,
        })
        .collect()
}

// =============================================================================
// ENTRY GATE
// =============================================================================

/// Gift → delay → cards page with a locked heart
#[test]
fn test_entry_scenario() {
    let mut ctrl = controller();
    assert_eq!(ctrl.current(), 0);

    let outcome = ctrl.handle(Event::OpenGift);
    assert_eq!(outcome.reason, ReasonCode::E001_ENTRY_SCHEDULED);
    assert!(ctrl.stage().effects().contains(&StageEffect::AcknowledgeEntry));
    assert!(ctrl.stage().effects().contains(&StageEffect::PlayAmbient));
    assert_eq!(ctrl.current(), 0);

    let outcomes = ctrl.advance_clock(ENTRY_DELAY_MS);
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].reason, ReasonCode::N001_SHOWN);
    assert_eq!(ctrl.current(), 1);
    assert_eq!(ctrl.affordance(), None);
}

/// Blocked autoplay is swallowed; the presentation still opens
#[test]
fn test_blocked_autoplay_does_not_stop_entry() {
    let stage = RecordingStage::new().with_autoplay_blocked();
    let mut ctrl = PresentationController::new(PresentationConfig::default(), stage);

    assert_eq!(ctrl.handle(Event::OpenGift).reason, ReasonCode::E001_ENTRY_SCHEDULED);
    assert!(!ctrl.ambient().playing);
    assert!(!ctrl.stage().effects().contains(&StageEffect::PlayAmbient));

    ctrl.advance_clock(ENTRY_DELAY_MS);
    assert_eq!(ctrl.current(), 1);
}

/// Gift opened from another page is ignored
#[test]
fn test_gift_only_on_gift_page() {
    let mut ctrl = controller();
    ctrl.show_page(2);
    assert_eq!(ctrl.handle(Event::OpenGift).reason, ReasonCode::I001_PAGE_INERT);
    assert!(!ctrl.engaged());

    ctrl.show_page(0);
    assert_eq!(ctrl.handle(Event::OpenGift).reason, ReasonCode::E001_ENTRY_SCHEDULED);
    assert!(ctrl.engaged());
}

// =============================================================================
// FOCUS AND MEDIA FAILURES
// =============================================================================

/// A heart that refuses focus leaves focus empty but navigation intact
#[test]
fn test_unfocusable_heart_is_swallowed() {
    let stage = RecordingStage::new().with_unfocusable(FocusTarget::Affordance(0));
    let mut ctrl = PresentationController::new(PresentationConfig::default(), stage);

    assert_eq!(ctrl.current(), 0);
    assert_eq!(ctrl.stage().focused(), None);

    ctrl.handle(Event::Affordance(0));
    assert_eq!(ctrl.current(), 1);
    assert_eq!(ctrl.stage().focused(), Some(FocusTarget::Page(1)));
}

/// Rejected clip autoplay waits for a manual play
#[test]
fn test_rejected_clip_autoplay_waits() {
    let stage = RecordingStage::new().with_media_rejected();
    let mut ctrl = PresentationController::new(PresentationConfig::default(), stage);

    ctrl.show_page(2);
    assert!(!ctrl.stage().effects().contains(&StageEffect::PlayMedia { page: 2 }));
    assert_eq!(ctrl.affordance(), None);

    ctrl.handle(Event::MediaPlay(2));
    ctrl.handle(Event::MediaEnded(2));
    assert_eq!(ctrl.affordance(), Some(2));
}

/// Cinema pauses and resumes ambient audio in event order
#[test]
fn test_cinema_ambient_order() {
    let mut ctrl = controller();
    ctrl.handle(Event::OpenGift);
    ctrl.advance_clock(ENTRY_DELAY_MS);
    ctrl.show_page(3);
    ctrl.stage_mut().drain();

    ctrl.handle(Event::MediaPlay(3));
    ctrl.handle(Event::MediaEnded(3));

    let audio: Vec<StageEffect> = ctrl
        .stage()
        .effects()
        .iter()
        .filter(|e| matches!(e, StageEffect::PlayAmbient | StageEffect::PauseAmbient))
        .cloned()
        .collect();
    assert_eq!(audio, vec![StageEffect::PauseAmbient, StageEffect::PlayAmbient]);
    assert!(ctrl.ambient().playing);
}

// =============================================================================
// LIST REVEAL
// =============================================================================

/// Items fade in at 300 + 180·i ms
#[test]
fn test_list_reveal_is_staggered() {
    let mut ctrl = controller();
    ctrl.show_page(4);
    assert!(ctrl.stage().effects().contains(&StageEffect::ResetList { page: 4 }));

    ctrl.advance_clock(299);
    assert!(revealed_items(&ctrl).is_empty());

    ctrl.advance_clock(1);
    assert_eq!(revealed_items(&ctrl), vec![0]);

    ctrl.advance_clock(180);
    assert_eq!(revealed_items(&ctrl), vec![0, 1]);

    ctrl.advance_clock(10_000);
    let count = ctrl.config().future_items.len();
    assert_eq!(revealed_items(&ctrl), (0..count).collect::<Vec<_>>());
}

/// Leaving the page cancels the remaining reveals
#[test]
fn test_list_reveal_cancelled_on_leave() {
    let mut ctrl = controller();
    ctrl.show_page(4);
    ctrl.advance_clock(500);
    assert_eq!(revealed_items(&ctrl), vec![0, 1]);

    ctrl.retreat();
    ctrl.advance_clock(10_000);
    assert_eq!(revealed_items(&ctrl), vec![0, 1]);
}

// =============================================================================
// LETTER TYPING
// =============================================================================

/// Volume drops to 0.3, the letter types out, then the heart shows
#[test]
fn test_typing_scenario() {
    let mut ctrl = controller();
    ctrl.show_page(5);
    assert_eq!(ctrl.ambient().volume, REDUCED_VOLUME);
    assert!(ctrl
        .stage()
        .effects()
        .contains(&StageEffect::AmbientVolume { volume: REDUCED_VOLUME }));
    assert_eq!(ctrl.affordance(), None);

    let duration = ctrl.config().letter_duration_ms();
    assert_eq!(duration, 600 + LETTER_TEXT.chars().count() as u64 * 26);

    ctrl.advance_clock(duration - 1);
    assert_eq!(ctrl.affordance(), None);
    assert_eq!(ctrl.letter_typed(), LETTER_TEXT.chars().count() - 1);

    let outcomes = ctrl.advance_clock(1);
    assert_eq!(outcomes.last().map(|o| o.reason), Some(ReasonCode::T004_TYPING_COMPLETE));
    assert_eq!(ctrl.affordance(), Some(5));
    assert!(ctrl.letter_done());
    assert_eq!(ctrl.stage().text(5), LETTER_TEXT);
}

/// Nothing is typed before the start delay
#[test]
fn test_typing_waits_for_start_delay() {
    let mut ctrl = controller();
    ctrl.show_page(5);
    ctrl.advance_clock(600);
    assert_eq!(ctrl.letter_typed(), 0);
    ctrl.advance_clock(26);
    assert_eq!(ctrl.letter_typed(), 1);
    assert_eq!(ctrl.stage().text(5), "I");
}

/// Leaving mid-letter discards it; coming back types it from the start
#[test]
fn test_typing_restarts_after_abandon() {
    let mut ctrl = controller();
    ctrl.show_page(5);
    ctrl.advance_clock(1_000);
    assert!(ctrl.letter_typed() > 0);

    ctrl.retreat();
    assert_eq!(ctrl.letter_typed(), 0);
    ctrl.advance_clock(10_000);
    assert_eq!(ctrl.letter_typed(), 0);

    ctrl.advance();
    let duration = ctrl.config().letter_duration_ms();
    ctrl.advance_clock(duration);
    assert_eq!(ctrl.affordance(), Some(5));
    assert_eq!(ctrl.stage().text(5), LETTER_TEXT);
}

/// A finished letter is never typed again and stays unlocked
#[test]
fn test_typing_not_restarted_after_completion() {
    let mut ctrl = controller();
    ctrl.show_page(5);
    let duration = ctrl.config().letter_duration_ms();
    ctrl.advance_clock(duration);
    assert!(ctrl.letter_done());

    ctrl.retreat();
    ctrl.advance();
    assert_eq!(ctrl.affordance(), Some(5));

    let outcomes = ctrl.advance_clock(duration);
    assert!(outcomes
        .iter()
        .any(|o| o.reason == ReasonCode::T002_TYPING_ALREADY_DONE));
    assert_eq!(ctrl.stage().text(5), LETTER_TEXT);
}

/// Shorter letter and faster tick from config
#[test]
fn test_configured_letter() {
    let config = PresentationConfig {
        letter: "hi!".to_string(),
        typing_tick_ms: 10,
        typing_start_delay_ms: 0,
        ..PresentationConfig::default()
    };
    let mut ctrl = PresentationController::new(config, RecordingStage::new());
    ctrl.show_page(5);
    ctrl.advance_clock(30);
    assert_eq!(ctrl.stage().text(5), "hi!");
    assert_eq!(ctrl.affordance(), Some(5));
}

/// An empty letter completes as soon as typing starts
#[test]
fn test_empty_letter_unlocks_heart() {
    let config = PresentationConfig {
        letter: String::new(),
        ..PresentationConfig::default()
    };
    let mut ctrl = PresentationController::new(config, RecordingStage::new());
    ctrl.show_page(5);
    assert_eq!(ctrl.affordance(), None);

    let outcomes = ctrl.advance_clock(10_000);
    let reasons: Vec<ReasonCode> = outcomes.iter().map(|o| o.reason).collect();
    assert_eq!(reasons, vec![ReasonCode::T004_TYPING_COMPLETE]);
    assert_eq!(ctrl.affordance(), Some(5));
    assert!(ctrl.letter_done());
    assert_eq!(ctrl.stage().text(5), "");
}
