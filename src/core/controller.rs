//! Presentation controller: navigator + unlock gate + page effects
//!
//! Single-threaded. Events arrive through [`PresentationController::handle`],
//! time through [`PresentationController::advance_clock`]. Every call returns
//! the reason code of what happened.

use chrono::Utc;
use tracing::{debug, info};

use crate::config::PresentationConfig;
use crate::core::ambient::AmbientTrack;
use crate::core::scheduler::{Scheduler, Timer, TimerTask};
use crate::core::{LetterTyper, Navigator, Stage, UnlockGate};
use crate::types::{
    Deck, Event, EventOutcome, FocusTarget, KeyAction, OneShotFlags, PageRole, ReasonCode,
    StatusOutput, UnlockSignal,
};

/// Owns all presentation state and drives a [`Stage`]
#[derive(Debug)]
pub struct PresentationController<S: Stage> {
    config: PresentationConfig,
    deck: Deck,
    navigator: Navigator,
    gate: UnlockGate,
    scheduler: Scheduler,
    typer: LetterTyper,
    ambient: AmbientTrack,
    /// Page media reported as playing
    media_playing: Vec<bool>,
    /// Gift opened (entry action fires once)
    engaged: bool,
    /// Ambient was paused by the cinema and is owed a resume
    ducked: bool,
    stage: S,
}

impl<S: Stage> PresentationController<S> {
    /// Create controller for the birthday deck and show the first page
    pub fn new(config: PresentationConfig, stage: S) -> Self {
        Self::with_deck(Deck::birthday(), config, stage)
    }

    /// Create controller for `deck` and show its first page
    pub fn with_deck(deck: Deck, config: PresentationConfig, stage: S) -> Self {
        let page_count = deck.len();
        let mut controller = Self {
            navigator: Navigator::new(page_count),
            gate: UnlockGate::new(deck.unlock_kinds()),
            scheduler: Scheduler::new(),
            typer: LetterTyper::new(),
            ambient: AmbientTrack::default(),
            media_playing: vec![false; page_count],
            engaged: false,
            ducked: false,
            config,
            deck,
            stage,
        };
        controller.show_page(0);
        controller
    }

    // =========================================================================
    // NAVIGATION
    // =========================================================================

    /// Make `index` the only active page
    pub fn show_page(&mut self, index: usize) -> EventOutcome {
        let Some(spec) = self.deck.get(index).copied() else {
            debug!(page = index, "show_page out of range");
            return self.outcome(ReasonCode::N003_OUT_OF_RANGE);
        };

        self.leave_current();
        self.stage.blur();

        let visit = match self.navigator.enter(index) {
            Ok(visit) => visit,
            Err(reason) => return self.outcome(reason),
        };
        self.stage.activate_page(index);
        self.stage.set_back_visible(self.navigator.back_visible());
        let visible = self.refresh_affordance();

        let target = match visible {
            Some(page) => FocusTarget::Affordance(page),
            None => FocusTarget::Page(index),
        };
        if let Err(e) = self.stage.focus(target) {
            debug!(error = %e, "focus refused");
        }

        info!(page = index, role = %spec.role, visit, heart = ?visible, "page shown");
        self.on_page_entered(index, spec.role, visit);
        self.outcome(ReasonCode::N001_SHOWN)
    }

    /// Go to the next page; no-op on the last page
    pub fn advance(&mut self) -> EventOutcome {
        match self.navigator.next_index() {
            Ok(next) => self.navigate(next, ReasonCode::N001_ADVANCED),
            Err(reason) => self.outcome(reason),
        }
    }

    /// Go to the previous page; no-op on the first page
    pub fn retreat(&mut self) -> EventOutcome {
        match self.navigator.prev_index() {
            Ok(prev) => self.navigate(prev, ReasonCode::N001_RETREATED),
            Err(reason) => self.outcome(reason),
        }
    }

    fn navigate(&mut self, index: usize, reason: ReasonCode) -> EventOutcome {
        let mut outcome = self.show_page(index);
        if outcome.reason == ReasonCode::N001_SHOWN {
            outcome.reason = reason;
        }
        outcome
    }

    /// End the current visit: cancel its timers, stop its media, drop unfinished typing
    fn leave_current(&mut self) {
        if !self.navigator.started() {
            return;
        }
        let page = self.navigator.current();
        let cancelled = self.scheduler.cancel_visit(self.navigator.visit());
        if cancelled > 0 {
            debug!(page, cancelled, "timers cancelled on leave");
        }

        let Some(role) = self.deck.get(page).map(|p| p.role) else {
            return;
        };
        if role == PageRole::Letter && self.typer.abandon() {
            debug!(page, "unfinished letter abandoned");
        }
        if role.has_media() && self.media_playing[page] {
            self.stage.pause_media(page);
            self.media_playing[page] = false;
            if role == PageRole::Cinema {
                self.unduck_ambient();
            }
        }
    }

    /// Page-became-active callback
    fn on_page_entered(&mut self, page: usize, role: PageRole, visit: u64) {
        match role {
            PageRole::Clip => {
                if let Err(e) = self.stage.play_media(page) {
                    debug!(page, error = %e, "autoplay refused, waiting for manual play");
                }
            }
            PageRole::Future => {
                self.stage.reset_list(page);
                for item in 0..self.config.future_items.len() {
                    let delay = self.config.reveal_delay_ms(item);
                    self.scheduler.schedule(delay, page, visit, TimerTask::RevealItem(item));
                }
            }
            PageRole::Letter => {
                let volume = self.config.reduced_volume;
                self.ambient.set_volume(&mut self.stage, volume);
                self.scheduler.schedule(
                    self.config.typing_start_delay_ms,
                    page,
                    visit,
                    TimerTask::StartTyping,
                );
            }
            PageRole::Gift | PageRole::Cards | PageRole::Cinema | PageRole::Finale => {}
        }
    }

    // =========================================================================
    // UNLOCK GATE
    // =========================================================================

    /// Hide all hearts, then show the active page's if unlocked
    fn refresh_affordance(&mut self) -> Option<usize> {
        let visible = self.gate.evaluate(self.navigator.current());
        self.stage.show_affordance(visible);
        visible
    }

    /// Record one-shot signals for `page` and re-evaluate
    fn record(&mut self, page: usize, signals: &[UnlockSignal]) -> EventOutcome {
        let before = self.gate.visible();
        let mut fresh = false;
        for signal in signals {
            match self.gate.record(page, *signal) {
                Ok(newly_set) => fresh |= newly_set,
                Err(reason) => return self.outcome(reason),
            }
        }
        if !fresh {
            return self.outcome(ReasonCode::U003_FLAG_ALREADY_SET);
        }

        let after = self.refresh_affordance();
        if after.is_some() && after != before {
            info!(page, "heart unlocked");
            self.outcome(ReasonCode::U001_UNLOCKED)
        } else {
            self.outcome(ReasonCode::U002_FLAG_RECORDED)
        }
    }

    // =========================================================================
    // EVENTS
    // =========================================================================

    /// Handle one input event
    pub fn handle(&mut self, event: Event) -> EventOutcome {
        debug!(event = event.name(), current = self.navigator.current(), "event");
        match event {
            Event::OpenGift => self.open_gift(),
            Event::Affordance(page) => self.activate_affordance(page),
            Event::Back => self.retreat(),
            Event::Interaction(page) => self.interact(page),
            Event::MediaPlay(page) => self.media_play(page),
            Event::MediaEnded(page) => self.media_ended(page),
            Event::Key(key) => self.key(&key),
        }
    }

    fn open_gift(&mut self) -> EventOutcome {
        let current = self.navigator.current();
        if self.role_of(current) != Some(PageRole::Gift) {
            return self.outcome(ReasonCode::I001_PAGE_INERT);
        }
        if self.engaged {
            return self.outcome(ReasonCode::E002_ALREADY_ENGAGED);
        }
        self.engaged = true;

        self.ambient.play(&mut self.stage);
        self.stage.acknowledge_entry();
        self.scheduler.schedule(
            self.config.entry_delay_ms,
            current,
            self.navigator.visit(),
            TimerTask::ShowPage(current + 1),
        );
        info!(delay_ms = self.config.entry_delay_ms, "gift opened");
        self.outcome(ReasonCode::E001_ENTRY_SCHEDULED)
    }

    /// Heart click: advances only for the visible heart of the active, non-terminal page
    fn activate_affordance(&mut self, page: usize) -> EventOutcome {
        if page >= self.deck.len() {
            return self.outcome(ReasonCode::N003_OUT_OF_RANGE);
        }
        if page != self.navigator.current() {
            debug!(page, current = self.navigator.current(), "stale heart ignored");
            return self.outcome(ReasonCode::G001_NOT_ACTIVE_PAGE);
        }
        if self.navigator.is_terminal() {
            return self.outcome(ReasonCode::G002_TERMINAL_PAGE);
        }
        if self.gate.visible() != Some(page) {
            return self.outcome(ReasonCode::G003_AFFORDANCE_HIDDEN);
        }
        self.advance()
    }

    fn interact(&mut self, page: usize) -> EventOutcome {
        if page >= self.deck.len() {
            return self.outcome(ReasonCode::N003_OUT_OF_RANGE);
        }
        if page != self.navigator.current() {
            return self.outcome(ReasonCode::I001_PAGE_INERT);
        }
        self.record(page, &[UnlockSignal::Interaction])
    }

    fn media_play(&mut self, page: usize) -> EventOutcome {
        let Some(role) = self.role_of(page) else {
            return self.outcome(ReasonCode::N003_OUT_OF_RANGE);
        };
        if !role.has_media() {
            return self.outcome(ReasonCode::M001_NO_MEDIA);
        }
        self.media_playing[page] = true;
        if role == PageRole::Cinema && self.ambient.playing {
            self.ambient.pause(&mut self.stage);
            self.ducked = true;
        }
        self.record(page, &[UnlockSignal::MediaPlayed])
    }

    fn media_ended(&mut self, page: usize) -> EventOutcome {
        let Some(role) = self.role_of(page) else {
            return self.outcome(ReasonCode::N003_OUT_OF_RANGE);
        };
        if !role.has_media() {
            return self.outcome(ReasonCode::M001_NO_MEDIA);
        }
        self.media_playing[page] = false;
        if role == PageRole::Cinema {
            self.unduck_ambient();
        }
        self.record(page, &[UnlockSignal::MediaPlayed, UnlockSignal::MediaEnded])
    }

    /// Resume ambient only if the cinema paused it
    fn unduck_ambient(&mut self) {
        if self.ducked {
            self.ducked = false;
            self.ambient.play(&mut self.stage);
        }
    }

    /// Keyboard navigation ignores heart visibility
    fn key(&mut self, key: &str) -> EventOutcome {
        match self.config.keys.action_for(key) {
            Some(KeyAction::Forward | KeyAction::Confirm) => self.advance(),
            Some(KeyAction::Backward) => self.retreat(),
            None => self.outcome(ReasonCode::K001_UNBOUND_KEY),
        }
    }

    // =========================================================================
    // TIME
    // =========================================================================

    /// Let `elapsed_ms` of virtual time pass, firing due timers in order
    pub fn advance_clock(&mut self, elapsed_ms: u64) -> Vec<EventOutcome> {
        let until = self.scheduler.now_ms().saturating_add(elapsed_ms);
        self.advance_clock_to(until)
    }

    /// Fire every timer due at or before `at_ms`
    pub fn advance_clock_to(&mut self, at_ms: u64) -> Vec<EventOutcome> {
        let mut outcomes = Vec::new();
        while let Some(timer) = self.scheduler.pop_due(at_ms) {
            outcomes.push(self.fire(timer));
        }
        self.scheduler.settle(at_ms);
        outcomes
    }

    /// Due time of the next pending timer
    pub fn next_deadline(&self) -> Option<u64> {
        self.scheduler.next_deadline()
    }

    fn fire(&mut self, timer: Timer) -> EventOutcome {
        if timer.visit != self.navigator.visit() {
            debug!(page = timer.page, visit = timer.visit, "stale timer dropped");
            return self.outcome(ReasonCode::T000_TIMER_STALE);
        }
        match timer.task {
            TimerTask::ShowPage(index) => self.show_page(index),
            TimerTask::RevealItem(item) => {
                if let Some(text) = self.config.future_items.get(item) {
                    self.stage.reveal_list_item(timer.page, item, text);
                }
                self.outcome(ReasonCode::T005_ITEM_REVEALED)
            }
            TimerTask::StartTyping => {
                if let Err(reason) = self.typer.start(&self.config.letter, self.config.typing_tick_ms) {
                    return self.outcome(reason);
                }
                self.stage.clear_text(timer.page);
                if self.typer.is_done() {
                    let mut outcome = self.record(timer.page, &[UnlockSignal::TypingDone]);
                    outcome.reason = ReasonCode::T004_TYPING_COMPLETE;
                    return outcome;
                }
                self.scheduler.schedule(
                    self.config.typing_tick_ms,
                    timer.page,
                    timer.visit,
                    TimerTask::TypeTick,
                );
                info!(page = timer.page, chars = self.config.letter.chars().count(), "letter typing started");
                self.outcome(ReasonCode::T001_TYPING_STARTED)
            }
            TimerTask::TypeTick => {
                let Some(step) = self.typer.tick() else {
                    return self.outcome(ReasonCode::T000_TIMER_STALE);
                };
                self.stage.append_text(timer.page, step.ch);
                if step.complete {
                    let mut outcome = self.record(timer.page, &[UnlockSignal::TypingDone]);
                    outcome.reason = ReasonCode::T004_TYPING_COMPLETE;
                    return outcome;
                }
                let tick = self.typer.tick_ms().unwrap_or(self.config.typing_tick_ms);
                self.scheduler.schedule(tick, timer.page, timer.visit, TimerTask::TypeTick);
                self.outcome(ReasonCode::T003_TYPED)
            }
        }
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    fn outcome(&self, reason: ReasonCode) -> EventOutcome {
        EventOutcome {
            reason,
            current: self.navigator.current(),
            affordance: self.gate.visible(),
        }
    }

    fn role_of(&self, page: usize) -> Option<PageRole> {
        self.deck.get(page).map(|p| p.role)
    }

    /// Active page index
    pub fn current(&self) -> usize {
        self.navigator.current()
    }

    /// Visible heart, if any
    pub fn affordance(&self) -> Option<usize> {
        self.gate.visible()
    }

    /// Heart visibility per page
    pub fn affordance_visibility(&self) -> Vec<bool> {
        self.gate.visibility()
    }

    /// Active flag per page
    pub fn active_pages(&self) -> Vec<bool> {
        self.navigator.active_pages()
    }

    pub fn back_visible(&self) -> bool {
        self.navigator.back_visible()
    }

    pub fn engaged(&self) -> bool {
        self.engaged
    }

    pub fn ambient(&self) -> AmbientTrack {
        self.ambient
    }

    pub fn flags(&self, page: usize) -> Option<&OneShotFlags> {
        self.gate.flags(page)
    }

    /// Letter characters emitted so far
    pub fn letter_typed(&self) -> usize {
        self.typer.typed()
    }

    pub fn letter_done(&self) -> bool {
        self.typer.is_done()
    }

    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.len()
    }

    pub fn config(&self) -> &PresentationConfig {
        &self.config
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn stage(&self) -> &S {
        &self.stage
    }

    pub fn stage_mut(&mut self) -> &mut S {
        &mut self.stage
    }

    /// Snapshot for display
    pub fn status(&self) -> StatusOutput {
        let current = self.navigator.current();
        let (role, title) = self
            .deck
            .get(current)
            .map(|p| (p.role, p.title.to_string()))
            .unwrap_or((PageRole::Gift, String::new()));
        StatusOutput {
            timestamp: Utc::now(),
            clock_ms: self.scheduler.now_ms(),
            current,
            role,
            title,
            affordance: self.gate.visible(),
            back_visible: self.navigator.back_visible(),
            engaged: self.engaged,
            ambient_playing: self.ambient.playing,
            ambient_volume: self.ambient.volume,
            letter_typed: self.typer.typed(),
            letter_len: self.config.letter.chars().count(),
            pending_timers: self.scheduler.len(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
