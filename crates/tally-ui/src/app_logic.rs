//! Platform-agnostic Dioxus application logic.
//!
//! Contains the signal-backed [`ScoreView`] adapter and the coroutine body
//! that owns the [`ScoreController`], parameterised over a [`Platform`] so
//! that platform crates (tally-web, a future desktop crate) only need to
//! provide blocking dialogs and a timer.

use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use dioxus::prelude::*;
use futures_util::StreamExt;
use tally_core::config::PULSE_DURATION;
use tally_core::controller::ScoreController;
use tally_core::game_state::{Player, PlayerId};
use tally_core::view::{ConfirmIntent, PlayerCard, Pulse, ScoreView, Section};

use crate::{CardState, UiMessage, UiSignals};

// ---------------------------------------------------------------------------
// Platform hooks
// ---------------------------------------------------------------------------

/// Dialogs and timers supplied by the platform crate.
///
/// `confirm` and `alert` are expected to block until the user answers, the
/// way the browser's native dialogs do.
pub trait Platform: ConfirmIntent + Copy + 'static {
    /// Show a blocking message.
    fn alert(&self, message: &str);

    /// Sleep for the given number of milliseconds.
    fn sleep_ms(&self, ms: u64) -> impl Future<Output = ()> + 'static;
}

// ---------------------------------------------------------------------------
// Signal-backed view
// ---------------------------------------------------------------------------

/// [`ScoreView`] that writes into [`UiSignals`], letting Dioxus re-render
/// whatever changed.
pub struct SignalView<P> {
    signals: UiSignals,
    platform: P,
    generation: u64,
    pulse_seq: u64,
}

impl<P: Platform> SignalView<P> {
    pub fn new(signals: UiSignals, platform: P) -> Self {
        Self {
            signals,
            platform,
            generation: 0,
            pulse_seq: 0,
        }
    }

    /// Schedule the revert of pulse `seq` on card `id`.
    fn schedule_revert(&self, id: PlayerId, seq: u64) {
        let mut cards = self.signals.cards;
        let platform = self.platform;
        spawn(async move {
            platform.sleep_ms(PULSE_DURATION.as_millis() as u64).await;
            if let Some(card) = cards.write().get_mut(id)
                && card.pulse_seq == seq
            {
                card.pulse = None;
            }
        });
    }
}

impl<P: Platform> ScoreView for SignalView<P> {
    fn show_section(&mut self, section: Section) {
        self.signals.section.set(section);
    }

    fn render_players(&mut self, players: &[Player]) {
        self.generation += 1;
        let generation = self.generation;
        self.signals.cards.set(
            players
                .iter()
                .map(|p| CardState::new(PlayerCard::from_player(p), generation))
                .collect(),
        );
    }

    fn update_score(&mut self, id: PlayerId, score: i64, pulse: Option<Pulse>) {
        let seq = {
            let mut cards = self.signals.cards.write();
            let Some(card) = cards.get_mut(id) else {
                return;
            };
            // Text first; the revert below only touches cosmetics.
            card.card.score = score;
            let Some(pulse) = pulse else {
                return;
            };
            self.pulse_seq += 1;
            card.pulse = Some(pulse);
            card.pulse_seq = self.pulse_seq;
            self.pulse_seq
        };
        self.schedule_revert(id, seq);
    }

    fn set_undo_enabled(&mut self, id: PlayerId, enabled: bool) {
        if let Some(card) = self.signals.cards.write().get_mut(id) {
            card.card.undo_enabled = enabled;
        }
    }

    fn set_points_input(&mut self, id: PlayerId, text: &str) {
        if let Some(card) = self.signals.cards.write().get_mut(id) {
            card.card.input = text.to_string();
        }
    }

    fn clear_name_inputs(&mut self) {
        self.signals.names.set(Default::default());
    }

    fn alert(&mut self, message: &str) {
        self.platform.alert(message);
    }
}

// ---------------------------------------------------------------------------
// Coroutine body
// ---------------------------------------------------------------------------

/// Drive the scoreboard for the lifetime of the app.
///
/// This is the async body a Dioxus `use_coroutine` should run. Messages are
/// applied strictly in order. After each one `leave_guard` is refreshed so
/// synchronous listeners (such as `beforeunload`) can read it without
/// touching the controller.
pub async fn run_scoreboard<P: Platform>(
    mut rx: UnboundedReceiver<UiMessage>,
    signals: UiSignals,
    platform: P,
    leave_guard: Rc<Cell<bool>>,
) {
    let mut ctrl = ScoreController::new(SignalView::new(signals, platform));
    let mut confirm = platform;

    while let Some(msg) = rx.next().await {
        apply_message(&mut ctrl, &mut confirm, msg);
        leave_guard.set(ctrl.blocks_leave());
    }
}

/// Route one [`UiMessage`] to the controller.
pub fn apply_message<V: ScoreView>(
    ctrl: &mut ScoreController<V>,
    confirm: &mut impl ConfirmIntent,
    msg: UiMessage,
) {
    tracing::trace!(?msg, "ui message");
    match msg {
        UiMessage::StartGame { names } => {
            ctrl.start_game(&names);
        }
        UiMessage::PointsInput { player_id, raw } => ctrl.on_points_input(player_id, &raw),
        UiMessage::Submit { player_id, raw } => ctrl.submit(player_id, &raw),
        UiMessage::Undo { player_id } => ctrl.undo(player_id),
        UiMessage::ResetPoints => {
            ctrl.reset_points(confirm);
        }
        UiMessage::NewGame => {
            ctrl.new_game(confirm);
        }
        UiMessage::VisibilityChanged { hidden } => ctrl.on_visibility_change(hidden),
    }
}
