//! Framework-agnostic score controller.
//!
//! Owns the [`GameState`] and a [`ScoreView`], providing the interaction
//! handlers every frontend shares:
//!
//! - Mutating the store in response to a user action.
//! - Pushing the matching incremental update (or full rebuild) to the view.
//!
//! Frontends only need to:
//! 1. Implement [`ScoreView`] for their rendering surface.
//! 2. Forward user events to the matching controller method.
//! 3. Supply a [`ConfirmIntent`] for reset and new game.

use tracing::{debug, warn};

use crate::config::{NEW_GAME_PROMPT, NOT_ENOUGH_PLAYERS_MESSAGE, RESET_PROMPT};
use crate::error::ScoreError;
use crate::game_state::{GameState, PlayerId};
use crate::guards;
use crate::input::parse_points;
use crate::view::{ConfirmIntent, Pulse, ScoreView, Section};

/// Owns the game state and the view it keeps in sync.
pub struct ScoreController<V> {
    state: GameState,
    view: V,
}

impl<V: ScoreView> ScoreController<V> {
    pub fn new(view: V) -> Self {
        Self {
            state: GameState::new(),
            view,
        }
    }

    /// Borrow the underlying [`GameState`].
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Mutable access to the view for adapter-local state (focus, pulses).
    ///
    /// Game data must still go through the controller.
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Start control clicked with the current contents of the name slots.
    ///
    /// Returns `false` (after alerting the user) when too few names were
    /// entered.
    pub fn start_game<S: AsRef<str>>(&mut self, names: &[S]) -> bool {
        match self.state.init_session(names) {
            Ok(()) => {
                self.view.render_players(self.state.players());
                self.view.show_section(Section::Game);
                true
            }
            Err(ScoreError::NotEnoughPlayers { found }) => {
                debug!(found, "start rejected");
                self.view.alert(NOT_ENOUGH_PLAYERS_MESSAGE);
                false
            }
            Err(e) => {
                warn!("start failed: {e}");
                false
            }
        }
    }

    /// A player's point-entry field changed. Stages the value only.
    pub fn on_points_input(&mut self, id: PlayerId, raw: &str) {
        if let Err(e) = self.state.set_pending_input(id, raw) {
            warn!("ignoring input: {e}");
        }
    }

    /// Submit control clicked. `raw` is the field's current text.
    ///
    /// Zero (or unparseable) entries are ignored entirely: no history entry,
    /// no pulse, and the field keeps its text.
    pub fn submit(&mut self, id: PlayerId, raw: &str) {
        let amount = parse_points(raw);
        let score = match self.state.submit_points(id, amount) {
            Ok(Some(score)) => score,
            Ok(None) => return,
            Err(e) => {
                warn!("ignoring submission: {e}");
                return;
            }
        };

        self.view.set_undo_enabled(id, true);
        self.view.update_score(id, score, Some(Pulse::Add));
        self.view.set_points_input(id, "");
        if let Err(e) = self.state.set_pending_input(id, "") {
            warn!("could not clear pending input: {e}");
        }
    }

    /// Undo control clicked.
    pub fn undo(&mut self, id: PlayerId) {
        match self.state.undo_last(id) {
            Ok(Some(_)) => {}
            Ok(None) => return,
            Err(e) => {
                warn!("ignoring undo: {e}");
                return;
            }
        }
        let Some(player) = self.state.player(id) else {
            return;
        };
        self.view.update_score(id, player.score(), Some(Pulse::Undo));
        if !player.can_undo() {
            self.view.set_undo_enabled(id, false);
        }
    }

    /// Reset control clicked. Returns whether the reset happened.
    pub fn reset_points(&mut self, confirm: &mut impl ConfirmIntent) -> bool {
        if !confirm.confirm(RESET_PROMPT) {
            debug!("reset declined");
            return false;
        }
        self.state.reset_points();
        for player in self.state.players() {
            let id = player.id();
            self.view.update_score(id, 0, None);
            self.view.set_points_input(id, "");
            self.view.set_undo_enabled(id, false);
        }
        true
    }

    /// New-game control clicked. Returns whether the session was ended.
    pub fn new_game(&mut self, confirm: &mut impl ConfirmIntent) -> bool {
        if !confirm.confirm(NEW_GAME_PROMPT) {
            debug!("new game declined");
            return false;
        }
        self.state.end_session();
        self.view.clear_name_inputs();
        self.view.show_section(Section::Setup);
        true
    }

    /// The document (or terminal) was hidden or shown again.
    ///
    /// Coming back while a session is running rebuilds every card so any
    /// drift accumulated in the background is repaired.
    pub fn on_visibility_change(&mut self, hidden: bool) {
        if !hidden && self.state.is_active() {
            debug!("refocused, re-rendering players");
            self.view.render_players(self.state.players());
        }
    }

    /// Whether leaving now would lose scores.
    pub fn blocks_leave(&self) -> bool {
        guards::blocks_page_leave(&self.state)
    }
}
