//! The game state store: the player list and the session flag.
//!
//! [`GameState`] is the single source of truth. Frontends never hold their
//! own copy of a player's score; they render [`Player`] snapshots and route
//! every change back through the store (usually via
//! [`ScoreController`](crate::controller::ScoreController)).

use tracing::debug;

use crate::config::{MIN_PLAYERS, NAME_SLOTS};
use crate::error::ScoreError;
use crate::input::parse_points;

/// Stable 0-based index of a player within one session.
pub type PlayerId = usize;

/// One player's running tally.
///
/// Fields are private so that `score` can only change together with
/// `history`: the score always equals the sum of the history entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    id: PlayerId,
    name: String,
    score: i64,
    pending_input: i64,
    history: Vec<i64>,
}

impl Player {
    fn new(id: PlayerId, name: String) -> Self {
        Self {
            id,
            name,
            score: 0,
            pending_input: 0,
            history: Vec::new(),
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    /// Value staged in the point-entry field but not yet submitted.
    pub fn pending_input(&self) -> i64 {
        self.pending_input
    }

    /// Amounts added by each submission, oldest first.
    pub fn history(&self) -> &[i64] {
        &self.history
    }

    /// Whether there is a submission left to undo.
    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }
}

/// Players plus the "game active" flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameState {
    players: Vec<Player>,
    game_active: bool,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    pub fn is_active(&self) -> bool {
        self.game_active
    }

    /// True while a session is running and somebody has a nonzero score.
    pub fn has_unsaved_changes(&self) -> bool {
        self.game_active && self.players.iter().any(|p| p.score != 0)
    }

    /// Start a session from the setup screen's name slots.
    ///
    /// Only the first [`NAME_SLOTS`] entries are considered. Names are trimmed
    /// and empty slots skipped; ids are assigned in slot order from 0. On
    /// failure the state is left untouched.
    pub fn init_session<S: AsRef<str>>(&mut self, names: &[S]) -> Result<(), ScoreError> {
        let names: Vec<String> = names
            .iter()
            .take(NAME_SLOTS)
            .map(|n| n.as_ref().trim())
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .collect();

        if names.len() < MIN_PLAYERS {
            return Err(ScoreError::NotEnoughPlayers { found: names.len() });
        }

        self.players = names
            .into_iter()
            .enumerate()
            .map(|(id, name)| Player::new(id, name))
            .collect();
        self.game_active = true;
        debug!(players = self.players.len(), "session started");
        Ok(())
    }

    /// Add `amount` to a player's score.
    ///
    /// Returns `Ok(None)` without touching anything when `amount` is zero,
    /// otherwise the player's new score.
    pub fn submit_points(&mut self, id: PlayerId, amount: i64) -> Result<Option<i64>, ScoreError> {
        let player = self.player_mut(id)?;
        if amount == 0 {
            return Ok(None);
        }
        let score = player
            .score
            .checked_add(amount)
            .ok_or(ScoreError::ScoreOverflow)?;
        player.history.push(amount);
        player.score = score;
        debug!(player = id, amount, score, "points submitted");
        Ok(Some(score))
    }

    /// Revert a player's most recent submission.
    ///
    /// Returns the amount that was taken back, or `Ok(None)` when the history
    /// is empty.
    pub fn undo_last(&mut self, id: PlayerId) -> Result<Option<i64>, ScoreError> {
        let player = self.player_mut(id)?;
        let Some(last) = player.history.pop() else {
            return Ok(None);
        };
        // Subtracting an entry that was previously added cannot overflow.
        player.score -= last;
        debug!(
            player = id,
            amount = last,
            score = player.score,
            "submission undone"
        );
        Ok(Some(last))
    }

    /// Stage the raw contents of a player's point-entry field.
    pub fn set_pending_input(&mut self, id: PlayerId, raw: &str) -> Result<i64, ScoreError> {
        let player = self.player_mut(id)?;
        player.pending_input = parse_points(raw);
        Ok(player.pending_input)
    }

    /// Zero every score and pending value, and forget all history.
    pub fn reset_points(&mut self) {
        for player in &mut self.players {
            player.score = 0;
            player.pending_input = 0;
            player.history.clear();
        }
        debug!("points reset");
    }

    /// Drop all players and leave the session.
    pub fn end_session(&mut self) {
        self.players.clear();
        self.game_active = false;
        debug!("session ended");
    }

    fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player, ScoreError> {
        self.players
            .get_mut(id)
            .ok_or(ScoreError::UnknownPlayer(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(names: &[&str]) -> GameState {
        let mut gs = GameState::new();
        gs.init_session(names).unwrap();
        gs
    }

    fn assert_consistent(gs: &GameState) {
        for p in gs.players() {
            assert_eq!(p.score(), p.history().iter().sum::<i64>(), "{}", p.name());
        }
    }

    #[test]
    fn init_with_two_names() {
        let gs = started(&["A", "B", "", ""]);
        assert!(gs.is_active());
        let names: Vec<_> = gs.players().iter().map(|p| (p.id(), p.name())).collect();
        assert_eq!(names, vec![(0, "A"), (1, "B")]);
    }

    #[test]
    fn init_trims_and_skips_gaps() {
        let gs = started(&["  Ann ", "", "Bob", "  "]);
        let names: Vec<_> = gs.players().iter().map(|p| (p.id(), p.name())).collect();
        assert_eq!(names, vec![(0, "Ann"), (1, "Bob")]);
    }

    #[test]
    fn init_ignores_slots_past_four() {
        let gs = started(&["A", "B", "C", "D", "E"]);
        assert_eq!(gs.players().len(), 4);
    }

    #[test]
    fn init_with_one_name_fails() {
        let mut gs = GameState::new();
        let err = gs.init_session(&["OnlyOne", "", "", ""]).unwrap_err();
        assert_eq!(err, ScoreError::NotEnoughPlayers { found: 1 });
        assert!(!gs.is_active());
        assert!(gs.players().is_empty());
    }

    #[test]
    fn failed_init_keeps_running_session() {
        let mut gs = started(&["A", "B"]);
        gs.submit_points(0, 4).unwrap();
        let before = gs.clone();
        assert!(gs.init_session(&["   ", "X"]).is_err());
        assert_eq!(gs, before);
    }

    #[test]
    fn zero_submission_is_ignored() {
        let mut gs = started(&["A", "B"]);
        assert_eq!(gs.submit_points(0, 0), Ok(None));
        assert_eq!(gs.player(0).unwrap().score(), 0);
        assert!(gs.player(0).unwrap().history().is_empty());
    }

    #[test]
    fn submit_then_undo_round_trips() {
        let mut gs = started(&["A", "B"]);
        gs.submit_points(1, 3).unwrap();
        let before = gs.player(1).unwrap().clone();

        assert_eq!(gs.submit_points(1, 5), Ok(Some(8)));
        assert_eq!(gs.undo_last(1), Ok(Some(5)));
        assert_eq!(gs.player(1).unwrap(), &before);
    }

    #[test]
    fn undo_on_empty_history_is_noop() {
        let mut gs = started(&["A", "B"]);
        assert_eq!(gs.undo_last(0), Ok(None));
        assert_eq!(gs.player(0).unwrap().score(), 0);
        assert!(!gs.player(0).unwrap().can_undo());
    }

    #[test]
    fn score_tracks_history_through_mixed_sequence() {
        let mut gs = started(&["A", "B", "C"]);
        let ops: &[(PlayerId, Option<i64>)] = &[
            (0, Some(10)),
            (0, Some(-3)),
            (1, Some(7)),
            (0, None),
            (2, None),
            (2, Some(1)),
            (1, Some(0)),
            (1, None),
            (1, None),
            (0, Some(25)),
        ];
        for &(id, op) in ops {
            match op {
                Some(amount) => {
                    gs.submit_points(id, amount).unwrap();
                }
                None => {
                    gs.undo_last(id).unwrap();
                }
            }
            assert_consistent(&gs);
        }
        assert_eq!(gs.player(0).unwrap().history(), &[10, 25]);
        assert_eq!(gs.player(1).unwrap().score(), 0);
        assert_eq!(gs.player(2).unwrap().score(), 1);
    }

    #[test]
    fn overflow_is_rejected_without_mutation() {
        let mut gs = started(&["A", "B"]);
        gs.submit_points(0, i64::MAX).unwrap();
        assert_eq!(gs.submit_points(0, 1), Err(ScoreError::ScoreOverflow));
        assert_eq!(gs.player(0).unwrap().history(), &[i64::MAX]);
        assert_consistent(&gs);
    }

    #[test]
    fn unknown_player() {
        let mut gs = started(&["A", "B"]);
        assert_eq!(gs.submit_points(7, 1), Err(ScoreError::UnknownPlayer(7)));
        assert_eq!(gs.undo_last(2), Err(ScoreError::UnknownPlayer(2)));
    }

    #[test]
    fn pending_input_is_parsed() {
        let mut gs = started(&["A", "B"]);
        assert_eq!(gs.set_pending_input(0, "12x"), Ok(12));
        assert_eq!(gs.set_pending_input(1, "nope"), Ok(0));
        assert_eq!(gs.player(0).unwrap().pending_input(), 12);
        // Staging never touches the score.
        assert_eq!(gs.player(0).unwrap().score(), 0);
    }

    #[test]
    fn reset_clears_scores_and_history() {
        let mut gs = started(&["A", "B"]);
        gs.submit_points(0, 5).unwrap();
        gs.submit_points(1, -2).unwrap();
        gs.set_pending_input(1, "9").unwrap();

        gs.reset_points();

        assert!(gs.is_active());
        for p in gs.players() {
            assert_eq!(p.score(), 0);
            assert_eq!(p.pending_input(), 0);
            assert!(!p.can_undo());
        }
    }

    #[test]
    fn end_session_then_restart_from_zero() {
        let mut gs = started(&["A", "B", "C"]);
        gs.end_session();
        assert!(!gs.is_active());
        assert!(gs.players().is_empty());

        gs.init_session(&["X", "Y"]).unwrap();
        let ids: Vec<_> = gs.players().iter().map(Player::id).collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn unsaved_changes_needs_nonzero_score() {
        let mut gs = GameState::new();
        assert!(!gs.has_unsaved_changes());

        gs.init_session(&["A", "B"]).unwrap();
        assert!(!gs.has_unsaved_changes());

        gs.submit_points(1, 2).unwrap();
        assert!(gs.has_unsaved_changes());

        gs.undo_last(1).unwrap();
        assert!(!gs.has_unsaved_changes());
    }
}
