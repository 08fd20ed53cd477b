//! Errors produced by the game state store.

use thiserror::Error;

use crate::game_state::PlayerId;

/// Errors that can occur while mutating the scoreboard.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    /// Fewer than two usable names were supplied at game start.
    #[error("need at least {min} player names, got {found}", min = crate::config::MIN_PLAYERS)]
    NotEnoughPlayers { found: usize },

    /// No player with this id exists in the current session.
    #[error("unknown player #{0}")]
    UnknownPlayer(PlayerId),

    /// Applying the change would overflow the player's score.
    #[error("score overflow")]
    ScoreOverflow,
}
