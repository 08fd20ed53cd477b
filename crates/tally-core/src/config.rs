//! Fixed configuration for the scoreboard.

use std::time::Duration;

/// Number of name slots on the setup screen.
pub const NAME_SLOTS: usize = 4;

/// Minimum number of non-empty names required to start a game.
pub const MIN_PLAYERS: usize = 2;

/// How long a score pulse stays visible before reverting.
pub const PULSE_DURATION: Duration = Duration::from_millis(300);

/// Entrance animation offset between consecutive player cards.
pub const CARD_STAGGER: Duration = Duration::from_millis(100);

/// Alert shown when fewer than [`MIN_PLAYERS`] names were entered.
pub const NOT_ENOUGH_PLAYERS_MESSAGE: &str = "Please enter at least 2 player names!";

/// Confirmation prompt for zeroing every score.
pub const RESET_PROMPT: &str = "Are you sure you want to reset all points?";

/// Confirmation prompt for discarding the session.
pub const NEW_GAME_PROMPT: &str = "Start a new game? This will reset everything.";

/// Confirmation prompt when leaving with unsaved scores.
pub const LEAVE_PROMPT: &str = "You have unsaved changes. Leave anyway?";
