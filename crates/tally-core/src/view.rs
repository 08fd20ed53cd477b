//! Rendering and confirmation seams.
//!
//! The controller never touches a document or a terminal directly. It talks
//! to a [`ScoreView`] for everything visible and asks a [`ConfirmIntent`]
//! before destructive transitions, so both can be swapped for recording
//! fakes in tests.

use std::time::Duration;

use crate::config::CARD_STAGGER;
use crate::game_state::{Player, PlayerId};
use crate::input::display_pending;

/// The two mutually exclusive sections of the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    /// Name entry and the start control.
    #[default]
    Setup,
    /// Player grid plus reset / new-game controls.
    Game,
}

/// Transient cosmetic cue played on a score after it changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pulse {
    /// Points were added: grow and flash the primary colour.
    Add,
    /// A submission was undone: shrink and flash the danger colour.
    Undo,
}

impl Pulse {
    /// Scale factor applied to the score while the pulse is showing.
    pub fn scale(self) -> f32 {
        match self {
            Pulse::Add => 1.2,
            Pulse::Undo => 0.9,
        }
    }

    /// CSS custom property used for the score colour while pulsing.
    pub fn color_var(self) -> &'static str {
        match self {
            Pulse::Add => "var(--color-primary)",
            Pulse::Undo => "var(--color-danger)",
        }
    }
}

/// Render projection of one player, rebuilt from the store on every full
/// render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerCard {
    pub id: PlayerId,
    pub name: String,
    pub score: i64,
    pub undo_enabled: bool,
    /// Text of the point-entry field.
    pub input: String,
}

impl PlayerCard {
    pub fn from_player(player: &Player) -> Self {
        Self {
            id: player.id(),
            name: player.name().to_string(),
            score: player.score(),
            undo_enabled: player.can_undo(),
            input: display_pending(player.pending_input()),
        }
    }

    /// Entrance animation delay for the card at this grid position.
    pub fn entrance_delay(&self) -> Duration {
        CARD_STAGGER * self.id as u32
    }
}

/// Everything the controller needs to show.
///
/// `render_players` is the full rebuild; the remaining per-player methods are
/// incremental updates applied after a single mutation.
pub trait ScoreView {
    /// Show `section` and hide the other one.
    fn show_section(&mut self, section: Section);

    /// Throw away every player card and build new ones from `players`.
    fn render_players(&mut self, players: &[Player]);

    /// Replace the displayed score, optionally playing a pulse.
    fn update_score(&mut self, id: PlayerId, score: i64, pulse: Option<Pulse>);

    /// Enable or disable a player's undo control.
    fn set_undo_enabled(&mut self, id: PlayerId, enabled: bool);

    /// Replace the text in a player's point-entry field.
    fn set_points_input(&mut self, id: PlayerId, text: &str);

    /// Empty all name slots on the setup screen.
    fn clear_name_inputs(&mut self);

    /// Show a blocking message to the user.
    fn alert(&mut self, message: &str);
}

/// Asks the user a yes/no question before a destructive transition.
pub trait ConfirmIntent {
    /// Returns `true` if the user accepted `prompt`.
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Closures work as confirmers, which keeps scripted tests short.
impl<F: FnMut(&str) -> bool> ConfirmIntent for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}
