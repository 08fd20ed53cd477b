//! Terminal-side projection of the scoreboard.
//!
//! [`TuiView`] plays the role the document plays on the web: it holds the
//! text of every input field, the rendered cards, and any open alert. The
//! controller writes into it through [`ScoreView`]; the renderer in
//! [`crate::tui`] only reads it.

use std::time::Instant;

use tally_core::config::{NAME_SLOTS, PULSE_DURATION};
use tally_core::game_state::{Player, PlayerId};
use tally_core::view::{PlayerCard, Pulse, ScoreView, Section};

/// A rendered player card plus its running pulse.
#[derive(Debug, Clone, PartialEq)]
pub struct TuiCard {
    pub card: PlayerCard,
    pulse: Option<(Pulse, Instant)>,
}

impl TuiCard {
    /// The pulse to draw right now, if it has not expired.
    pub fn pulse_at(&self, now: Instant) -> Option<Pulse> {
        self.pulse
            .filter(|(_, started)| now.duration_since(*started) < PULSE_DURATION)
            .map(|(pulse, _)| pulse)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TuiView {
    pub section: Section,
    pub names: [String; NAME_SLOTS],
    pub cards: Vec<TuiCard>,
    /// Message waiting to be acknowledged.
    pub alert: Option<String>,
}

impl TuiView {
    /// A view whose name slots are pre-filled, in order, from `names`.
    pub fn with_names(names: &[String]) -> Self {
        let mut view = Self::default();
        for (slot, name) in view.names.iter_mut().zip(names) {
            slot.clone_from(name);
        }
        view
    }

    /// Drop pulses whose display time is over.
    pub fn expire_pulses(&mut self, now: Instant) {
        for card in &mut self.cards {
            if card.pulse_at(now).is_none() {
                card.pulse = None;
            }
        }
    }

    fn card_mut(&mut self, id: PlayerId) -> Option<&mut PlayerCard> {
        self.cards.get_mut(id).map(|c| &mut c.card)
    }
}

impl ScoreView for TuiView {
    fn show_section(&mut self, section: Section) {
        self.section = section;
    }

    fn render_players(&mut self, players: &[Player]) {
        self.cards = players
            .iter()
            .map(|p| TuiCard {
                card: PlayerCard::from_player(p),
                pulse: None,
            })
            .collect();
    }

    fn update_score(&mut self, id: PlayerId, score: i64, pulse: Option<Pulse>) {
        if let Some(card) = self.cards.get_mut(id) {
            card.card.score = score;
            if let Some(pulse) = pulse {
                card.pulse = Some((pulse, Instant::now()));
            }
        }
    }

    fn set_undo_enabled(&mut self, id: PlayerId, enabled: bool) {
        if let Some(card) = self.card_mut(id) {
            card.undo_enabled = enabled;
        }
    }

    fn set_points_input(&mut self, id: PlayerId, text: &str) {
        if let Some(card) = self.card_mut(id) {
            card.input = text.to_string();
        }
    }

    fn clear_name_inputs(&mut self) {
        self.names = Default::default();
    }

    fn alert(&mut self, message: &str) {
        self.alert = Some(message.to_string());
    }
}
