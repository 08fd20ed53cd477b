//! Shared Dioxus UI components for the tally scoreboard.
//!
//! This crate is platform-agnostic: it provides the components, the
//! `UiMessage` type, the signal-backed [`ScoreView`](tally_core::view::ScoreView)
//! adapter, and the coroutine body in [`app_logic`]. Platform crates supply
//! dialogs and timers through [`app_logic::Platform`].

pub mod app_logic;
pub mod components;

use dioxus::prelude::*;
use tally_core::config::NAME_SLOTS;
use tally_core::game_state::PlayerId;
use tally_core::view::{PlayerCard, Pulse, Section};

// ---------------------------------------------------------------------------
// Shared types
// ---------------------------------------------------------------------------

/// Messages sent from UI components to the scoreboard coroutine.
#[derive(Debug, Clone, PartialEq)]
pub enum UiMessage {
    /// Start control clicked with the current name slots.
    StartGame { names: Vec<String> },
    /// A point-entry field was edited.
    PointsInput { player_id: PlayerId, raw: String },
    /// Submit control clicked; `raw` is the field's text at click time.
    Submit { player_id: PlayerId, raw: String },
    /// Undo control clicked.
    Undo { player_id: PlayerId },
    /// Reset control clicked.
    ResetPoints,
    /// New-game control clicked.
    NewGame,
    /// The document was hidden or became visible again.
    VisibilityChanged { hidden: bool },
}

/// A rendered player card plus its cosmetic state.
#[derive(Debug, Clone, PartialEq)]
pub struct CardState {
    pub card: PlayerCard,
    /// Pulse currently showing on the score, if any.
    pub pulse: Option<Pulse>,
    /// Identifies the pulse so a stale revert timer leaves a newer one alone.
    pub pulse_seq: u64,
    /// Full-render generation; part of the element key so a rebuild
    /// recreates the nodes.
    pub generation: u64,
}

impl CardState {
    pub fn new(card: PlayerCard, generation: u64) -> Self {
        Self {
            card,
            pulse: None,
            pulse_seq: 0,
            generation,
        }
    }

    pub fn key(&self) -> String {
        format!("{}-{}", self.generation, self.card.id)
    }
}

/// Every signal the scoreboard renders from.
#[derive(Clone, Copy, PartialEq)]
pub struct UiSignals {
    pub section: Signal<Section>,
    pub cards: Signal<Vec<CardState>>,
    pub names: Signal<[String; NAME_SLOTS]>,
}

/// Create the scoreboard signals in the calling component.
pub fn use_ui_signals() -> UiSignals {
    UiSignals {
        section: use_signal(Section::default),
        cards: use_signal(Vec::new),
        names: use_signal(Default::default),
    }
}

/// Class list for a section element: `base`, plus `hidden` when inactive.
pub fn section_class(base: &str, visible: bool) -> String {
    if visible {
        base.to_string()
    } else {
        format!("{base} hidden")
    }
}
