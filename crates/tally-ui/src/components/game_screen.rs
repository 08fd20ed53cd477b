//! Game screen: the player grid plus reset and new-game controls.

use dioxus::prelude::*;
use tally_core::view::Section;

use super::player_card::PlayerCardView;
use crate::{CardState, UiMessage, section_class};

#[component]
pub fn GameScreen(section: Signal<Section>, cards: Signal<Vec<CardState>>) -> Element {
    let coroutine = use_coroutine_handle::<UiMessage>();
    let visible = *section.read() == Section::Game;

    rsx! {
        section { id: "gameSection", class: section_class("game-section", visible),
            div { id: "playersGrid", class: "players-grid",
                for card in cards.read().iter() {
                    PlayerCardView { key: "{card.key()}", card: card.clone(), cards }
                }
            }

            div { class: "game-controls",
                button {
                    id: "resetPointsBtn",
                    class: "btn btn-secondary",
                    onclick: move |_| coroutine.send(UiMessage::ResetPoints),
                    "Reset Points"
                }
                button {
                    id: "newGameBtn",
                    class: "btn btn-danger",
                    onclick: move |_| coroutine.send(UiMessage::NewGame),
                    "New Game"
                }
            }
        }
    }
}
