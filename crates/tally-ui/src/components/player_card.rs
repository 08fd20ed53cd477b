//! One player's card: name, score, undo, point entry, submit.

use dioxus::prelude::*;

use crate::{CardState, UiMessage};

/// Inline style for the score element, reflecting any active pulse.
fn score_style(card: &CardState) -> String {
    let (scale, color) = match card.pulse {
        Some(pulse) => (pulse.scale(), pulse.color_var()),
        None => (1.0, "var(--text-primary)"),
    };
    format!("transform: scale({scale}); color: {color};")
}

#[component]
pub fn PlayerCardView(card: CardState, mut cards: Signal<Vec<CardState>>) -> Element {
    let coroutine = use_coroutine_handle::<UiMessage>();
    let id = card.card.id;
    let delay = card.card.entrance_delay().as_secs_f32();
    let style = score_style(&card);
    let input = card.card.input.clone();
    let undo_disabled = !card.card.undo_enabled;

    rsx! {
        div { class: "player-card", style: "animation-delay: {delay}s",
            div { class: "player-name",
                span { "{card.card.name}" }
            }
            div { class: "player-score", id: "score-{id}", style: "{style}",
                "{card.card.score}"
            }
            div { class: "player-input-group",
                label { r#for: "input-{id}", "Add Points" }
                div { class: "input-with-button",
                    button {
                        class: "btn-undo-player",
                        "data-player-id": "{id}",
                        title: "Undo last entry",
                        disabled: undo_disabled,
                        onclick: move |_| coroutine.send(UiMessage::Undo { player_id: id }),
                        "⎌"
                    }
                    input {
                        id: "input-{id}",
                        r#type: "number",
                        placeholder: "0",
                        inputmode: "numeric",
                        pattern: "[0-9]*",
                        value: "{input}",
                        oninput: move |e| {
                            let raw = e.value();
                            if let Some(c) = cards.write().get_mut(id) {
                                c.card.input = raw.clone();
                            }
                            coroutine.send(UiMessage::PointsInput { player_id: id, raw });
                        },
                    }
                    button {
                        class: "btn-submit-player",
                        "data-player-id": "{id}",
                        onclick: move |_| {
                            let raw = cards
                                .read()
                                .get(id)
                                .map(|c| c.card.input.clone())
                                .unwrap_or_default();
                            coroutine.send(UiMessage::Submit { player_id: id, raw });
                        },
                        "+"
                    }
                }
            }
        }
    }
}
