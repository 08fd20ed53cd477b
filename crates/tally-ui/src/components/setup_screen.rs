//! Setup screen: up to four player names and the start control.

use dioxus::prelude::*;
use tally_core::config::NAME_SLOTS;
use tally_core::view::Section;

use crate::{UiMessage, section_class};

#[component]
pub fn SetupScreen(section: Signal<Section>, mut names: Signal<[String; NAME_SLOTS]>) -> Element {
    let coroutine = use_coroutine_handle::<UiMessage>();
    let visible = *section.read() == Section::Setup;

    rsx! {
        section { id: "setupSection", class: section_class("setup-section", visible),
            h2 { class: "section-title", "Players" }

            div { class: "name-inputs",
                for slot in 0..NAME_SLOTS {
                    {
                        let number = slot + 1;
                        let value = names.read()[slot].clone();

                        rsx! {
                            div { class: "name-input-group",
                                label { r#for: "player{number}Name", "Player {number}" }
                                input {
                                    id: "player{number}Name",
                                    r#type: "text",
                                    placeholder: "Name",
                                    autocomplete: "off",
                                    value: "{value}",
                                    oninput: move |e| names.write()[slot] = e.value(),
                                }
                            }
                        }
                    }
                }
            }

            button {
                id: "startGameBtn",
                class: "btn btn-primary",
                onclick: move |_| {
                    coroutine.send(UiMessage::StartGame {
                        names: names.read().to_vec(),
                    });
                },
                "Start Game"
            }
        }
    }
}
