//! Root application component for the web frontend.
//!
//! Owns the scoreboard signals, spawns the coroutine that drives the
//! controller, and installs the document-level guard listeners once.

use std::cell::Cell;
use std::rc::Rc;

use dioxus::prelude::*;
use tally_ui::app_logic::run_scoreboard;
use tally_ui::components::{game_screen::GameScreen, setup_screen::SetupScreen};
use tally_ui::{UiMessage, use_ui_signals};

use crate::listeners;
use crate::platform::BrowserPlatform;

// ---------------------------------------------------------------------------
// Root component
// ---------------------------------------------------------------------------

const MAIN_CSS: Asset = asset!(
    "/assets/main.css",
    AssetOptions::css()
        .with_preload(true)
        .with_static_head(true)
);

#[component]
pub fn App() -> Element {
    let signals = use_ui_signals();
    let leave_guard = use_hook(|| Rc::new(Cell::new(false)));

    let coroutine = use_coroutine({
        let leave_guard = leave_guard.clone();
        move |rx: UnboundedReceiver<UiMessage>| {
            run_scoreboard(rx, signals, BrowserPlatform, leave_guard.clone())
        }
    });

    use_hook(move || listeners::install(coroutine, leave_guard.clone()));

    rsx! {
        document::Stylesheet { href: MAIN_CSS }
        document::Meta { name: "viewport", content: "width=device-width, initial-scale=1, maximum-scale=1" }
        main { class: "container",
            header { class: "app-header",
                h1 { "Tally" }
            }
            SetupScreen { section: signals.section, names: signals.names }
            GameScreen { section: signals.section, cards: signals.cards }
        }
    }
}
