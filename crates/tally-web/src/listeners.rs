//! Document-level listeners for the lifecycle guards.
//!
//! These events have no Dioxus element to hang off (`beforeunload`,
//! `visibilitychange`) or must be non-passive (`touchmove`), so they are
//! attached directly through `web_sys`. Every closure lives for the whole
//! page and is leaked with `forget`.

use std::cell::Cell;
use std::rc::Rc;

use dioxus::prelude::*;
use tally_core::guards::{PullToRefreshGuard, suppresses_confirm_key};
use tally_ui::UiMessage;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::{Closure, WasmClosure};
use web_sys::{
    AddEventListenerOptions, BeforeUnloadEvent, Element, Event, EventTarget, KeyboardEvent,
    TouchEvent,
};

/// Attach every guard listener. `leave_guard` mirrors whether leaving would
/// lose scores.
pub fn install(coroutine: Coroutine<UiMessage>, leave_guard: Rc<Cell<bool>>) {
    let Some(window) = web_sys::window() else {
        tracing::warn!("no window; guards not installed");
        return;
    };
    let Some(document) = window.document() else {
        tracing::warn!("no document; guards not installed");
        return;
    };

    // Enter inside an input would otherwise submit the surrounding form.
    let on_keydown = Closure::<dyn FnMut(KeyboardEvent)>::new(|e: KeyboardEvent| {
        let in_input = e
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .is_some_and(|el| el.tag_name().eq_ignore_ascii_case("input"));
        if suppresses_confirm_key(&e.key(), in_input) {
            e.prevent_default();
        }
    });
    listen(&document, "keydown", on_keydown, None);

    // Page leave while scores are on the board.
    let on_unload = Closure::<dyn FnMut(BeforeUnloadEvent)>::new(move |e: BeforeUnloadEvent| {
        if leave_guard.get() {
            e.prevent_default();
            e.set_return_value("");
        }
    });
    listen(&window, "beforeunload", on_unload, None);

    // Refocus repairs any drift accumulated while the tab was hidden.
    let tx = coroutine.tx();
    let doc = document.clone();
    let on_visibility = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
        let hidden = doc.hidden();
        if tx
            .unbounded_send(UiMessage::VisibilityChanged { hidden })
            .is_err()
        {
            tracing::debug!("scoreboard coroutine gone; dropping visibility change");
        }
    });
    listen(&document, "visibilitychange", on_visibility, None);

    let Some(body) = document.body() else {
        return;
    };
    install_pull_to_refresh_guard(&body, window);
}

/// Cancel downward drags that start with the page at its very top.
fn install_pull_to_refresh_guard(body: &EventTarget, window: web_sys::Window) {
    let guard = Rc::new(Cell::new(PullToRefreshGuard::new()));

    let start_guard = guard.clone();
    let on_touchstart = Closure::<dyn FnMut(TouchEvent)>::new(move |e: TouchEvent| {
        if let Some(touch) = e.touches().get(0) {
            let mut g = start_guard.get();
            g.touch_start(f64::from(touch.client_y()));
            start_guard.set(g);
        }
    });
    let passive = AddEventListenerOptions::new();
    passive.set_passive(true);
    listen(body, "touchstart", on_touchstart, Some(&passive));

    let on_touchmove = Closure::<dyn FnMut(TouchEvent)>::new(move |e: TouchEvent| {
        let Some(touch) = e.touches().get(0) else {
            return;
        };
        let touch_y = f64::from(touch.client_y());
        let scroll_y = window.scroll_y().unwrap_or(0.0);
        if guard.get().should_block(touch_y, scroll_y) {
            e.prevent_default();
        }
    });
    let active = AddEventListenerOptions::new();
    active.set_passive(false);
    listen(body, "touchmove", on_touchmove, Some(&active));
}

fn listen<E: ?Sized + WasmClosure>(
    target: &EventTarget,
    event: &str,
    closure: Closure<E>,
    options: Option<&AddEventListenerOptions>,
) {
    let callback = closure.as_ref().unchecked_ref();
    let result = match options {
        Some(opts) => target
            .add_event_listener_with_callback_and_add_event_listener_options(event, callback, opts),
        None => target.add_event_listener_with_callback(event, callback),
    };
    if let Err(e) = result {
        tracing::warn!("could not listen for {event}: {e:?}");
    }
    closure.forget();
}
