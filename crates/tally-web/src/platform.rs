//! Browser dialogs and timers.

use std::future::Future;

use tally_core::view::ConfirmIntent;
use tally_ui::app_logic::Platform;

/// `window.confirm` / `window.alert` plus `setTimeout`-backed sleeps.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserPlatform;

impl ConfirmIntent for BrowserPlatform {
    fn confirm(&mut self, prompt: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(prompt).ok())
            .unwrap_or(false)
    }
}

impl Platform for BrowserPlatform {
    fn alert(&self, message: &str) {
        if let Some(window) = web_sys::window()
            && let Err(e) = window.alert_with_message(message)
        {
            tracing::warn!("alert failed: {e:?}");
        }
    }

    fn sleep_ms(&self, ms: u64) -> impl Future<Output = ()> + 'static {
        gloo_timers::future::TimeoutFuture::new(u32::try_from(ms).unwrap_or(u32::MAX))
    }
}
