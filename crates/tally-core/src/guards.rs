//! Lifecycle guards: leaving the page, implicit submission, pull-to-refresh.
//!
//! These are pure decisions. Each frontend wires them to whatever events
//! its platform offers (document listeners on the web, key handling in the
//! terminal).

use crate::game_state::GameState;

/// Key name of the "confirm" key as reported by `KeyboardEvent.key`.
pub const CONFIRM_KEY: &str = "Enter";

/// Whether pressing `key` should be swallowed to prevent implicit submission.
///
/// Only the confirm key is suppressed, and only while a text field has focus.
pub fn suppresses_confirm_key(key: &str, in_text_field: bool) -> bool {
    in_text_field && key == CONFIRM_KEY
}

/// Whether an attempt to leave should be intercepted.
pub fn blocks_page_leave(state: &GameState) -> bool {
    state.has_unsaved_changes()
}

/// Tracks a touch gesture to decide whether it would pull-to-refresh.
#[derive(Debug, Clone, Copy, Default)]
pub struct PullToRefreshGuard {
    start_y: f64,
}

impl PullToRefreshGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record where the current touch began.
    pub fn touch_start(&mut self, client_y: f64) {
        self.start_y = client_y;
    }

    /// Returns `true` if this move must be cancelled: the page is scrolled
    /// to the very top and the finger is travelling downward.
    pub fn should_block(&self, client_y: f64, scroll_y: f64) -> bool {
        scroll_y <= 0.0 && client_y - self.start_y > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_in_text_field_is_suppressed() {
        assert!(suppresses_confirm_key("Enter", true));
        assert!(!suppresses_confirm_key("Enter", false));
        assert!(!suppresses_confirm_key("a", true));
        assert!(!suppresses_confirm_key("Tab", true));
    }

    #[test]
    fn leave_guard_follows_scores() {
        let mut gs = GameState::new();
        assert!(!blocks_page_leave(&gs));
        gs.init_session(&["A", "B"]).unwrap();
        assert!(!blocks_page_leave(&gs));
        gs.submit_points(0, -1).unwrap();
        assert!(blocks_page_leave(&gs));
        gs.end_session();
        assert!(!blocks_page_leave(&gs));
    }

    #[test]
    fn pull_down_at_top_is_blocked() {
        let mut guard = PullToRefreshGuard::new();
        guard.touch_start(100.0);
        assert!(guard.should_block(140.0, 0.0));
    }

    #[test]
    fn other_gestures_pass_through() {
        let mut guard = PullToRefreshGuard::new();
        guard.touch_start(100.0);
        // Scrolled down the page.
        assert!(!guard.should_block(140.0, 12.0));
        // Dragging upward at the top.
        assert!(!guard.should_block(60.0, 0.0));
        // No movement.
        assert!(!guard.should_block(100.0, 0.0));
    }
}
