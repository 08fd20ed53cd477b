//! Scoreboard orchestrator: wires the controller to the terminal frontend.
//!
//! This module owns the event loop and drives:
//! - [`tally_core::controller::ScoreController`] over a [`TuiView`]
//! - [`crate::tui::Tui`], which also answers confirmation prompts

use tally_core::config::LEAVE_PROMPT;
use tally_core::controller::ScoreController;
use tally_core::view::ConfirmIntent;

use crate::tui::{Tui, UserIntent};
use crate::view::TuiView;

const FRAME: tokio::time::Duration = tokio::time::Duration::from_millis(16);

/// Start the scoreboard with `names` pre-filled in the setup slots.
///
/// If `start` is true the game begins immediately from those names.
pub async fn run(names: &[String], start: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut ctrl = ScoreController::new(TuiView::with_names(names));
    if start {
        let names = ctrl.view().names.clone();
        if !ctrl.start_game(&names) {
            tracing::info!("not enough names to start; staying on setup");
        }
    }

    let mut tui = Tui::setup()?;
    let result = run_event_loop(&mut tui, &mut ctrl).await;
    tui.teardown()?;
    result
}

// ---------------------------------------------------------------------------
// Event loop
// ---------------------------------------------------------------------------

async fn run_event_loop(
    tui: &mut Tui,
    ctrl: &mut ScoreController<TuiView>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut ticker = tokio::time::interval(FRAME);

    loop {
        ticker.tick().await;
        ctrl.view_mut().expire_pulses(std::time::Instant::now());
        tui.render(ctrl.view())?;

        match tui.poll_and_handle_input(ctrl.view_mut())? {
            UserIntent::Quit => {
                if !ctrl.blocks_leave() || tui.confirm(LEAVE_PROMPT) {
                    break;
                }
            }
            intent => handle_intent(tui, ctrl, intent),
        }
    }

    Ok(())
}

/// Apply one non-quit intent to the controller.
fn handle_intent(tui: &mut Tui, ctrl: &mut ScoreController<TuiView>, intent: UserIntent) {
    match intent {
        UserIntent::Start => {
            let names = ctrl.view().names.clone();
            ctrl.start_game(&names);
        }
        UserIntent::PointsEdited(id) => {
            if let Some(raw) = points_field(ctrl, id) {
                ctrl.on_points_input(id, &raw);
            }
        }
        UserIntent::Submit(id) => {
            if let Some(raw) = points_field(ctrl, id) {
                ctrl.submit(id, &raw);
            }
        }
        UserIntent::Undo(id) => ctrl.undo(id),
        UserIntent::Reset => {
            ctrl.reset_points(&mut *tui);
        }
        UserIntent::NewGame => {
            ctrl.new_game(&mut *tui);
        }
        UserIntent::Visibility { hidden } => ctrl.on_visibility_change(hidden),
        UserIntent::Quit | UserIntent::None => {}
    }
}

/// Current text of player `id`'s points field.
fn points_field(ctrl: &ScoreController<TuiView>, id: usize) -> Option<String> {
    ctrl.view().cards.get(id).map(|c| c.card.input.clone())
}
