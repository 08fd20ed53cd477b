//! End-to-end controller flows against a recording view.

use std::collections::VecDeque;

use tally_core::config::{NEW_GAME_PROMPT, NOT_ENOUGH_PLAYERS_MESSAGE, RESET_PROMPT};
use tally_core::controller::ScoreController;
use tally_core::game_state::{Player, PlayerId};
use tally_core::view::{ConfirmIntent, PlayerCard, Pulse, ScoreView, Section};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Section(Section),
    Render(usize),
    Score(PlayerId, i64, Option<Pulse>),
    Undo(PlayerId, bool),
    Input(PlayerId, String),
    ClearNames,
    Alert(String),
}

/// Keeps a projection of what a real document would show, plus a log of
/// every call.
#[derive(Default)]
struct RecordingView {
    section: Section,
    cards: Vec<PlayerCard>,
    names_cleared: bool,
    calls: Vec<Call>,
}

impl RecordingView {
    fn card(&self, id: PlayerId) -> &PlayerCard {
        &self.cards[id]
    }

    fn take_calls(&mut self) -> Vec<Call> {
        std::mem::take(&mut self.calls)
    }
}

impl ScoreView for RecordingView {
    fn show_section(&mut self, section: Section) {
        self.section = section;
        self.calls.push(Call::Section(section));
    }

    fn render_players(&mut self, players: &[Player]) {
        self.cards = players.iter().map(PlayerCard::from_player).collect();
        self.calls.push(Call::Render(players.len()));
    }

    fn update_score(&mut self, id: PlayerId, score: i64, pulse: Option<Pulse>) {
        self.cards[id].score = score;
        self.calls.push(Call::Score(id, score, pulse));
    }

    fn set_undo_enabled(&mut self, id: PlayerId, enabled: bool) {
        self.cards[id].undo_enabled = enabled;
        self.calls.push(Call::Undo(id, enabled));
    }

    fn set_points_input(&mut self, id: PlayerId, text: &str) {
        self.cards[id].input = text.to_string();
        self.calls.push(Call::Input(id, text.to_string()));
    }

    fn clear_name_inputs(&mut self) {
        self.names_cleared = true;
        self.calls.push(Call::ClearNames);
    }

    fn alert(&mut self, message: &str) {
        self.calls.push(Call::Alert(message.to_string()));
    }
}

/// Answers prompts from a script and remembers what was asked.
struct Scripted {
    answers: VecDeque<bool>,
    asked: Vec<String>,
}

impl Scripted {
    fn new(answers: &[bool]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            asked: Vec::new(),
        }
    }
}

impl ConfirmIntent for Scripted {
    fn confirm(&mut self, prompt: &str) -> bool {
        self.asked.push(prompt.to_string());
        self.answers.pop_front().unwrap_or(false)
    }
}

fn started(names: &[&str]) -> ScoreController<RecordingView> {
    let mut ctrl = ScoreController::new(RecordingView::default());
    assert!(ctrl.start_game(names));
    ctrl.view_mut().take_calls();
    ctrl
}

fn assert_view_matches_store(ctrl: &ScoreController<RecordingView>) {
    for p in ctrl.state().players() {
        let card = ctrl.view().card(p.id());
        assert_eq!(card.score, p.score(), "score of {}", p.name());
        assert_eq!(card.undo_enabled, p.can_undo(), "undo of {}", p.name());
        assert_eq!(p.score(), p.history().iter().sum::<i64>());
    }
}

#[test]
fn start_renders_then_switches_section() {
    let mut ctrl = ScoreController::new(RecordingView::default());
    assert!(ctrl.start_game(&["A", "B", "", ""]));

    assert_eq!(
        ctrl.view_mut().take_calls(),
        vec![Call::Render(2), Call::Section(Section::Game)]
    );
    let names: Vec<_> = ctrl.view().cards.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B"]);
    assert!(ctrl.view().cards.iter().all(|c| !c.undo_enabled));
}

#[test]
fn rejected_start_only_alerts() {
    let mut ctrl = ScoreController::new(RecordingView::default());
    assert!(!ctrl.start_game(&["OnlyOne", "", "", ""]));

    assert_eq!(
        ctrl.view_mut().take_calls(),
        vec![Call::Alert(NOT_ENOUGH_PLAYERS_MESSAGE.to_string())]
    );
    assert!(!ctrl.state().is_active());
    assert_eq!(ctrl.view().section, Section::Setup);
}

#[test]
fn submit_updates_score_pulses_and_clears_field() {
    let mut ctrl = started(&["A", "B"]);
    ctrl.on_points_input(1, "7");
    assert_eq!(ctrl.state().player(1).unwrap().pending_input(), 7);

    ctrl.submit(1, "7");

    assert_eq!(
        ctrl.view_mut().take_calls(),
        vec![
            Call::Undo(1, true),
            Call::Score(1, 7, Some(Pulse::Add)),
            Call::Input(1, String::new()),
        ]
    );
    assert_eq!(ctrl.state().player(1).unwrap().pending_input(), 0);
    assert_view_matches_store(&ctrl);
}

#[test]
fn submit_reads_field_not_pending_value() {
    let mut ctrl = started(&["A", "B"]);
    ctrl.on_points_input(0, "3");
    ctrl.submit(0, "10");
    assert_eq!(ctrl.state().player(0).unwrap().history(), &[10]);
}

#[test]
fn zero_or_garbage_submission_does_nothing() {
    let mut ctrl = started(&["A", "B"]);
    for raw in ["0", "", "abc", "  ", "-0"] {
        ctrl.submit(0, raw);
    }
    assert!(ctrl.view_mut().take_calls().is_empty());
    let p = ctrl.state().player(0).unwrap();
    assert_eq!(p.score(), 0);
    assert!(p.history().is_empty());
}

#[test]
fn undo_round_trip_and_disable() {
    let mut ctrl = started(&["A", "B"]);
    ctrl.submit(0, "2");
    let before = ctrl.state().player(0).unwrap().clone();

    ctrl.submit(0, "5");
    ctrl.undo(0);
    assert_eq!(ctrl.state().player(0).unwrap(), &before);
    assert!(ctrl.view().card(0).undo_enabled);

    ctrl.view_mut().take_calls();
    ctrl.undo(0);
    assert_eq!(
        ctrl.view_mut().take_calls(),
        vec![Call::Score(0, 0, Some(Pulse::Undo)), Call::Undo(0, false)]
    );
    assert_view_matches_store(&ctrl);
}

#[test]
fn undo_with_empty_history_is_silent() {
    let mut ctrl = started(&["A", "B"]);
    ctrl.undo(1);
    assert!(ctrl.view_mut().take_calls().is_empty());
    assert!(!ctrl.view().card(1).undo_enabled);
}

#[test]
fn long_sequence_keeps_view_in_sync() {
    let mut ctrl = started(&["A", "B", "C", "D"]);
    let script: &[(PlayerId, &str)] = &[
        (0, "4"),
        (1, "12"),
        (0, "u"),
        (2, "-6"),
        (3, "0"),
        (3, "u"),
        (1, "3x"),
        (1, "u"),
        (1, "u"),
        (1, "u"),
        (2, "9"),
    ];
    for &(id, action) in script {
        if action == "u" {
            ctrl.undo(id);
        } else {
            ctrl.submit(id, action);
        }
        assert_view_matches_store(&ctrl);
    }
    let scores: Vec<_> = ctrl.state().players().iter().map(Player::score).collect();
    assert_eq!(scores, vec![0, 0, 3, 0]);
}

#[test]
fn confirmed_reset_zeroes_and_disables_undo() {
    let mut ctrl = started(&["A", "B", "C"]);
    ctrl.submit(0, "5");
    ctrl.submit(2, "8");
    ctrl.on_points_input(1, "4");
    ctrl.view_mut().cards[1].input = "4".to_string();

    let mut confirm = Scripted::new(&[true]);
    assert!(ctrl.reset_points(&mut confirm));

    assert_eq!(confirm.asked, vec![RESET_PROMPT.to_string()]);
    assert!(ctrl.state().is_active());
    for p in ctrl.state().players() {
        assert_eq!(p.score(), 0);
        assert!(p.history().is_empty());
        assert_eq!(p.pending_input(), 0);
        let card = ctrl.view().card(p.id());
        assert!(!card.undo_enabled);
        assert!(card.input.is_empty());
    }

    // Nothing left to undo.
    ctrl.view_mut().take_calls();
    ctrl.undo(0);
    assert!(ctrl.view_mut().take_calls().is_empty());
}

#[test]
fn declined_confirmations_are_noops() {
    let mut ctrl = started(&["A", "B"]);
    ctrl.submit(0, "5");
    ctrl.view_mut().take_calls();
    let before = ctrl.state().clone();

    let mut confirm = Scripted::new(&[false, false]);
    assert!(!ctrl.reset_points(&mut confirm));
    assert!(!ctrl.new_game(&mut confirm));

    assert_eq!(
        confirm.asked,
        vec![RESET_PROMPT.to_string(), NEW_GAME_PROMPT.to_string()]
    );
    assert_eq!(ctrl.state(), &before);
    assert!(ctrl.view_mut().take_calls().is_empty());
}

#[test]
fn new_game_returns_to_setup_and_restarts_ids() {
    let mut ctrl = started(&["A", "B", "C"]);
    ctrl.submit(2, "1");
    ctrl.view_mut().take_calls();

    let mut confirm = Scripted::new(&[true]);
    assert!(ctrl.new_game(&mut confirm));

    assert_eq!(
        ctrl.view_mut().take_calls(),
        vec![Call::ClearNames, Call::Section(Section::Setup)]
    );
    assert!(ctrl.view().names_cleared);
    assert!(!ctrl.state().is_active());
    assert!(ctrl.state().players().is_empty());
    assert!(!ctrl.blocks_leave());

    assert!(ctrl.start_game(&["X", "", "Y", ""]));
    let ids: Vec<_> = ctrl.state().players().iter().map(Player::id).collect();
    assert_eq!(ids, vec![0, 1]);
}

#[test]
fn refocus_rebuilds_from_store() {
    let mut ctrl = started(&["A", "B"]);
    ctrl.submit(0, "6");
    ctrl.on_points_input(1, "9");

    // Simulate drift in the rendered projection.
    ctrl.view_mut().cards[0].score = 999;
    ctrl.view_mut().take_calls();

    ctrl.on_visibility_change(false);

    assert_eq!(ctrl.view_mut().take_calls(), vec![Call::Render(2)]);
    assert_eq!(ctrl.view().card(0).score, 6);
    assert_eq!(ctrl.view().card(1).input, "9");
}

#[test]
fn leave_guard_tracks_scores() {
    let mut ctrl = started(&["A", "B"]);
    assert!(!ctrl.blocks_leave());
    ctrl.submit(1, "2");
    assert!(ctrl.blocks_leave());
    ctrl.reset_points(&mut |_: &str| true);
    assert!(!ctrl.blocks_leave());
}
