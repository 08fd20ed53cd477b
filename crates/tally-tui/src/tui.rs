//! Ratatui TUI frontend for the scoreboard.
//!
//! Pure UI module: terminal lifecycle, rendering, and input → intent
//! mapping. All scores live in the controller's
//! [`GameState`](tally_core::game_state::GameState); this module only edits
//! the text buffers in [`TuiView`], the way a user types into a document.

use crossterm::{
    event::{
        self, DisableFocusChange, EnableFocusChange, Event, KeyCode, KeyEvent, KeyEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use std::io::{self, Stdout};
use std::time::Instant;

use tally_core::config::NAME_SLOTS;
use tally_core::game_state::PlayerId;
use tally_core::guards::{CONFIRM_KEY, suppresses_confirm_key};
use tally_core::view::{ConfirmIntent, Pulse, Section};

use crate::view::{TuiCard, TuiView};

// ---------------------------------------------------------------------------
// UserIntent: result of processing user input
// ---------------------------------------------------------------------------

/// The result of processing a user input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserIntent {
    /// No action needed (e.g. the event only moved focus or edited text).
    None,
    /// The user wants to quit / close the application.
    Quit,
    /// Start control activated.
    Start,
    /// A point-entry field changed.
    PointsEdited(PlayerId),
    /// Submit control activated.
    Submit(PlayerId),
    /// Undo control activated.
    Undo(PlayerId),
    /// Reset-points key pressed.
    Reset,
    /// New-game key pressed.
    NewGame,
    /// The terminal gained or lost focus.
    Visibility { hidden: bool },
}

// ---------------------------------------------------------------------------
// Focus model
// ---------------------------------------------------------------------------

/// The controls inside one player card, left to right.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardControl {
    Undo,
    Input,
    Submit,
}

impl CardControl {
    fn left(self) -> Self {
        match self {
            Self::Undo | Self::Input => Self::Undo,
            Self::Submit => Self::Input,
        }
    }

    fn right(self) -> Self {
        match self {
            Self::Undo => Self::Input,
            Self::Input | Self::Submit => Self::Submit,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Name(usize),
    Start,
    Card {
        player: PlayerId,
        control: CardControl,
    },
}

impl Default for Focus {
    fn default() -> Self {
        Focus::Name(0)
    }
}

impl Focus {
    /// Bring the focus back into the visible section.
    fn clamp(self, view: &TuiView) -> Self {
        match (view.section, self) {
            (Section::Setup, Focus::Card { .. }) => Focus::Name(0),
            (Section::Setup, other) => other,
            (Section::Game, Focus::Card { player, control }) if player < view.cards.len() => {
                Focus::Card { player, control }
            }
            (Section::Game, _) => Focus::Card {
                player: 0,
                control: CardControl::Input,
            },
        }
    }

    fn next(self, view: &TuiView) -> Self {
        match self {
            Focus::Name(slot) if slot + 1 < NAME_SLOTS => Focus::Name(slot + 1),
            Focus::Name(_) => Focus::Start,
            Focus::Start => Focus::Name(0),
            Focus::Card { player, control } => Focus::Card {
                player: (player + 1) % view.cards.len().max(1),
                control,
            },
        }
    }

    fn prev(self, view: &TuiView) -> Self {
        match self {
            Focus::Name(0) => Focus::Start,
            Focus::Name(slot) => Focus::Name(slot - 1),
            Focus::Start => Focus::Name(NAME_SLOTS - 1),
            Focus::Card { player, control } => {
                let count = view.cards.len().max(1);
                Focus::Card {
                    player: (player + count - 1) % count,
                    control,
                }
            }
        }
    }

    /// Whether the focused control is a text field.
    fn is_text_field(self) -> bool {
        matches!(
            self,
            Focus::Name(_)
                | Focus::Card {
                    control: CardControl::Input,
                    ..
                }
        )
    }
}

// ---------------------------------------------------------------------------
// TUI-only state
// ---------------------------------------------------------------------------

/// UI-layer state that lives alongside (but separate from) the view.
#[derive(Debug, Default)]
struct TuiState {
    focus: Focus,
    show_help: bool,
}

impl TuiState {
    /// Translate one terminal event into an intent. Only key presses and
    /// focus changes matter; everything else (resize, paste) is ignored.
    fn handle_event(&mut self, event: Event, view: &mut TuiView) -> UserIntent {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key, view),
            Event::FocusGained => UserIntent::Visibility { hidden: false },
            Event::FocusLost => UserIntent::Visibility { hidden: true },
            _ => UserIntent::None,
        }
    }

    /// Translate one key press into an intent, editing `view`'s text buffers
    /// along the way.
    fn handle_key(&mut self, key: KeyEvent, view: &mut TuiView) -> UserIntent {
        self.focus = self.focus.clamp(view);

        // An open alert swallows the next key, like a modal dialog.
        if view.alert.take().is_some() {
            return UserIntent::None;
        }

        match key.code {
            KeyCode::Esc => {
                if self.show_help {
                    self.show_help = false;
                    UserIntent::None
                } else {
                    UserIntent::Quit
                }
            }
            KeyCode::F(1) => {
                self.show_help = !self.show_help;
                UserIntent::None
            }
            _ if self.show_help => UserIntent::None,
            KeyCode::F(2) if view.section == Section::Game => UserIntent::Reset,
            KeyCode::F(3) if view.section == Section::Game => UserIntent::NewGame,
            KeyCode::Tab | KeyCode::Down => {
                self.focus = self.focus.next(view);
                UserIntent::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = self.focus.prev(view);
                UserIntent::None
            }
            KeyCode::Left => {
                if let Focus::Card { player, control } = self.focus {
                    self.focus = Focus::Card {
                        player,
                        control: control.left(),
                    };
                }
                UserIntent::None
            }
            KeyCode::Right => {
                if let Focus::Card { player, control } = self.focus {
                    self.focus = Focus::Card {
                        player,
                        control: control.right(),
                    };
                }
                UserIntent::None
            }
            KeyCode::Enter => self.activate(view),
            KeyCode::Char(c) => self.type_char(c, view),
            KeyCode::Backspace => self.backspace(view),
            _ => UserIntent::None,
        }
    }

    fn activate(&mut self, view: &TuiView) -> UserIntent {
        if suppresses_confirm_key(CONFIRM_KEY, self.focus.is_text_field()) {
            // No implicit submit: step to the next name slot instead.
            if let Focus::Name(_) = self.focus {
                self.focus = self.focus.next(view);
            }
            return UserIntent::None;
        }
        match self.focus {
            Focus::Start => UserIntent::Start,
            Focus::Card {
                player,
                control: CardControl::Undo,
            } => {
                let enabled = view.cards.get(player).is_some_and(|c| c.card.undo_enabled);
                if enabled {
                    UserIntent::Undo(player)
                } else {
                    UserIntent::None
                }
            }
            Focus::Card {
                player,
                control: CardControl::Submit,
            } => UserIntent::Submit(player),
            _ => UserIntent::None,
        }
    }

    fn type_char(&mut self, c: char, view: &mut TuiView) -> UserIntent {
        match self.focus {
            Focus::Name(slot) => {
                view.names[slot].push(c);
                UserIntent::None
            }
            Focus::Card { player, control } => {
                if c == '+' {
                    return UserIntent::Submit(player);
                }
                if c == 'u' {
                    return UserIntent::Undo(player);
                }
                let numeric = c.is_ascii_digit() || c == '-';
                if control != CardControl::Input || !numeric {
                    return UserIntent::None;
                }
                match view.cards.get_mut(player) {
                    Some(card) => {
                        card.card.input.push(c);
                        UserIntent::PointsEdited(player)
                    }
                    None => UserIntent::None,
                }
            }
            Focus::Start => UserIntent::None,
        }
    }

    fn backspace(&mut self, view: &mut TuiView) -> UserIntent {
        match self.focus {
            Focus::Name(slot) => {
                view.names[slot].pop();
                UserIntent::None
            }
            Focus::Card {
                player,
                control: CardControl::Input,
            } => match view.cards.get_mut(player) {
                Some(card) => {
                    card.card.input.pop();
                    UserIntent::PointsEdited(player)
                }
                None => UserIntent::None,
            },
            _ => UserIntent::None,
        }
    }
}

// ---------------------------------------------------------------------------
// Public API: Tui struct
// ---------------------------------------------------------------------------

/// Owns the ratatui terminal and all UI-layer state.
///
/// The app loop ([`crate::app`]) drives this struct: call [`Tui::render`]
/// each frame and [`Tui::poll_and_handle_input`] to process terminal events.
/// `Tui` also answers [`ConfirmIntent`] prompts with a blocking dialog.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    state: TuiState,
    /// Last rendered view, redrawn underneath confirmation dialogs.
    snapshot: TuiView,
}

impl Tui {
    /// Set up the terminal (raw mode, alternate screen, focus reporting) and
    /// return a ready `Tui`.
    pub fn setup() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self {
            terminal,
            state: TuiState::default(),
            snapshot: TuiView::default(),
        })
    }

    /// Restore the terminal to its original state.
    pub fn teardown(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            DisableFocusChange,
            LeaveAlternateScreen
        )?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Draw the current frame.
    pub fn render(&mut self, view: &TuiView) -> io::Result<()> {
        self.state.focus = self.state.focus.clamp(view);
        self.snapshot.clone_from(view);
        let state = &self.state;
        self.terminal.draw(|f| ui(f, view, state))?;
        Ok(())
    }

    /// Poll for a terminal event and, if one is available, translate it into
    /// a [`UserIntent`]. This never blocks: returns [`UserIntent::None`]
    /// immediately when no event is pending.
    pub fn poll_and_handle_input(&mut self, view: &mut TuiView) -> io::Result<UserIntent> {
        if !event::poll(std::time::Duration::from_millis(0))? {
            return Ok(UserIntent::None);
        }
        Ok(self.state.handle_event(event::read()?, view))
    }
}

impl ConfirmIntent for Tui {
    /// Block on a yes/no dialog drawn over the last frame.
    fn confirm(&mut self, prompt: &str) -> bool {
        loop {
            let (snapshot, state) = (&self.snapshot, &self.state);
            let drawn = self.terminal.draw(|f| {
                ui(f, snapshot, state);
                render_confirm_popup(f, prompt);
            });
            if let Err(e) = drawn {
                tracing::warn!("could not draw confirmation: {e}");
                return false;
            }

            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('y' | 'Y') | KeyCode::Enter => return true,
                    KeyCode::Char('n' | 'N') | KeyCode::Esc => return false,
                    _ => {}
                },
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!("could not read confirmation: {e}");
                    return false;
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn ui(frame: &mut Frame, view: &TuiView, tui: &TuiState) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(10),   // Section
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let title = Paragraph::new(Line::from(Span::styled(
        "Tally",
        Style::default().fg(Color::Green).bold(),
    )))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(title, main_layout[0]);

    let cursor = match view.section {
        Section::Setup => render_setup(frame, view, tui, main_layout[1]),
        Section::Game => render_game(frame, view, tui, main_layout[1]),
    };
    if let Some(position) = cursor {
        frame.set_cursor_position(position);
    }

    render_status_bar(frame, view, main_layout[2]);

    if tui.show_help {
        render_help_popup(frame);
    }
    if let Some(message) = &view.alert {
        render_alert_popup(frame, message);
    }
}

fn focused_style(focused: bool) -> Style {
    if focused {
        Style::default().bg(Color::Blue).fg(Color::Black).bold()
    } else {
        Style::default().fg(Color::White)
    }
}

/// Render the name slots and start button; returns the text cursor, if any.
fn render_setup(
    frame: &mut Frame,
    view: &TuiView,
    tui: &TuiState,
    area: Rect,
) -> Option<(u16, u16)> {
    let area = centered_rect(50, 80, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue))
        .title(" Players ")
        .title_style(Style::default().fg(Color::Blue).bold());
    frame.render_widget(&block, area);
    let inner = block.inner(area);

    let mut constraints: Vec<Constraint> = (0..NAME_SLOTS).map(|_| Constraint::Length(2)).collect();
    constraints.push(Constraint::Length(2));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    let mut cursor = None;
    for (slot, name) in view.names.iter().enumerate() {
        let label = format!(" Player {}: ", slot + 1);
        let focused = tui.focus == Focus::Name(slot);
        let value_style = if focused {
            Style::default().fg(Color::Cyan).underlined()
        } else {
            Style::default().fg(Color::White)
        };
        let shown = if name.is_empty() && !focused {
            Span::styled("Name", Style::default().fg(Color::DarkGray))
        } else {
            Span::styled(name.as_str(), value_style)
        };
        let line = Line::from(vec![
            Span::styled(label.clone(), Style::default().fg(Color::Gray)),
            shown,
        ]);
        frame.render_widget(Paragraph::new(line), rows[slot]);

        if focused {
            let x = rows[slot].x + (label.chars().count() + name.chars().count()) as u16;
            if x < rows[slot].x + rows[slot].width {
                cursor = Some((x, rows[slot].y));
            }
        }
    }

    let start = Paragraph::new(Line::from(Span::styled(
        " Start Game ",
        focused_style(tui.focus == Focus::Start),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(start, rows[NAME_SLOTS]);

    cursor
}

/// Render the player grid; returns the text cursor, if any.
fn render_game(
    frame: &mut Frame,
    view: &TuiView,
    tui: &TuiState,
    area: Rect,
) -> Option<(u16, u16)> {
    if view.cards.is_empty() {
        return None;
    }
    let count = view.cards.len() as u32;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints((0..count).map(|_| Constraint::Ratio(1, count)))
        .split(area);

    let now = Instant::now();
    let mut cursor = None;
    for (card, column) in view.cards.iter().zip(columns.iter()) {
        let focus = match tui.focus {
            Focus::Card { player, control } if player == card.card.id => Some(control),
            _ => None,
        };
        if let Some(position) = render_card(frame, card, focus, now, *column) {
            cursor = Some(position);
        }
    }
    cursor
}

fn render_card(
    frame: &mut Frame,
    card: &TuiCard,
    focus: Option<CardControl>,
    now: Instant,
    area: Rect,
) -> Option<(u16, u16)> {
    let border = if focus.is_some() {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(format!(" {} ", card.card.name))
        .title_style(Style::default().fg(Color::White).bold());
    frame.render_widget(&block, area);
    let inner = block.inner(area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Score
            Constraint::Length(1), // Label
            Constraint::Length(1), // Controls
        ])
        .split(inner);

    let score_style = match card.pulse_at(now) {
        Some(Pulse::Add) => Style::default().fg(Color::Green).bold(),
        Some(Pulse::Undo) => Style::default().fg(Color::Red).dim(),
        None => Style::default().fg(Color::White).bold(),
    };
    let score_area = Rect {
        y: rows[0].y + rows[0].height / 2,
        height: 1,
        ..rows[0]
    };
    let score = Paragraph::new(Span::styled(card.card.score.to_string(), score_style))
        .alignment(Alignment::Center);
    frame.render_widget(score, score_area);

    frame.render_widget(
        Paragraph::new(Span::styled("Add Points", Style::default().fg(Color::Gray))),
        rows[1],
    );

    let undo_style = if !card.card.undo_enabled {
        Style::default().fg(Color::DarkGray)
    } else {
        focused_style(focus == Some(CardControl::Undo))
    };
    let input_text = if card.card.input.is_empty() && focus != Some(CardControl::Input) {
        "0".to_string()
    } else {
        card.card.input.clone()
    };
    let input_style = if focus == Some(CardControl::Input) {
        Style::default().fg(Color::Cyan).underlined()
    } else if card.card.input.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };

    let undo_label = " ⎌ ";
    let spans = vec![
        Span::styled(undo_label, undo_style),
        Span::raw(" ["),
        Span::styled(input_text, input_style),
        Span::raw("] "),
        Span::styled(" + ", focused_style(focus == Some(CardControl::Submit))),
    ];
    frame.render_widget(Paragraph::new(Line::from(spans)), rows[2]);

    if focus == Some(CardControl::Input) {
        let offset = undo_label.chars().count() + 2 + card.card.input.chars().count();
        let x = rows[2].x + offset as u16;
        if x < rows[2].x + rows[2].width {
            return Some((x, rows[2].y));
        }
    }
    None
}

fn render_status_bar(frame: &mut Frame, view: &TuiView, area: Rect) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Cyan).bold());
    let mut spans = vec![key("F1"), Span::raw(": Help | ")];
    if view.section == Section::Game {
        spans.extend([
            key("F2"),
            Span::raw(": Reset Points | "),
            key("F3"),
            Span::raw(": New Game | "),
        ]);
    }
    spans.extend([key("ESC"), Span::raw(": Quit")]);
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_help_popup(frame: &mut Frame) {
    let area = centered_rect(60, 80, frame.area());

    frame.render_widget(Clear, area);

    let help_text = Text::from(vec![
        Line::from(vec![Span::styled(
            "CONTROLS",
            Style::default().fg(Color::Yellow).bold(),
        )]),
        Line::from(""),
        Line::from(vec![Span::styled(
            "  SETUP",
            Style::default().fg(Color::Cyan).bold(),
        )]),
        Line::from("  Tab/Up/Down   Move between name slots"),
        Line::from("  Enter         Next slot / start on Start Game"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "  GAME",
            Style::default().fg(Color::Cyan).bold(),
        )]),
        Line::from("  Tab/Up/Down   Move between players"),
        Line::from("  Left/Right    Undo / points / submit"),
        Line::from("  0-9 and -     Type points"),
        Line::from("  +             Submit points"),
        Line::from("  u             Undo last entry"),
        Line::from("  F2            Reset points"),
        Line::from("  F3            New game"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "  SYSTEM",
            Style::default().fg(Color::Cyan).bold(),
        )]),
        Line::from("  F1            Toggle this help"),
        Line::from("  ESC           Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press ESC or F1 to close",
            Style::default().fg(Color::DarkGray),
        )]),
    ]);

    let help = Paragraph::new(help_text).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Help ")
            .title_style(Style::default().fg(Color::Cyan).bold())
            .style(Style::default().bg(Color::Black)),
    );

    frame.render_widget(help, area);
}

fn render_dialog(frame: &mut Frame, title: &str, color: Color, body: &str, hint: &str) {
    let area = centered_rect(50, 30, frame.area());
    frame.render_widget(Clear, area);

    let text = Text::from(vec![
        Line::from(""),
        Line::from(body.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            hint.to_string(),
            Style::default().fg(Color::DarkGray),
        )),
    ]);
    let dialog = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(format!(" {title} "))
                .title_style(Style::default().fg(color).bold())
                .style(Style::default().bg(Color::Black)),
        );
    frame.render_widget(dialog, area);
}

fn render_alert_popup(frame: &mut Frame, message: &str) {
    render_dialog(frame, "Notice", Color::Yellow, message, "Press any key");
}

fn render_confirm_popup(frame: &mut Frame, prompt: &str) {
    render_dialog(frame, "Confirm", Color::Red, prompt, "[Y]es / [N]o");
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
