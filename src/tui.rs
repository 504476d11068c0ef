//! TUI (Terminal User Interface) module for Hangman
//!
//! This module provides a full-screen terminal interface using Ratatui.
//!
//! # Layout
//! Title, then the gallows next to the word and the on-screen keyboard,
//! then categories and score, a status line and the key help.
//!
//! # State Machine
//! - `Playing`: letter keys guess, `?` asks for a hint, digits pick a category
//! - `Notifying`: an outcome or notice is shown; any key dismisses it

use crate::gallows::{self, Segment};
use crate::game_state::{GameInterface, RoundOutcome, RoundSnapshot, UserAction};
use crate::cli::outcome_message;
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const KEYBOARD_COLUMNS: usize = 9;
const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const GALLOWS_PANEL_WIDTH: u16 = 16;

const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);
const WORD_STYLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

#[derive(Clone, Copy, PartialEq, Debug)]
enum KeyState {
    Available,
    Hit,
    Missed,
}

impl KeyState {
    fn of(letter: char, snapshot: &RoundSnapshot) -> Self {
        if snapshot.missed.contains(&letter) {
            Self::Missed
        } else if snapshot.attempted.contains(&letter) {
            Self::Hit
        } else {
            Self::Available
        }
    }

    fn colors(self) -> (Color, Color) {
        match self {
            Self::Available => (Color::DarkGray, Color::White),
            Self::Hit => (Color::Green, Color::Black),
            Self::Missed => (Color::Black, Color::DarkGray),
        }
    }
}

#[derive(Debug, PartialEq)]
enum TuiState {
    Playing,
    /// A notice is on screen; the next key press dismisses it.
    Notifying,
}

/// The round on screen. While an outcome notice is up, the finished round stays
/// visible and newer snapshots wait until the notice is dismissed.
#[derive(Debug, Default)]
struct RoundView {
    shown: Option<RoundSnapshot>,
    pending: Option<RoundSnapshot>,
    held: bool,
}

impl RoundView {
    fn update(&mut self, snapshot: &RoundSnapshot) {
        if self.held {
            self.pending = Some(snapshot.clone());
        } else {
            self.shown = Some(snapshot.clone());
        }
    }

    fn hold(&mut self, finished: &RoundSnapshot) {
        self.shown = Some(finished.clone());
        self.held = true;
    }

    fn release(&mut self) {
        self.held = false;
        if let Some(next) = self.pending.take() {
            self.shown = Some(next);
        }
    }

    fn current(&self) -> Option<&RoundSnapshot> {
        self.shown.as_ref()
    }
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    snapshot: Option<&'a RoundSnapshot>,
    categories: &'a [String],
    state: &'a TuiState,
    message: &'a str,
    error_message: &'a str,
    status: &'a str,
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and round display.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    round_view: RoundView,
    categories: Vec<String>,
    state: TuiState,
    message: String,
    error_message: String,
    status: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete: raw mode, alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            round_view: RoundView::default(),
            categories: Vec::new(),
            state: TuiState::Playing,
            message: String::new(),
            error_message: String::new(),
            status: "Ready".to_string(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            snapshot: self.round_view.current(),
            categories: &self.categories,
            state: &self.state,
            message: &self.message,
            error_message: &self.error_message,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(_e) = self.draw() {
            debug_log!("Draw error: {}", _e);
        }
    }

    fn notify(&mut self, message: String, status: &str) {
        self.message = message;
        self.status = status.to_string();
        self.state = TuiState::Notifying;
        self.draw_or_log();
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Title
                Constraint::Length(11), // Gallows, word and keyboard
                Constraint::Min(6),     // Info panel (takes remaining space)
                Constraint::Length(3),  // Status line
                Constraint::Length(3),  // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);

        let board = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(GALLOWS_PANEL_WIDTH), Constraint::Min(20)])
            .split(chunks[1]);
        let segments = ctx.snapshot.map_or(&[][..], |s| s.segments.as_slice());
        Self::render_gallows(f, board[0], segments);
        if let Some(snapshot) = ctx.snapshot {
            Self::render_board(f, board[1], snapshot);
        }

        Self::render_info(
            f,
            chunks[2],
            ctx.snapshot,
            ctx.categories,
            ctx.message,
            ctx.error_message,
        );
        Self::render_status(f, chunks[3], ctx.status);
        Self::render_instructions(f, chunks[4], ctx.state);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("HANGMAN")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_gallows(f: &mut Frame, area: Rect, segments: &[Segment]) {
        let lines: Vec<Line> = gallows::render_ascii(segments)
            .into_iter()
            .map(Line::from)
            .collect();
        let paragraph =
            Paragraph::new(lines).block(Block::default().title("Gallows").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_board(f: &mut Frame, area: Rect, snapshot: &RoundSnapshot) {
        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("  {}", snapshot.masked_word.to_uppercase()),
                WORD_STYLE,
            )),
            Line::from(""),
        ];
        lines.extend(Self::keyboard_lines(snapshot));

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .title(format!("Word ({})", snapshot.category))
                .borders(Borders::ALL),
        );
        f.render_widget(paragraph, area);
    }

    /// Letters in rows of nine, coloured by whether they were hit, missed or are still available.
    fn keyboard_lines(snapshot: &RoundSnapshot) -> Vec<Line<'static>> {
        let letters: Vec<char> = ('a'..='z').collect();
        letters
            .chunks(KEYBOARD_COLUMNS)
            .map(|row| {
                let mut spans = vec![Span::raw("  ")];
                for &letter in row {
                    let (bg_color, fg_color) = KeyState::of(letter, snapshot).colors();
                    spans.push(Span::styled(
                        format!(" {} ", letter.to_ascii_uppercase()),
                        Style::default().fg(fg_color).bg(bg_color),
                    ));
                    spans.push(Span::raw(" "));
                }
                Line::from(spans)
            })
            .collect()
    }

    fn render_info(
        f: &mut Frame,
        area: Rect,
        snapshot: Option<&RoundSnapshot>,
        categories: &[String],
        message: &str,
        error_message: &str,
    ) {
        let mut lines = Vec::new();

        if let Some(snapshot) = snapshot {
            lines.push(Line::from(vec![Span::styled(
                format!(
                    "Tries left: {} | Hints left: {}",
                    snapshot.tries_remaining, snapshot.hints_remaining
                ),
                INFO_STYLE,
            )]));
            lines.push(Line::from(vec![Span::styled(
                format!(
                    "Wins: {} | Losses: {}",
                    snapshot.stats.wins, snapshot.stats.losses
                ),
                SUCCESS_STYLE,
            )]));
            lines.push(Line::from(""));
        }

        if !categories.is_empty() {
            let current = snapshot.map(|s| s.category.as_str());
            let mut spans = vec![Span::styled("Categories: ", HEADER_STYLE)];
            for (i, name) in categories.iter().enumerate() {
                let label = format!("{}:{name} ", i + 1);
                if Some(name.as_str()) == current {
                    spans.push(Span::styled(label, SUCCESS_STYLE));
                } else {
                    spans.push(Span::raw(label));
                }
            }
            lines.push(Line::from(spans));
            lines.push(Line::from(""));
        }

        if !message.is_empty() {
            lines.push(Line::from(vec![Span::styled(message, MESSAGE_STYLE)]));
        }

        if !error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(error_message, ERROR_STYLE)]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Information").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: &TuiState) {
        let text = match state {
            TuiState::Playing => {
                "A-Z: Guess | ?: Hint | 1-9: Category | ENTER: New Game | ESC: Quit"
            }
            TuiState::Notifying => "Press any key to continue | ESC: Quit",
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    fn handle_input(&mut self) -> Result<Option<UserAction>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        let Event::Key(key) = event::read()? else {
            return Ok(None);
        };
        // Only process Press events, ignore Release and Repeat to avoid double input
        if key.kind != KeyEventKind::Press {
            return Ok(None);
        }
        debug_log!(
            "handle_input() - Key event received: code={:?}, modifiers={:?}",
            key.code,
            key.modifiers
        );

        match self.state {
            TuiState::Notifying => Ok(self.handle_notice_input(key)),
            TuiState::Playing => Ok(self.handle_play_input(key)),
        }
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
    }

    fn handle_notice_input(&mut self, key: KeyEvent) -> Option<UserAction> {
        if key.code == KeyCode::Esc {
            return Some(UserAction::Exit);
        }
        self.state = TuiState::Playing;
        self.round_view.release();
        self.message.clear();
        self.status = "Guess a letter".to_string();
        None
    }

    fn handle_play_input(&mut self, key: KeyEvent) -> Option<UserAction> {
        self.error_message.clear();
        if Self::has_modifier_keys(&key) {
            return None;
        }

        match key.code {
            KeyCode::Esc => Some(UserAction::Exit),
            KeyCode::Enter => Some(UserAction::NewGame),
            KeyCode::Char('?') => Some(UserAction::Hint),
            KeyCode::Char(c) if c.is_ascii_alphabetic() => {
                let letter = c.to_ascii_lowercase();
                let already = self
                    .round_view
                    .current()
                    .is_some_and(|s| s.attempted.contains(&letter));
                if already {
                    // Mirrors a disabled key.
                    self.error_message =
                        format!("'{}' has already been tried", letter.to_ascii_uppercase());
                    None
                } else {
                    Some(UserAction::Guess(letter))
                }
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                let index = c.to_digit(10).and_then(|d| usize::try_from(d).ok())?;
                match index.checked_sub(1).and_then(|i| self.categories.get(i)) {
                    Some(name) => Some(UserAction::SelectCategory(name.clone())),
                    None => {
                        self.error_message = format!("No category number {c}");
                        None
                    }
                }
            }
            _ => None,
        }
    }
}

impl GameInterface for TuiInterface {
    fn display_categories(&mut self, categories: &[String], _current: &str) {
        self.categories = categories.to_vec();
        self.draw_or_log();
    }

    fn display_round(&mut self, snapshot: &RoundSnapshot) {
        self.round_view.update(snapshot);
        if self.state == TuiState::Playing {
            self.status = format!("Category: {} - guess a letter", snapshot.category);
        }
        self.draw_or_log();
    }

    fn read_action(&mut self) -> Option<UserAction> {
        loop {
            if self.draw().is_err() {
                return Some(UserAction::Exit);
            }

            match self.handle_input() {
                Ok(Some(action)) => return Some(action),
                Ok(None) => {}
                Err(_e) => {
                    debug_log!("read_action() - input error: {}", _e);
                    return Some(UserAction::Exit);
                }
            }
        }
    }

    fn display_hint(&mut self, letter: char) {
        self.message = format!("Hint: the word contains '{}'", letter.to_ascii_uppercase());
        self.draw_or_log();
    }

    fn display_hint_exhausted(&mut self) {
        self.notify(
            "No hints: you have used all your hints.".to_string(),
            "No hints left",
        );
    }

    fn display_outcome(&mut self, outcome: &RoundOutcome) {
        self.round_view.hold(&outcome.final_round);
        self.notify(outcome_message(outcome), "Round over - press any key for a new round");
    }

    fn display_error(&mut self, message: &str) {
        self.error_message = message.to_string();
        self.draw_or_log();
    }

    fn display_exit_message(&mut self) {
        self.message = "Exiting...".to_string();
        self.status = "Exiting application...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::SessionStats;

    fn snapshot(attempted: &[char], missed: &[char]) -> RoundSnapshot {
        RoundSnapshot {
            category: "Animals".to_string(),
            masked_word: "_ _ _".to_string(),
            attempted: attempted.to_vec(),
            missed: missed.to_vec(),
            tries_remaining: 6,
            hints_remaining: 3,
            stats: SessionStats::default(),
            segments: gallows::visible_segments(6),
        }
    }

    #[test]
    fn test_key_state() {
        let snap = snapshot(&['a', 'z'], &['z']);
        assert_eq!(KeyState::of('a', &snap), KeyState::Hit);
        assert_eq!(KeyState::of('z', &snap), KeyState::Missed);
        assert_eq!(KeyState::of('b', &snap), KeyState::Available);
    }

    #[test]
    fn test_keyboard_layout() {
        let lines = TuiInterface::keyboard_lines(&snapshot(&[], &[]));
        assert_eq!(lines.len(), 3);
        // Leading indent plus a letter and a gap per key.
        assert_eq!(lines[0].spans.len(), 1 + 2 * KEYBOARD_COLUMNS);
        assert_eq!(lines[2].spans.len(), 1 + 2 * 8);
    }

    #[test]
    fn test_round_view_follows_updates() {
        let mut view = RoundView::default();
        assert!(view.current().is_none());
        view.update(&snapshot(&['a'], &[]));
        assert_eq!(view.current().unwrap().attempted, vec!['a']);
        view.update(&snapshot(&['a', 'b'], &['b']));
        assert_eq!(view.current().unwrap().attempted, vec!['a', 'b']);
    }

    #[test]
    fn test_round_view_keeps_finished_round_until_released() {
        let mut view = RoundView::default();
        let mut finished = snapshot(&['q', 'w', 'x', 'y', 'z', 'v'], &['q', 'w', 'x', 'y', 'z', 'v']);
        finished.tries_remaining = 0;
        finished.segments = gallows::visible_segments(0);
        view.update(&finished);

        view.hold(&finished);
        view.update(&snapshot(&[], &[]));
        assert_eq!(view.current(), Some(&finished));

        view.release();
        let next = view.current().unwrap();
        assert!(next.attempted.is_empty());
        assert_eq!(next.segments, vec![Segment::Base]);
    }
}
