//! TUI (Terminal User Interface) module for Animal Scramble
//!
//! Draws the scrambled word as letter tiles using Ratatui and reads guesses
//! from the keyboard.
//!
//! # State Machine
//! - `Guessing` → `Finished` (won or game over) → `StartScreen` → back to `Guessing`
//! - After a game over, `Finished` carries a scheduled redirect; once it is
//!   due the interface switches to `StartScreen` by itself.

use crate::game_state::{
    GameInterface, GuessResult, MAX_ATTEMPTS, RoundView, Status, UserAction, WINNING_SCORE,
};
use crate::redirect::{GAME_OVER_REDIRECT_DELAY, ScheduledRedirect};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const MAX_INPUT_LENGTH: usize = 16;
const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;

// Light blue cards with dark blue letters
const TILE_STYLE: Style = Style::new()
    .bg(Color::Rgb(0xb9, 0xe5, 0xff))
    .fg(Color::Rgb(0x00, 0x65, 0x9f))
    .add_modifier(Modifier::BOLD);
const INPUT_TILE_STYLE: Style = Style::new().fg(Color::White).bg(Color::DarkGray);
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

#[derive(Debug)]
enum TuiState {
    Guessing,
    /// Session ended. `redirect` is set after a game over.
    Finished {
        redirect: Option<ScheduledRedirect>,
    },
    StartScreen,
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    puzzle: &'a str,
    current_input: &'a str,
    state: &'a TuiState,
    score: u32,
    attempts: u32,
    message: &'a str,
    message_style: Style,
    error_message: &'a str,
    status: &'a str,
}

/// Main TUI interface component.
///
/// Owns the terminal for its whole lifetime and restores it on drop.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    puzzle: String,
    current_input: String,
    state: TuiState,
    score: u32,
    attempts: u32,
    message: String,
    message_style: Style,
    error_message: String,
    status: String,
    redirect_delay: Duration,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        Self::with_redirect_delay(GAME_OVER_REDIRECT_DELAY)
    }

    pub fn with_redirect_delay(redirect_delay: Duration) -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete: raw mode, alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            puzzle: String::new(),
            current_input: String::new(),
            state: TuiState::Guessing,
            score: 0,
            attempts: 0,
            message: String::new(),
            message_style: MESSAGE_STYLE,
            error_message: String::new(),
            status: "Ready to start".to_string(),
            redirect_delay,
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
            puzzle: &self.puzzle,
            current_input: &self.current_input,
            state: &self.state,
            score: self.score,
            attempts: self.attempts,
            message: &self.message,
            message_style: self.message_style,
            error_message: &self.error_message,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(5), // Tiles
                Constraint::Length(3), // Guess input
                Constraint::Min(4),    // Score, attempts and messages
                Constraint::Length(3), // Status line
                Constraint::Length(3), // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        match ctx.state {
            TuiState::StartScreen => Self::render_start_screen(f, chunks[1]),
            TuiState::Guessing | TuiState::Finished { .. } => {
                Self::render_tiles(f, chunks[1], ctx.puzzle);
            }
        }
        Self::render_input(f, chunks[2], ctx.current_input, ctx.state);
        Self::render_info(f, chunks[3], ctx);
        Self::render_status(f, chunks[4], ctx.status);
        Self::render_instructions(f, chunks[5], ctx.state);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("ANIMAL SCRAMBLE")
            .style(HEADER_STYLE)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn tile_line(letters: &str, style: Style) -> Line<'static> {
        let mut spans = Vec::with_capacity(letters.len() * 2);
        for letter in letters.chars() {
            spans.push(Span::styled(format!(" {letter} "), style));
            spans.push(Span::raw(" "));
        }
        spans.pop();
        Line::from(spans)
    }

    fn render_tiles(f: &mut Frame, area: Rect, puzzle: &str) {
        // Blank tile rows above and below the letters give the cards some height
        let blanks = " ".repeat(puzzle.chars().count());
        let lines = vec![
            Self::tile_line(&blanks, TILE_STYLE),
            Self::tile_line(puzzle, TILE_STYLE),
            Self::tile_line(&blanks, TILE_STYLE),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().title("Unscramble").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_start_screen(f: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled("Welcome back!", HEADER_STYLE)),
            Line::from("Press ENTER to start a new game"),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_input(f: &mut Frame, area: Rect, current_input: &str, state: &TuiState) {
        let line = if matches!(state, TuiState::Guessing) {
            let mut line = Self::tile_line(current_input, INPUT_TILE_STYLE);
            line.spans.push(Span::styled("_", INFO_STYLE));
            line
        } else {
            Line::from("")
        };
        let paragraph = Paragraph::new(line)
            .alignment(Alignment::Center)
            .block(Block::default().title("Your guess").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_info(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines = vec![Line::from(vec![
            Span::styled(format!("Score: {}/{WINNING_SCORE}", ctx.score), SUCCESS_STYLE),
            Span::raw("    "),
            Span::styled(
                format!("Attempts: {}/{MAX_ATTEMPTS}", ctx.attempts),
                INFO_STYLE,
            ),
        ])];

        if !ctx.message.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(ctx.message, ctx.message_style)));
        }

        if !ctx.error_message.is_empty() {
            lines.push(Line::from(Span::styled(ctx.error_message, ERROR_STYLE)));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Progress").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: &TuiState) {
        let text = match state {
            TuiState::Guessing => "Type the animal | ENTER: Check | BACKSPACE: Erase | ESC: Quit",
            TuiState::Finished { redirect: Some(_) } => "Returning to the start screen... | ESC: Quit",
            TuiState::Finished { redirect: None } => "ENTER/N: New Game | ESC: Quit",
            TuiState::StartScreen => "ENTER/N: New Game | ESC: Quit",
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    /// Waits up to one poll interval for a key press.
    fn next_key(&mut self) -> Result<Option<KeyEvent>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => {
                // Only process Press events, ignore Release and Repeat to avoid double input
                if key.kind != event::KeyEventKind::Press {
                    return Ok(None);
                }
                // Escape sequences leaking in on focus changes show up as garbage characters
                if let KeyCode::Char(c) = key.code
                    && (c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD)
                {
                    debug_log!("next_key() - Ignoring invalid character: {:?}", c);
                    return Ok(None);
                }
                Ok(Some(key))
            }
            _other => {
                debug_log!("next_key() - Ignoring event: {:?}", _other);
                Ok(None)
            }
        }
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(event::KeyModifiers::ALT)
            || key.modifiers.contains(event::KeyModifiers::CONTROL)
    }

    fn handle_guess_input(&mut self, key: KeyEvent) -> Option<UserAction> {
        self.error_message.clear();

        match key.code {
            KeyCode::Esc => {
                info_log!("handle_guess_input() - ESC pressed, returning Exit");
                Some(UserAction::Exit)
            }
            KeyCode::Enter => {
                let guess = std::mem::take(&mut self.current_input);
                info_log!("handle_guess_input() - Submitting guess '{}'", guess);
                Some(UserAction::Guess(guess))
            }
            KeyCode::Backspace => {
                self.current_input.pop();
                None
            }
            _ if Self::has_modifier_keys(&key) => {
                debug_log!(
                    "handle_guess_input() - Ignoring key with modifier: {:?}",
                    key.modifiers
                );
                None
            }
            KeyCode::Char(c) if c.is_alphabetic() => {
                if self.current_input.chars().count() < MAX_INPUT_LENGTH {
                    self.current_input.push(c.to_ascii_uppercase());
                } else {
                    self.error_message = "That's longer than any animal here!".to_string();
                }
                None
            }
            KeyCode::Char(c) => {
                self.error_message = format!("Only letters are allowed! ('{c}' is not a letter)");
                None
            }
            _ => None,
        }
    }

    fn handle_finished_input(&mut self, key: KeyEvent) -> Option<UserAction> {
        let redirect_pending = matches!(self.state, TuiState::Finished { redirect: Some(_) });
        match key.code {
            KeyCode::Esc => {
                if let TuiState::Finished {
                    redirect: Some(redirect),
                } = &mut self.state
                {
                    redirect.cancel();
                    info_log!("handle_finished_input() - Redirect cancelled");
                }
                Some(UserAction::Exit)
            }
            // Input stays locked until the game-over redirect has fired
            _ if redirect_pending => None,
            KeyCode::Enter | KeyCode::Char('n' | 'N') => Some(UserAction::Restart),
            _ => None,
        }
    }

    /// Switches to the start screen once a pending redirect is due.
    fn poll_redirect(&mut self) {
        if let TuiState::Finished {
            redirect: Some(redirect),
        } = &self.state
            && redirect.is_due()
        {
            info_log!("poll_redirect() - Redirecting to start screen");
            self.state = TuiState::StartScreen;
            self.status = "Press ENTER to play again".to_string();
        }
    }

    fn read_key_action(&mut self) -> Result<Option<UserAction>, io::Error> {
        let Some(key) = self.next_key()? else {
            return Ok(None);
        };
        debug_log!("read_key_action() - Key: {:?} in {:?}", key.code, self.state);
        Ok(match self.state {
            TuiState::Guessing => self.handle_guess_input(key),
            TuiState::Finished { .. } | TuiState::StartScreen => self.handle_finished_input(key),
        })
    }
}

impl GameInterface for TuiInterface {
    fn display_round(&mut self, round: &RoundView<'_>) {
        self.puzzle = round.puzzle.to_string();
        self.score = round.score;
        self.attempts = round.attempts;
        self.state = TuiState::Guessing;
        self.status = format!("{} letters - what animal is it?", round.puzzle.chars().count());
        self.draw_or_log();
    }

    fn read_action(&mut self) -> Option<UserAction> {
        loop {
            if self.draw().is_err() {
                info_log!("read_action() - Draw failed, returning Exit");
                return Some(UserAction::Exit);
            }
            match self.read_key_action() {
                Ok(Some(action)) => return Some(action),
                Ok(None) => {}
                Err(_e) => {
                    debug_log!("read_action() - Input error: {}", _e);
                    return Some(UserAction::Exit);
                }
            }
        }
    }

    fn display_result(&mut self, result: &GuessResult) {
        self.score = result.score_after;
        self.attempts = result.attempts_after;
        self.message = result.message.to_string();
        self.message_style = if result.correct {
            SUCCESS_STYLE
        } else {
            ERROR_STYLE
        };
        self.current_input.clear();
        self.draw_or_log();
    }

    fn finish_session(&mut self, result: &GuessResult, answer: &str) -> UserAction {
        let redirect = match result.status {
            Status::GameOver => {
                self.message = format!("{} The word was {answer}.", result.message);
                Some(ScheduledRedirect::schedule(self.redirect_delay))
            }
            Status::Won | Status::Playing => None,
        };
        self.state = TuiState::Finished { redirect };
        self.status = "Session over".to_string();

        loop {
            self.poll_redirect();
            if self.draw().is_err() {
                return UserAction::Exit;
            }
            match self.read_key_action() {
                Ok(Some(UserAction::Exit)) | Err(_) => return UserAction::Exit,
                Ok(Some(_)) => return UserAction::Restart,
                Ok(None) => {}
            }
        }
    }

    fn display_new_game_message(&mut self) {
        self.current_input.clear();
        self.error_message.clear();
        self.message = "New game started. Good luck!".to_string();
        self.message_style = MESSAGE_STYLE;
        self.state = TuiState::Guessing;
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
