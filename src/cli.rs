use crate::game_state::{GameInterface, GuessResult, RoundView, Status, UserAction};
use crate::game_state::{MAX_ATTEMPTS, WINNING_SCORE};
use crate::redirect::{GAME_OVER_REDIRECT_DELAY, GAME_OVER_REDIRECT_DELAY_MS, ScheduledRedirect};
use clap::Parser;
use std::io::BufRead;
use std::thread;
use std::time::{Duration, Instant};

/// Animal Scramble: unscramble the animal before you run out of attempts
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Play in plain line mode instead of the full-screen interface
    #[arg(long)]
    pub plain: bool,

    /// Seed for a reproducible sequence of words
    #[arg(long)]
    pub seed: Option<u64>,

    /// Delay before returning to the start screen after a game over
    #[arg(long = "redirect-delay-ms", default_value_t = GAME_OVER_REDIRECT_DELAY_MS)]
    pub redirect_delay_ms: u64,

    /// Print the animal vocabulary and exit
    #[arg(long)]
    pub list_words: bool,
}

impl Cli {
    #[must_use]
    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// UI Input/Output functions

/// Reads one line and turns it into an action.
///
/// Only the line terminator is stripped: an empty line is an empty guess.
/// End of input and read errors both mean `Exit`.
pub fn read_action<R: BufRead>(reader: &mut R) -> UserAction {
    println!("\nUnscramble the word ('new' for a new game, 'exit' to quit):");
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) | Err(_) => return UserAction::Exit,
        Ok(_) => {}
    }
    let input = input.trim_end_matches(['\n', '\r']);

    match input.trim().to_uppercase().as_str() {
        "EXIT" | "QUIT" => UserAction::Exit,
        "NEW" => UserAction::Restart,
        _ => UserAction::Guess(input.to_string()),
    }
}

/// Renders a puzzle as a row of spaced tiles, e.g. `[N] [O] [L] [I]`.
#[must_use]
pub fn format_tiles(puzzle: &str) -> String {
    puzzle
        .chars()
        .map(|c| format!("[{c}]"))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn display_round(round: &RoundView<'_>) {
    println!();
    println!("{}", format_tiles(round.puzzle));
    println!(
        "Score: {}/{WINNING_SCORE}    Attempts: {}/{MAX_ATTEMPTS}",
        round.score, round.attempts
    );
}

pub fn display_result(result: &GuessResult) {
    println!("{}", result.message);
}

pub fn display_answer(answer: &str) {
    println!("The word was {answer}.");
}

pub fn display_start_screen() {
    println!("\n=== ANIMAL SCRAMBLE ===");
    println!("Press ENTER to play again, or type 'exit' to quit.");
}

pub fn display_new_game_message() {
    println!("New game started.");
}

pub fn display_exit_message() {
    println!("Exiting.");
}

pub fn display_words(words: &[&str]) {
    for (i, word) in words.iter().enumerate() {
        println!("{:>2}. {}", i + 1, word);
    }
}

/// CLI implementation of the `GameInterface` trait.
/// Wraps a `BufRead` reader so tests can feed scripted input.
pub struct CliInterface<R: BufRead> {
    reader: R,
    redirect_delay: Duration,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self::with_redirect_delay(reader, GAME_OVER_REDIRECT_DELAY)
    }

    pub fn with_redirect_delay(reader: R, redirect_delay: Duration) -> Self {
        Self {
            reader,
            redirect_delay,
        }
    }

    fn wait_for_redirect(&self) {
        let redirect = ScheduledRedirect::schedule(self.redirect_delay);
        let remaining = redirect.remaining_at(Instant::now());
        if !remaining.is_zero() {
            thread::sleep(remaining);
        }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn display_round(&mut self, round: &RoundView<'_>) {
        display_round(round);
    }

    fn read_action(&mut self) -> Option<UserAction> {
        Some(read_action(&mut self.reader))
    }

    fn display_result(&mut self, result: &GuessResult) {
        display_result(result);
    }

    fn finish_session(&mut self, result: &GuessResult, answer: &str) -> UserAction {
        if result.status == Status::GameOver {
            display_answer(answer);
            self.wait_for_redirect();
        }
        display_start_screen();
        match read_action(&mut self.reader) {
            UserAction::Exit => UserAction::Exit,
            UserAction::Restart | UserAction::Guess(_) => UserAction::Restart,
        }
    }

    fn display_new_game_message(&mut self) {
        display_new_game_message();
    }

    fn display_exit_message(&mut self) {
        display_exit_message();
    }
}
