use crate::scrambler::scramble;
use crate::wordbank::random_word;
use crate::{debug_log, info_log};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;

/// Consecutive failures that end the session.
pub const MAX_ATTEMPTS: u32 = 3;
/// Consecutive successes that win the session.
pub const WINNING_SCORE: u32 = 50;
/// Every this many points a correct guess earns an encouragement.
pub const ENCOURAGEMENT_INTERVAL: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Playing,
    Won,
    GameOver,
}

impl Status {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Playing)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Correct,
    CorrectWithEncouragement,
    Incorrect,
    GameOver,
    Won,
}

impl Message {
    #[must_use]
    pub fn text(self) -> &'static str {
        match self {
            Self::Correct => "Correct!",
            Self::CorrectWithEncouragement => "Correct! Good job, keep going!",
            Self::Incorrect => "Incorrect! Try again.",
            Self::GameOver => "Game over.",
            Self::Won => "Congratulations, you won the game!",
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Outcome of a single [`GameSession::submit_guess`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessResult {
    pub correct: bool,
    pub score_after: u32,
    pub attempts_after: u32,
    pub status: Status,
    pub message: Message,
    /// The scrambled word of the round that was started by this guess.
    /// `None` when the guess ended the session.
    pub next_puzzle: Option<String>,
}

/// One game of Animal Scramble.
///
/// Holds the current answer and both streak counters. All mutation goes
/// through [`new_round`](Self::new_round), [`submit_guess`](Self::submit_guess)
/// and [`reset`](Self::reset); none of them can fail.
#[derive(Debug)]
pub struct GameSession<R: Rng = StdRng> {
    rng: R,
    current_answer: &'static str,
    puzzle: String,
    score: u32,
    attempts: u32,
    status: Status,
}

impl GameSession<StdRng> {
    /// Session seeded from the operating system's entropy source.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Session with a reproducible word and shuffle sequence.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for GameSession<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> GameSession<R> {
    /// Creates a session in `Playing` with its first round already drawn.
    pub fn with_rng(rng: R) -> Self {
        let mut session = Self {
            rng,
            current_answer: "",
            puzzle: String::new(),
            score: 0,
            attempts: 0,
            status: Status::Playing,
        };
        session.draw_round();
        session
    }

    /// Starts a new round and returns its scrambled word.
    ///
    /// Counters are left untouched. Once the session is `Won` or `GameOver`
    /// this does nothing and returns the last puzzle; call [`reset`](Self::reset)
    /// to play again.
    pub fn new_round(&mut self) -> String {
        if self.status.is_terminal() {
            debug_log!("new_round() - ignored in terminal state {:?}", self.status);
            return self.puzzle.clone();
        }
        self.draw_round();
        self.puzzle.clone()
    }

    /// Resolves the current round against `text`.
    ///
    /// Matching is case-insensitive; any other text, including an empty
    /// string, is a miss. In a terminal state the session is left unchanged
    /// and the result repeats the final status.
    pub fn submit_guess(&mut self, text: &str) -> GuessResult {
        if self.status.is_terminal() {
            debug_log!("submit_guess() - ignored in terminal state {:?}", self.status);
            return self.result(false, self.terminal_message(), None);
        }

        let correct = text.to_uppercase() == self.current_answer;
        info_log!(
            "submit_guess() - guess '{}' for '{}' is {}",
            text,
            self.current_answer,
            if correct { "correct" } else { "incorrect" }
        );

        let message = if correct {
            self.score += 1;
            self.attempts = 0;
            if self.score >= WINNING_SCORE {
                self.status = Status::Won;
                Message::Won
            } else if self.score % ENCOURAGEMENT_INTERVAL == 0 {
                Message::CorrectWithEncouragement
            } else {
                Message::Correct
            }
        } else {
            self.attempts += 1;
            self.score = 0;
            if self.attempts >= MAX_ATTEMPTS {
                self.status = Status::GameOver;
                Message::GameOver
            } else {
                Message::Incorrect
            }
        };

        let next_puzzle = if self.status.is_terminal() {
            info_log!("submit_guess() - session finished: {:?}", self.status);
            None
        } else {
            Some(self.new_round())
        };

        self.result(correct, message, next_puzzle)
    }

    /// Zeroes both counters, returns to `Playing` and starts a fresh round.
    pub fn reset(&mut self) -> String {
        info_log!("reset() - restarting session from {:?}", self.status);
        self.score = 0;
        self.attempts = 0;
        self.status = Status::Playing;
        self.new_round()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Scrambled form of the current round.
    #[must_use]
    pub fn puzzle(&self) -> &str {
        &self.puzzle
    }

    /// The word the player has to reproduce this round.
    #[must_use]
    pub fn answer(&self) -> &'static str {
        self.current_answer
    }

    fn draw_round(&mut self) {
        self.current_answer = random_word(&mut self.rng);
        self.puzzle = scramble(self.current_answer, &mut self.rng);
        debug_log!(
            "draw_round() - answer '{}', puzzle '{}'",
            self.current_answer,
            self.puzzle
        );
    }

    fn terminal_message(&self) -> Message {
        match self.status {
            Status::Won => Message::Won,
            Status::GameOver | Status::Playing => Message::GameOver,
        }
    }

    fn result(&self, correct: bool, message: Message, next_puzzle: Option<String>) -> GuessResult {
        GuessResult {
            correct,
            score_after: self.score,
            attempts_after: self.attempts,
            status: self.status,
            message,
            next_puzzle,
        }
    }
}

// UI seam

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Guess(String),
    Restart,
    Exit,
}

/// What a front-end needs to draw a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundView<'a> {
    pub puzzle: &'a str,
    pub score: u32,
    pub attempts: u32,
}

/// Implemented by every front-end driven by [`game_loop`].
pub trait GameInterface {
    fn display_round(&mut self, round: &RoundView<'_>);
    /// Returns `None` when nothing actionable was entered.
    fn read_action(&mut self) -> Option<UserAction>;
    fn display_result(&mut self, result: &GuessResult);
    /// Called once the session reached `Won` or `GameOver`. Blocks until the
    /// player either restarts or leaves; anything else is `Restart`.
    fn finish_session(&mut self, result: &GuessResult, answer: &str) -> UserAction;
    fn display_new_game_message(&mut self);
    fn display_exit_message(&mut self);
}

/// Plays `session` through `interface` until the player exits.
pub fn game_loop<R: Rng, I: GameInterface>(session: &mut GameSession<R>, interface: &mut I) {
    loop {
        interface.display_round(&RoundView {
            puzzle: session.puzzle(),
            score: session.score(),
            attempts: session.attempts(),
        });

        let action = match interface.read_action() {
            Some(action) => action,
            None => continue,
        };

        let guess = match action {
            UserAction::Exit => {
                interface.display_exit_message();
                break;
            }
            UserAction::Restart => {
                session.reset();
                interface.display_new_game_message();
                continue;
            }
            UserAction::Guess(guess) => guess,
        };

        let answer = session.answer();
        let result = session.submit_guess(&guess);
        interface.display_result(&result);

        if result.status.is_terminal() {
            match interface.finish_session(&result, answer) {
                UserAction::Exit => {
                    interface.display_exit_message();
                    break;
                }
                UserAction::Restart | UserAction::Guess(_) => {
                    session.reset();
                    interface.display_new_game_message();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with(score: u32, attempts: u32) -> GameSession {
        let mut session = GameSession::seeded(99);
        session.score = score;
        session.attempts = attempts;
        session
    }

    fn wrong_guess(session: &GameSession) -> String {
        format!("{}X", session.answer())
    }

    #[test]
    fn test_new_session_is_playing_with_a_round() {
        let session = GameSession::seeded(1);
        assert_eq!(session.status(), Status::Playing);
        assert_eq!(session.score(), 0);
        assert_eq!(session.attempts(), 0);
        assert_eq!(session.puzzle().len(), session.answer().len());
    }

    #[test]
    fn test_correct_guess_increments_score_and_starts_round() {
        let mut session = GameSession::seeded(2);
        let answer = session.answer();
        let result = session.submit_guess(answer);
        assert!(result.correct);
        assert_eq!(result.score_after, 1);
        assert_eq!(result.attempts_after, 0);
        assert_eq!(result.status, Status::Playing);
        assert_eq!(result.message, Message::Correct);
        assert_eq!(result.next_puzzle.as_deref(), Some(session.puzzle()));
    }

    #[test]
    fn test_guess_is_case_insensitive() {
        let mut upper = GameSession::seeded(3);
        let mut lower = GameSession::seeded(3);
        let answer = upper.answer();
        assert_eq!(
            upper.submit_guess(answer),
            lower.submit_guess(&answer.to_lowercase())
        );
    }

    #[test]
    fn test_correct_guess_clears_attempts() {
        for prior in 0..MAX_ATTEMPTS {
            let mut session = session_with(0, prior);
            let answer = session.answer();
            let result = session.submit_guess(answer);
            assert_eq!(result.attempts_after, 0, "prior attempts {prior}");
        }
    }

    #[test]
    fn test_incorrect_guess_clears_score() {
        for prior in [0, 1, 4, 30, 49] {
            let mut session = session_with(prior, 0);
            let guess = wrong_guess(&session);
            let result = session.submit_guess(&guess);
            assert!(!result.correct);
            assert_eq!(result.score_after, 0, "prior score {prior}");
            assert_eq!(result.attempts_after, 1);
            assert_eq!(result.message, Message::Incorrect);
            assert!(result.next_puzzle.is_some());
        }
    }

    #[test]
    fn test_empty_guess_is_a_miss() {
        let mut session = GameSession::seeded(4);
        let result = session.submit_guess("");
        assert!(!result.correct);
        assert_eq!(result.attempts_after, 1);
    }

    #[test]
    fn test_encouragement_every_five_points() {
        let mut session = GameSession::seeded(5);
        for expected_score in 1..=20 {
            let answer = session.answer();
            let result = session.submit_guess(answer);
            assert_eq!(result.score_after, expected_score);
            let expected = if expected_score % 5 == 0 {
                Message::CorrectWithEncouragement
            } else {
                Message::Correct
            };
            assert_eq!(result.message, expected, "score {expected_score}");
        }
    }

    #[test]
    fn test_fiftieth_point_wins_without_new_round() {
        let mut session = session_with(49, 0);
        let puzzle_before = session.puzzle().to_string();
        let answer = session.answer();
        let result = session.submit_guess(answer);
        assert_eq!(result.status, Status::Won);
        assert_eq!(result.score_after, 50);
        assert_eq!(result.message, Message::Won);
        assert_eq!(result.next_puzzle, None);
        assert_eq!(session.puzzle(), puzzle_before);
        assert_eq!(session.answer(), answer);
    }

    #[test]
    fn test_third_miss_is_game_over_without_new_round() {
        let mut session = session_with(7, 2);
        let answer = session.answer();
        let guess = wrong_guess(&session);
        let result = session.submit_guess(&guess);
        assert_eq!(result.status, Status::GameOver);
        assert_eq!(result.attempts_after, 3);
        assert_eq!(result.score_after, 0);
        assert_eq!(result.message, Message::GameOver);
        assert_eq!(result.next_puzzle, None);
        assert_eq!(session.answer(), answer);
    }

    #[test]
    fn test_three_misses_from_fresh_session() {
        let mut session = GameSession::seeded(6);
        let statuses: Vec<Status> = (0..3)
            .map(|_| session.submit_guess("").status)
            .collect();
        assert_eq!(
            statuses,
            vec![Status::Playing, Status::Playing, Status::GameOver]
        );
    }

    #[test]
    fn test_terminal_session_ignores_guesses_and_rounds() {
        let mut session = session_with(0, 2);
        session.submit_guess("");
        let answer = session.answer();
        let puzzle = session.puzzle().to_string();

        let result = session.submit_guess(answer);
        assert!(!result.correct);
        assert_eq!(result.status, Status::GameOver);
        assert_eq!(result.attempts_after, 3);
        assert_eq!(result.message, Message::GameOver);

        assert_eq!(session.new_round(), puzzle);
        assert_eq!(session.answer(), answer);
    }

    #[test]
    fn test_reset_from_game_over() {
        let mut session = session_with(0, 2);
        session.submit_guess("");
        let puzzle = session.reset();
        assert_eq!(session.status(), Status::Playing);
        assert_eq!(session.score(), 0);
        assert_eq!(session.attempts(), 0);
        assert_eq!(puzzle, session.puzzle());
    }

    #[test]
    fn test_reset_from_won() {
        let mut session = session_with(49, 0);
        let answer = session.answer();
        session.submit_guess(answer);
        assert_eq!(session.status(), Status::Won);
        session.reset();
        assert_eq!(session.status(), Status::Playing);
        assert_eq!(session.score(), 0);
        assert_eq!(session.attempts(), 0);
    }

    #[test]
    fn test_new_round_keeps_counters() {
        let mut session = session_with(3, 1);
        session.new_round();
        assert_eq!(session.score(), 3);
        assert_eq!(session.attempts(), 1);
    }

    #[test]
    fn test_message_text() {
        assert_eq!(Message::Correct.to_string(), "Correct!");
        assert_eq!(
            Message::CorrectWithEncouragement.to_string(),
            "Correct! Good job, keep going!"
        );
        assert_eq!(Message::Incorrect.to_string(), "Incorrect! Try again.");
        assert_eq!(Message::GameOver.to_string(), "Game over.");
    }

    /// Replays a fixed list of actions and records what the loop showed.
    struct ScriptedInterface {
        actions: Vec<UserAction>,
        after_finish: UserAction,
        rounds: Vec<(String, u32, u32)>,
        results: Vec<GuessResult>,
        finished_with: Vec<String>,
        new_games: usize,
        exited: bool,
    }

    impl ScriptedInterface {
        fn new(mut actions: Vec<UserAction>, after_finish: UserAction) -> Self {
            actions.reverse();
            Self {
                actions,
                after_finish,
                rounds: Vec::new(),
                results: Vec::new(),
                finished_with: Vec::new(),
                new_games: 0,
                exited: false,
            }
        }
    }

    impl GameInterface for ScriptedInterface {
        fn display_round(&mut self, round: &RoundView<'_>) {
            self.rounds
                .push((round.puzzle.to_string(), round.score, round.attempts));
        }

        fn read_action(&mut self) -> Option<UserAction> {
            Some(self.actions.pop().unwrap_or(UserAction::Exit))
        }

        fn display_result(&mut self, result: &GuessResult) {
            self.results.push(result.clone());
        }

        fn finish_session(&mut self, _result: &GuessResult, answer: &str) -> UserAction {
            self.finished_with.push(answer.to_string());
            self.after_finish.clone()
        }

        fn display_new_game_message(&mut self) {
            self.new_games += 1;
        }

        fn display_exit_message(&mut self) {
            self.exited = true;
        }
    }

    #[test]
    fn test_game_loop_immediate_exit() {
        let mut session = GameSession::seeded(10);
        let mut ui = ScriptedInterface::new(vec![UserAction::Exit], UserAction::Exit);
        game_loop(&mut session, &mut ui);
        assert!(ui.exited);
        assert_eq!(ui.rounds.len(), 1);
        assert!(ui.results.is_empty());
    }

    #[test]
    fn test_game_loop_game_over_then_exit() {
        let mut session = GameSession::seeded(11);
        let guesses = vec![UserAction::Guess(String::new()); 3];
        let mut ui = ScriptedInterface::new(guesses, UserAction::Exit);
        game_loop(&mut session, &mut ui);

        assert_eq!(ui.results.len(), 3);
        assert_eq!(ui.results[2].status, Status::GameOver);
        assert_eq!(ui.finished_with, vec![session.answer().to_string()]);
        assert_eq!(ui.rounds[1].2, 1);
        assert_eq!(ui.rounds[2].2, 2);
        assert!(ui.exited);
        assert_eq!(session.status(), Status::GameOver);
    }

    #[test]
    fn test_game_loop_game_over_then_restart() {
        let mut session = GameSession::seeded(12);
        let mut actions = vec![UserAction::Guess("nope".to_string()); 3];
        actions.push(UserAction::Exit);
        let mut ui = ScriptedInterface::new(actions, UserAction::Restart);
        game_loop(&mut session, &mut ui);

        assert_eq!(ui.new_games, 1);
        assert_eq!(session.status(), Status::Playing);
        assert_eq!(session.attempts(), 0);
        assert_eq!(ui.rounds.last().map(|r| r.2), Some(0));
    }

    #[test]
    fn test_game_loop_restart_action_resets_counters() {
        let mut session = GameSession::seeded(13);
        let actions = vec![
            UserAction::Guess(String::new()),
            UserAction::Restart,
            UserAction::Exit,
        ];
        let mut ui = ScriptedInterface::new(actions, UserAction::Exit);
        game_loop(&mut session, &mut ui);

        assert_eq!(ui.new_games, 1);
        assert_eq!(ui.rounds[1].2, 1);
        assert_eq!(ui.rounds[2].2, 0);
    }
}
