// Library interface for animal-scramble
// This allows integration tests to access internal modules

pub mod cli;
pub mod error;
pub mod game_state;
pub mod logging;
pub mod redirect;
pub mod scrambler;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use error::AppError;
pub use game_state::{
    GameInterface, GameSession, GuessResult, Message, RoundView, Status, UserAction, game_loop,
};
pub use redirect::{GAME_OVER_REDIRECT_DELAY, ScheduledRedirect};
pub use scrambler::scramble;
pub use wordbank::{all_words, random_word};
