// Library interface for hangman
// This allows integration tests to access internal modules

pub mod cli;
pub mod error;
pub mod gallows;
pub mod game_state;
pub mod logging;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use error::{GameError, WordBankError};
pub use game_state::{
    GameInterface, GameSession, HintOutcome, MAX_HINTS, MAX_TRIES, Round, RoundOutcome,
    RoundSnapshot, RoundStatus, SessionStats, UserAction, game_loop,
};
pub use wordbank::{WordBank, load_wordbank_from_file, load_wordbank_from_str};
