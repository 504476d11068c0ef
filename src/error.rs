use std::io;
use thiserror::Error;

/// Errors raised while loading or querying a word bank.
#[derive(Debug, Error)]
pub enum WordBankError {
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("line {line}: word appears before any [Category] header")]
    MissingCategory { line: usize },

    #[error("category '{0}' has no valid words")]
    EmptyCategory(String),

    #[error("category '{0}' is defined more than once")]
    DuplicateCategory(String),

    #[error("word bank contains no categories")]
    Empty,

    #[error("failed to read word bank: {0}")]
    Io(#[from] io::Error),
}

/// Errors raised by the game session for requests it cannot apply.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("'{0}' is not a letter")]
    InvalidLetter(char),

    #[error("the round is already over")]
    RoundOver,

    #[error(transparent)]
    WordBank(#[from] WordBankError),
}
