use crate::error::{GameError, WordBankError};
use crate::gallows::{self, Segment};
use crate::wordbank::WordBank;
use crate::{debug_log, info_log};
use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::BTreeSet;

pub const MAX_TRIES: u8 = 6;
pub const MAX_HINTS: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    InProgress,
    Won,
    Lost,
}

impl RoundStatus {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintOutcome {
    Revealed { letter: char, status: RoundStatus },
    Exhausted,
}

/// State of a single round, from word selection to Won/Lost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    secret: String,
    guessed: BTreeSet<char>,
    tries_remaining: u8,
    hints_remaining: u8,
}

impl Round {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into().to_lowercase(),
            guessed: BTreeSet::new(),
            tries_remaining: MAX_TRIES,
            hints_remaining: MAX_HINTS,
        }
    }

    #[must_use]
    pub fn secret_word(&self) -> &str {
        &self.secret
    }

    #[must_use]
    pub fn guessed_letters(&self) -> &BTreeSet<char> {
        &self.guessed
    }

    #[must_use]
    pub fn tries_remaining(&self) -> u8 {
        self.tries_remaining
    }

    #[must_use]
    pub fn hints_remaining(&self) -> u8 {
        self.hints_remaining
    }

    /// Won is checked before Lost.
    #[must_use]
    pub fn status(&self) -> RoundStatus {
        if self.secret.chars().all(|c| self.guessed.contains(&c)) {
            RoundStatus::Won
        } else if self.tries_remaining == 0 {
            RoundStatus::Lost
        } else {
            RoundStatus::InProgress
        }
    }

    /// Reveal `letter`. A letter that was already revealed changes nothing.
    pub fn guess(&mut self, letter: char) -> Result<RoundStatus, GameError> {
        if !letter.is_ascii_alphabetic() {
            return Err(GameError::InvalidLetter(letter));
        }
        if self.status().is_terminal() {
            return Err(GameError::RoundOver);
        }

        let letter = letter.to_ascii_lowercase();
        if !self.guessed.insert(letter) {
            debug_log!("Round::guess() - '{}' already revealed, ignoring", letter);
            return Ok(self.status());
        }
        if !self.secret.contains(letter) {
            self.tries_remaining = self.tries_remaining.saturating_sub(1);
            debug_log!(
                "Round::guess() - miss on '{}', {} tries left",
                letter,
                self.tries_remaining
            );
        }
        Ok(self.status())
    }

    /// Reveal the first unrevealed letter of the secret word, in word order.
    ///
    /// With no hints left this reports `Exhausted` and changes nothing,
    /// even if the round is already over.
    pub fn hint(&mut self) -> Result<HintOutcome, GameError> {
        if self.hints_remaining == 0 {
            return Ok(HintOutcome::Exhausted);
        }
        if self.status().is_terminal() {
            return Err(GameError::RoundOver);
        }

        // A non-terminal round always has an unrevealed letter.
        let Some(letter) = self.secret.chars().find(|c| !self.guessed.contains(c)) else {
            return Err(GameError::RoundOver);
        };
        self.guessed.insert(letter);
        self.hints_remaining -= 1;
        debug_log!(
            "Round::hint() - revealed '{}', {} hints left",
            letter,
            self.hints_remaining
        );
        Ok(HintOutcome::Revealed {
            letter,
            status: self.status(),
        })
    }

    /// Each position shows its letter if revealed, `_` otherwise, separated by spaces.
    #[must_use]
    pub fn masked_word(&self) -> String {
        self.secret
            .chars()
            .map(|c| if self.guessed.contains(&c) { c } else { '_' })
            .map(String::from)
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[must_use]
    pub fn missed_letters(&self) -> Vec<char> {
        self.guessed
            .iter()
            .copied()
            .filter(|c| !self.secret.contains(*c))
            .collect()
    }
}

/// Cumulative results for the lifetime of one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub wins: u32,
    pub losses: u32,
}

impl SessionStats {
    pub fn record(&mut self, status: RoundStatus) {
        match status {
            RoundStatus::Won => self.wins += 1,
            RoundStatus::Lost => self.losses += 1,
            RoundStatus::InProgress => {}
        }
    }
}

/// Everything a presentation layer needs to draw the current round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSnapshot {
    pub category: String,
    pub masked_word: String,
    pub attempted: Vec<char>,
    pub missed: Vec<char>,
    pub tries_remaining: u8,
    pub hints_remaining: u8,
    pub stats: SessionStats,
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundOutcome {
    pub status: RoundStatus,
    pub word: String,
    pub stats: SessionStats,
    /// The finished round as it stood on the last reveal.
    pub final_round: RoundSnapshot,
}

/// A word bank, the current round and the running score.
pub struct GameSession<R: Rng = StdRng> {
    bank: WordBank,
    rng: R,
    stats: SessionStats,
    category: String,
    round: Round,
}

impl<R: Rng> GameSession<R> {
    /// Create a session and start its first round in `category`.
    pub fn new(bank: WordBank, category: &str, rng: R) -> Result<Self, GameError> {
        let mut session = Self {
            bank,
            rng,
            stats: SessionStats::default(),
            category: String::new(),
            round: Round::new(""),
        };
        session.start_round(category)?;
        Ok(session)
    }

    /// Replace the round with a random word from `category`.
    pub fn start_round(&mut self, category: &str) -> Result<(), GameError> {
        let words = self.bank.words_for(category)?;
        let word = words
            .choose(&mut self.rng)
            .ok_or_else(|| WordBankError::EmptyCategory(category.to_string()))?;
        self.round = Round::new(word.as_str());
        if let Some(name) = self.bank.resolve(category) {
            self.category = name.to_string();
        }
        info_log!(
            "New round in '{}' ({} letters)",
            self.category,
            self.round.secret_word().len()
        );
        Ok(())
    }

    /// Start a new round in the current category.
    pub fn restart(&mut self) -> Result<(), GameError> {
        let category = self.category.clone();
        self.start_round(&category)
    }

    pub fn guess_letter(&mut self, letter: char) -> Result<RoundStatus, GameError> {
        let status = self.round.guess(letter)?;
        self.stats.record(status);
        Ok(status)
    }

    pub fn use_hint(&mut self) -> Result<HintOutcome, GameError> {
        let outcome = self.round.hint()?;
        if let HintOutcome::Revealed { status, .. } = outcome {
            self.stats.record(status);
        }
        Ok(outcome)
    }

    #[must_use]
    pub fn snapshot(&self) -> RoundSnapshot {
        let round = &self.round;
        RoundSnapshot {
            category: self.category.clone(),
            masked_word: round.masked_word(),
            attempted: round.guessed_letters().iter().copied().collect(),
            missed: round.missed_letters(),
            tries_remaining: round.tries_remaining(),
            hints_remaining: round.hints_remaining(),
            stats: self.stats,
            segments: gallows::visible_segments(round.tries_remaining()),
        }
    }

    #[must_use]
    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn round(&self) -> &Round {
        &self.round
    }

    #[must_use]
    pub fn word_bank(&self) -> &WordBank {
        &self.bank
    }
}

/// Requests delivered by a presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Guess(char),
    Hint,
    NewGame,
    SelectCategory(String),
    ListCategories,
    Exit,
}

/// Presentation layer driven by [`game_loop`].
pub trait GameInterface {
    fn display_categories(&mut self, categories: &[String], current: &str);
    fn display_round(&mut self, snapshot: &RoundSnapshot);
    /// `None` means the input was not understood and the caller should ask again.
    fn read_action(&mut self) -> Option<UserAction>;
    fn display_hint(&mut self, letter: char);
    fn display_hint_exhausted(&mut self);
    fn display_outcome(&mut self, outcome: &RoundOutcome);
    fn display_error(&mut self, message: &str);
    fn display_exit_message(&mut self);
}

pub fn game_loop<R: Rng, I: GameInterface + ?Sized>(
    session: &mut GameSession<R>,
    interface: &mut I,
) {
    display_categories(session, interface);

    loop {
        interface.display_round(&session.snapshot());

        let Some(action) = interface.read_action() else {
            continue;
        };
        debug_log!("game_loop() - action: {:?}", action);

        match action {
            UserAction::Exit => {
                interface.display_exit_message();
                break;
            }
            UserAction::NewGame => {
                if let Err(e) = session.restart() {
                    interface.display_error(&e.to_string());
                }
            }
            UserAction::SelectCategory(name) => {
                if let Err(e) = session.start_round(&name) {
                    interface.display_error(&e.to_string());
                }
            }
            UserAction::ListCategories => display_categories(session, interface),
            UserAction::Guess(letter) => match session.guess_letter(letter) {
                Ok(status) => finish_if_over(session, interface, status),
                Err(e) => interface.display_error(&e.to_string()),
            },
            UserAction::Hint => match session.use_hint() {
                Ok(HintOutcome::Exhausted) => interface.display_hint_exhausted(),
                Ok(HintOutcome::Revealed { letter, status }) => {
                    interface.display_hint(letter);
                    finish_if_over(session, interface, status);
                }
                Err(e) => interface.display_error(&e.to_string()),
            },
        }
    }
}

fn display_categories<R: Rng, I: GameInterface + ?Sized>(
    session: &GameSession<R>,
    interface: &mut I,
) {
    let categories: Vec<String> = session
        .word_bank()
        .categories()
        .map(str::to_string)
        .collect();
    interface.display_categories(&categories, session.category());
}

/// Report a finished round and replace it with a fresh one.
fn finish_if_over<R: Rng, I: GameInterface + ?Sized>(
    session: &mut GameSession<R>,
    interface: &mut I,
    status: RoundStatus,
) {
    if !status.is_terminal() {
        return;
    }

    let outcome = RoundOutcome {
        status,
        word: session.round().secret_word().to_string(),
        stats: session.stats(),
        final_round: session.snapshot(),
    };
    info_log!(
        "Round over: {:?} '{}' (wins {}, losses {})",
        outcome.status,
        outcome.word,
        outcome.stats.wins,
        outcome.stats.losses
    );
    interface.display_outcome(&outcome);

    if let Err(e) = session.restart() {
        interface.display_error(&e.to_string());
    }
}
