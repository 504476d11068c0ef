use crate::gallows;
use crate::game_state::{GameInterface, RoundOutcome, RoundSnapshot, RoundStatus, UserAction};
use clap::Parser;
use std::io::BufRead;

/// Hangman in the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a word bank file with [Category] headers and one word per line
    #[arg(short = 'i', long = "input")]
    pub wordbank_path: Option<String>,

    /// Category to start in (defaults to the first one)
    #[arg(short = 'c', long = "category")]
    pub category: Option<String>,

    /// Use the full-screen terminal interface
    #[arg(long)]
    pub tui: bool,

    /// Seed for word selection, for reproducible rounds
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the available categories and exit
    #[arg(long = "list-categories")]
    pub list_categories: bool,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

const HELP_TEXT: &str = "Commands: a letter to guess | hint | new | category <name> | categories | exit";

/// Parse one line of player input. Keywords are case-insensitive; category names are passed on as typed.
#[must_use]
pub fn parse_action(input: &str) -> Option<UserAction> {
    let input = input.trim();
    let lower = input.to_lowercase();

    if let Some((command, rest)) = input.split_once(char::is_whitespace)
        && (command.eq_ignore_ascii_case("category") || command.eq_ignore_ascii_case("cat"))
    {
        let name = rest.trim();
        return (!name.is_empty()).then(|| UserAction::SelectCategory(name.to_string()));
    }

    match lower.as_str() {
        "exit" | "quit" => Some(UserAction::Exit),
        "hint" | "?" => Some(UserAction::Hint),
        "new" | "next" | "restart" => Some(UserAction::NewGame),
        "categories" | "list" => Some(UserAction::ListCategories),
        _ => {
            let mut chars = lower.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_alphabetic() => Some(UserAction::Guess(c)),
                _ => None,
            }
        }
    }
}

/// Prompt for and read one action. End of input or a read error counts as exit.
pub fn read_action<R: BufRead>(reader: &mut R) -> Option<UserAction> {
    println!("\nGuess a letter (or 'hint', 'new', 'category <name>', 'categories', 'exit'):");
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) | Err(_) => return Some(UserAction::Exit),
        Ok(_) => {}
    }

    let action = parse_action(&input);
    if action.is_none() {
        println!("Invalid input. Please enter a single letter.");
        println!("{HELP_TEXT}");
    }
    action
}

fn format_letters(letters: &[char]) -> String {
    if letters.is_empty() {
        return "-".to_string();
    }
    letters
        .iter()
        .map(|c| c.to_ascii_uppercase().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn display_round(snapshot: &RoundSnapshot) {
    println!("\nCategory: {}", snapshot.category);
    for line in gallows::render_ascii(&snapshot.segments) {
        println!("{line}");
    }
    println!("Word: {}", snapshot.masked_word);
    println!("Guessed: {}", format_letters(&snapshot.attempted));
    println!("Missed: {}", format_letters(&snapshot.missed));
    println!(
        "Tries left: {} | Hints left: {}",
        snapshot.tries_remaining, snapshot.hints_remaining
    );
    println!(
        "Wins: {} | Losses: {}",
        snapshot.stats.wins, snapshot.stats.losses
    );
}

#[must_use]
pub fn outcome_message(outcome: &RoundOutcome) -> String {
    let word = outcome.word.to_uppercase();
    match outcome.status {
        RoundStatus::Won => format!("Victory! You guessed the word: {word}!"),
        RoundStatus::Lost => format!("Game over. The word was: {word}"),
        RoundStatus::InProgress => String::new(),
    }
}

/// Line-oriented implementation of the `GameInterface` trait over any `BufRead`.
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn display_categories(&mut self, categories: &[String], current: &str) {
        println!("Categories:");
        for (i, name) in categories.iter().enumerate() {
            let marker = if name == current { " (current)" } else { "" };
            println!("{}. {name}{marker}", i + 1);
        }
    }

    fn display_round(&mut self, snapshot: &RoundSnapshot) {
        display_round(snapshot);
    }

    fn read_action(&mut self) -> Option<UserAction> {
        read_action(&mut self.reader)
    }

    fn display_hint(&mut self, letter: char) {
        println!("Hint: the word contains '{}'.", letter.to_ascii_uppercase());
    }

    fn display_hint_exhausted(&mut self) {
        println!("No hints: you have used all your hints.");
    }

    fn display_outcome(&mut self, outcome: &RoundOutcome) {
        println!("{}", outcome_message(outcome));
        println!(
            "Wins: {} | Losses: {}",
            outcome.stats.wins, outcome.stats.losses
        );
        println!("Starting a new round.");
    }

    fn display_error(&mut self, message: &str) {
        println!("Error: {message}");
    }

    fn display_exit_message(&mut self) {
        println!("Thanks for playing!");
    }
}
