use hangman::cli::{CliInterface, parse_cli};
use hangman::logging::{LogTarget, default_log_path, init_logging};
use hangman::tui::TuiInterface;
use hangman::{GameSession, WordBank, game_loop, info_log, load_wordbank_from_file};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = parse_cli();

    let log_target = if cli.tui {
        LogTarget::File(default_log_path())
    } else {
        LogTarget::Stderr
    };
    if let Err(e) = init_logging(log_target) {
        eprintln!("Failed to set up logging: {e}");
    }

    let loaded = match &cli.wordbank_path {
        Some(path) => load_wordbank_from_file(path),
        None => WordBank::embedded(),
    };
    let bank = match loaded {
        Ok(bank) => bank,
        Err(e) => {
            let source = cli.wordbank_path.as_deref().unwrap_or("built-in word bank");
            eprintln!("Failed to load word bank from '{source}': {e}");
            return ExitCode::FAILURE;
        }
    };

    if cli.list_categories {
        for name in bank.categories() {
            println!("{name}");
        }
        return ExitCode::SUCCESS;
    }

    let category = cli
        .category
        .clone()
        .unwrap_or_else(|| bank.default_category().to_string());
    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut session = match GameSession::new(bank, &category, rng) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Failed to start game: {e}");
            return ExitCode::FAILURE;
        }
    };

    if cli.tui {
        let mut tui = match TuiInterface::new() {
            Ok(tui) => tui,
            Err(e) => {
                eprintln!("Failed to start terminal interface: {e}");
                return ExitCode::FAILURE;
            }
        };
        game_loop(&mut session, &mut tui);
    } else {
        println!("Welcome to Hangman!");
        let mut interface = CliInterface::new(io::stdin().lock());
        game_loop(&mut session, &mut interface);
    }

    info_log!(
        "Session finished: {} wins, {} losses",
        session.stats().wins,
        session.stats().losses
    );
    ExitCode::SUCCESS
}
