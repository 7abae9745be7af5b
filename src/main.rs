use animal_scramble::cli::{CliInterface, display_words, parse_cli};
use animal_scramble::logging::init_logger;
use animal_scramble::tui::TuiInterface;
use animal_scramble::wordbank::all_words;
use animal_scramble::{AppError, GameSession, game_loop};
use std::io;

fn main() {
    if let Err(e) = run() {
        eprintln!("animal-scramble: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let cli = parse_cli();

    if cli.list_words {
        display_words(all_words());
        return Ok(());
    }

    let log_path = init_logger(!cli.plain)?;
    log::info!(
        "Starting animal-scramble (plain: {}, seed: {:?}, log file: {:?})",
        cli.plain,
        cli.seed,
        log_path
    );

    let mut session = match cli.seed {
        Some(seed) => GameSession::seeded(seed),
        None => GameSession::new(),
    };

    if cli.plain {
        let mut interface = CliInterface::with_redirect_delay(io::stdin().lock(), cli.redirect_delay());
        game_loop(&mut session, &mut interface);
    } else {
        let mut interface = TuiInterface::with_redirect_delay(cli.redirect_delay())?;
        game_loop(&mut session, &mut interface);
        interface.cleanup()?;
    }

    log::info!("Session ended with score {}", session.score());
    Ok(())
}
