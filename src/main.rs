//! BLXST - block puzzle in the terminal
//!
//! Reads one command per line from stdin and prints the board after every
//! move.

use blxst::game::GameSession;
use blxst::generator::Generator;
use blxst::render::{render_board, render_hand};
use blxst::settings::Settings;
use blxst::{PieceId, save};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;

const HELP: &str = "\
commands:
  p <slot> <x> <y>   place hand piece <slot> (1-3) with its top-left at column x, row y
  r                  restart (the high score is kept)
  wipe               delete saved data: session, high score and score table
  h                  show this help
  q                  save and quit";

/// A parsed input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Place { slot: usize, x: i32, y: i32 },
    Restart,
    Wipe,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Err("empty command".to_string());
    };
    let mut number = |what: &str| -> Result<i64, String> {
        let word = words.next().ok_or_else(|| format!("missing {what}"))?;
        word.parse().map_err(|_| format!("{what} must be a number, got {word:?}"))
    };
    match verb {
        "p" | "place" => {
            let slot = number("slot")?;
            let x = number("x")?;
            let y = number("y")?;
            let slot = usize::try_from(slot).map_err(|_| "slot must be positive".to_string())?;
            let x = i32::try_from(x).map_err(|_| "x is out of range".to_string())?;
            let y = i32::try_from(y).map_err(|_| "y is out of range".to_string())?;
            Ok(Command::Place { slot, x, y })
        }
        "r" | "restart" => Ok(Command::Restart),
        "wipe" => Ok(Command::Wipe),
        "h" | "help" | "?" => Ok(Command::Help),
        "q" | "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command {other:?}, try 'h'")),
    }
}

/// Get the blxst temp directory, creating it if needed
fn blxst_temp_dir() -> PathBuf {
    let dir = std::env::temp_dir().join("blxst");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

fn init_logging(settings: &Settings) -> (WorkerGuard, PathBuf) {
    let session_id: u32 = rand::random();
    let dir = blxst_temp_dir();
    let log_file = format!("{:08x}.log", session_id);

    let file_appender = tracing_appender::rolling::never(&dir, &log_file);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    match settings.log.filter.parse() {
        Ok(directive) => filter = filter.add_directive(directive),
        Err(e) => eprintln!("Warning: ignoring log filter {:?}: {}", settings.log.filter, e),
    }

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(filter)
        .with_ansi(false)
        .init();

    (guard, dir.join(log_file))
}

fn new_generator(settings: &Settings) -> Generator {
    match settings.gameplay.seed {
        Some(seed) => Generator::with_seed(seed),
        None => Generator::new(),
    }
}

fn open_session(settings: &Settings) -> GameSession {
    let generator = new_generator(settings);
    let saved = if settings.gameplay.resume {
        save::load()
    } else {
        None
    };
    match saved {
        Some(state) => {
            tracing::info!(score = state.score.points, "resuming saved session");
            GameSession::from_state(state, generator)
        }
        None => GameSession::from_state(Default::default(), generator),
    }
}

fn print_game(out: &mut impl Write, game: &GameSession, settings: &Settings) -> io::Result<()> {
    let score = game.score();
    writeln!(out)?;
    write!(out, "{}", render_board(game.board(), &settings.visual))?;
    writeln!(
        out,
        "score {}   best {}   combo x{}",
        score.points, score.high_score, score.combo
    )?;
    writeln!(out)?;
    write!(out, "{}", render_hand(game.hand(), &settings.visual))?;
    if game.is_game_over() {
        writeln!(out, "\nNo piece fits. Game over with {} points. 'r' to play again.", score.points)?;
    }
    Ok(())
}

fn slot_id(game: &GameSession, slot: usize) -> Option<PieceId> {
    let index = slot.checked_sub(1)?;
    game.hand().pieces().get(index).map(|p| p.id)
}

/// Drop all recorded scores and start a fresh game
fn forget_scores(game: &mut GameSession, settings: &mut Settings) {
    settings.clear_scores();
    game.reset_all();
    game.deal();
}

fn run(game: &mut GameSession, settings: &mut Settings) -> io::Result<()> {
    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    // the score of a finished game is recorded once
    let mut recorded = game.is_game_over();

    print_game(&mut out, game, settings)?;
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }
        if line.trim().is_empty() {
            continue;
        }

        match parse_command(&line) {
            Ok(Command::Place { slot, x, y }) => {
                let Some(id) = slot_id(game, slot) else {
                    writeln!(out, "no piece in slot {slot}")?;
                    continue;
                };
                match game.place_piece(id, x, y) {
                    Ok(placed) => {
                        if placed.lines_cleared > 0 {
                            writeln!(
                                out,
                                "{} line(s)! +{} (combo x{})",
                                placed.lines_cleared, placed.score_delta, placed.combo
                            )?;
                        }
                        if placed.game_over && !recorded {
                            settings.add_score(game.score().points);
                            recorded = true;
                        }
                        print_game(&mut out, game, settings)?;
                    }
                    Err(e) => writeln!(out, "can't place there: {e}")?,
                }
            }
            Ok(Command::Restart) => {
                if !recorded {
                    settings.add_score(game.score().points);
                }
                game.restart();
                game.deal();
                recorded = game.is_game_over();
                print_game(&mut out, game, settings)?;
            }
            Ok(Command::Wipe) => {
                if let Err(e) = save::clear() {
                    tracing::warn!("could not delete saved session: {}", e);
                    writeln!(out, "could not delete saved session: {e}")?;
                }
                forget_scores(game, settings);
                recorded = game.is_game_over();
                writeln!(out, "saved data cleared")?;
                print_game(&mut out, game, settings)?;
            }
            Ok(Command::Help) => writeln!(out, "{HELP}")?,
            Ok(Command::Quit) => return Ok(()),
            Err(e) => writeln!(out, "{e}")?,
        }
    }
}

fn main() -> io::Result<()> {
    let mut settings = Settings::load();
    let (_guard, log_path) = init_logging(&settings);
    tracing::info!("BLXST starting up, log={}", log_path.display());

    let mut game = open_session(&settings);
    println!("BLXST - fill rows and columns to clear them. 'h' for help.");

    let result = run(&mut game, &mut settings);

    // a finished game is not worth resuming; keep only its high score
    if game.is_game_over() {
        game.restart();
    }
    if let Err(e) = save::save(game.state()) {
        tracing::warn!("could not save session: {}", e);
        eprintln!("Warning: Could not save session: {}", e);
    }
    if let Err(e) = settings.save() {
        eprintln!("Warning: Could not save settings: {}", e);
    }

    println!("\nThanks for playing! Best: {}", game.score().high_score);
    result
}
