//! Headless demo: plays one game with random inputs on a simulated clock
//! and prints the final board.
//!
//! Usage: blockfall [CONFIG_PATH]

use anyhow::{Context, Result};
use blockfall::{Action, Config, Game, GameState, TextRenderer, render_grid};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Upper bound on timer ticks for one demo game
const MAX_TICKS: u32 = 50_000;

/// Get the log directory, creating it if needed
fn log_dir() -> Result<PathBuf> {
    let dir = std::env::temp_dir().join("blockfall");
    std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
    Ok(dir)
}

fn load_config() -> Result<Config> {
    match std::env::args().nth(1) {
        Some(path) => Config::load_from(Path::new(&path)).with_context(|| format!("loading config {path}")),
        None => Ok(Config::load()),
    }
}

/// Pick an input for the autoplayer. Left and right are equally likely so the
/// stack spreads instead of piling up at the spawn column.
fn random_action(rng: &mut ChaCha8Rng) -> Option<Action> {
    match rng.gen_range(0..8) {
        0 | 1 => Some(Action::MoveLeft),
        2 | 3 => Some(Action::MoveRight),
        4 => Some(Action::Rotate),
        5 => Some(Action::SoftDrop),
        _ => None,
    }
}

fn main() -> Result<()> {
    let session_id: u32 = rand::random();
    let dir = log_dir()?;
    let log_file = format!("{:08x}.log", session_id);

    // Setup tracing to log file
    let file_appender = tracing_appender::rolling::never(&dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(EnvFilter::from_default_env().add_directive("blockfall=debug".parse()?))
        .with_ansi(false)
        .init();

    tracing::info!("blockfall demo starting, session={:08x}, log={}", session_id, dir.join(&log_file).display());

    let config = load_config()?;
    config.validate().context("config rejected")?;
    let style = config.render.block_style;
    let mut rng = match config.randomizer.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let mut game = Game::from_config(&config);
    let renderer = Rc::new(RefCell::new(TextRenderer::new(config.board.rows, config.board.cols, style)));
    game.subscribe_board(Rc::clone(&renderer));

    let mut now = Instant::now();
    game.start(now);
    let mut ticks = 0;
    while game.state() == GameState::Running && ticks < MAX_TICKS {
        if let Some(action) = random_action(&mut rng) {
            game.process_action(action, now);
        }
        now += game.interval();
        game.update(now);
        ticks += 1;
    }

    if game.state() != GameState::GameOver {
        tracing::warn!("stopped after {} ticks without reaching game over", ticks);
    }

    let renderer = renderer.borrow();
    println!("{}", renderer.render());
    if game.state() == GameState::GameOver {
        println!("Game over after {} ticks", ticks);
    } else {
        println!("Next:\n{}", render_grid(game.preview(), style));
    }
    println!("Score: {}", game.score().points);
    println!("Rows: {}", game.score().lines);
    println!("Pieces locked: {}", renderer.locks());

    Ok(())
}
