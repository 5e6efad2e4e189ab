//! QUADRIS - a falling-block puzzle for the terminal

mod board;
mod game;
mod input;
mod piece;
mod randomizer;
mod score;
mod settings;
mod shapes;
mod snapshot;
mod tetromino;
mod ui;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use game::{Action, Game, GameState};
use input::InputHandler;
use ratatui::{Terminal, backend::CrosstermBackend};
use settings::Settings;
use std::{
    io::{self, stdout},
    path::PathBuf,
    time::{Duration, Instant},
};
use tracing_subscriber::EnvFilter;

/// Target frame rate
const TARGET_FPS: u64 = 100;
const FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / TARGET_FPS);

/// Get the quadris temp directory, creating it if needed
fn quadris_temp_dir() -> PathBuf {
    let dir = std::env::temp_dir().join("quadris");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

fn main() -> io::Result<()> {
    // Generate session ID for this instance
    let session_id: u32 = rand::random();

    let log_dir = quadris_temp_dir();
    let log_file = format!("{:08x}.log", session_id);

    // The terminal belongs to the UI, so logs go to a file
    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quadris=debug")),
        )
        .with_ansi(false)
        .init();

    tracing::info!(
        "QUADRIS starting up, session={:08x}, log={}",
        session_id,
        log_dir.join(&log_file).display()
    );

    let settings = Settings::load();

    let mut game = match settings.gameplay.seed {
        Some(seed) => Game::with_seed(seed),
        None => Game::new(),
    };
    tracing::info!(seed = game.seed(), "new session");

    // Setup terminal; everything after raw mode runs with restore on exit
    enable_raw_mode()?;
    let result = with_restore(
        || {
            execute!(stdout(), EnterAlternateScreen)?;
            let backend = CrosstermBackend::new(stdout());
            let mut terminal = Terminal::new(backend)?;
            terminal.clear()?;
            run_app(&mut terminal, &mut game, &settings)
        },
        restore_terminal,
    );

    match serde_json::to_string(&game.snapshot()) {
        Ok(json) => tracing::debug!("final snapshot: {}", json),
        Err(e) => tracing::warn!("Could not serialize final snapshot: {}", e),
    }

    match &result {
        Ok(()) => {
            let score = game.score();
            println!("\nThanks for playing QUADRIS!");
            println!("Final Score: {}", score.points);
            println!("Level: {} | Lines: {}", score.level, score.lines);
        }
        Err(e) => tracing::error!("Terminal error: {}", e),
    }

    result
}

/// Leave raw mode and the alternate screen, attempting both
fn restore_terminal() -> io::Result<()> {
    let raw = disable_raw_mode();
    let screen = execute!(stdout(), LeaveAlternateScreen);
    raw.and(screen)
}

/// Run `run`, then always run `restore`. The first error wins.
fn with_restore<T>(
    run: impl FnOnce() -> io::Result<T>,
    restore: impl FnOnce() -> io::Result<()>,
) -> io::Result<T> {
    let result = run();
    let restored = restore();
    let value = result?;
    restored?;
    Ok(value)
}

/// The update loop: draw, take at most one key, apply gravity
fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    game: &mut Game,
    settings: &Settings,
) -> io::Result<()> {
    let input = InputHandler::from_settings(settings);
    let clock = Instant::now();

    loop {
        let snapshot = game.snapshot();
        terminal.draw(|frame| ui::render_game(frame, &snapshot, settings))?;

        if event::poll(FRAME_DURATION)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    // While paused any key resumes, even an unbound one
                    let action = input
                        .key_down(key)
                        .or_else(|| (game.state() == GameState::Paused).then_some(Action::Pause));
                    if let Some(action) = action {
                        game.process_action(action, clock.elapsed());
                    }
                }
            }
        }

        if game.is_terminated() {
            return Ok(());
        }

        game.update(clock.elapsed());
    }
}
