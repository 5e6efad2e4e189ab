//! Core game state and logic
//!
//! A session never reads the clock itself. Every entry point takes `now`, the
//! time elapsed since some fixed origin chosen by the caller, which keeps
//! gravity deterministic under test.

use crate::board::Board;
use crate::piece::Piece;
use crate::randomizer::Randomizer;
use crate::score::Score;
use crate::snapshot::{ActiveView, Snapshot};
use crate::tetromino::PieceKind;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

/// Game state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameState {
    Playing,
    Paused,
    GameOver,
}

/// Input actions the game can process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    RotateCW,
    SoftDrop,
    HardDrop,
    /// Pause while playing, resume while paused
    Pause,
    Restart,
    Quit,
}

/// The main game struct
#[derive(Debug, Clone)]
pub struct Game {
    /// The game board
    board: Board,
    /// Current falling piece
    current: Piece,
    /// Kind that spawns after the current piece locks
    next: PieceKind,
    /// Piece randomizer
    randomizer: Randomizer,
    /// Score tracking
    score: Score,
    /// Current game state
    state: GameState,
    /// Time of the last gravity step
    last_fall: Duration,
    /// Set once Quit is received
    terminated: bool,
}

impl Game {
    /// Create a new game with a random seed
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Create a new game whose piece sequence is fixed by `seed`
    pub fn with_seed(seed: u64) -> Self {
        let mut randomizer = Randomizer::with_seed(seed);
        let current = Piece::spawn(randomizer.next());
        let next = randomizer.next();

        Self {
            board: Board::new(),
            current,
            next,
            randomizer,
            score: Score::new(),
            state: GameState::Playing,
            last_fall: Duration::ZERO,
            terminated: false,
        }
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn seed(&self) -> u64 {
        self.randomizer.seed()
    }

    /// Whether Quit has been received. No further updates happen.
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Process an action
    pub fn process_action(&mut self, action: Action, now: Duration) {
        if self.terminated {
            return;
        }
        if action == Action::Quit {
            info!(score = self.score.points, "quit");
            self.terminated = true;
            return;
        }

        match self.state {
            GameState::Paused => {
                // Any key resumes; time spent paused must not count toward gravity
                debug!("resumed");
                self.state = GameState::Playing;
                self.last_fall = now;
            }
            GameState::GameOver => {
                if action == Action::Restart {
                    self.restart(now);
                }
            }
            GameState::Playing => match action {
                Action::MoveLeft => {
                    self.try_move(-1, 0, 0);
                }
                Action::MoveRight => {
                    self.try_move(1, 0, 0);
                }
                Action::RotateCW => {
                    self.try_move(0, 0, 1);
                }
                Action::SoftDrop => self.soft_drop(),
                Action::HardDrop => self.hard_drop(now),
                Action::Pause => {
                    debug!("paused");
                    self.state = GameState::Paused;
                }
                Action::Restart | Action::Quit => {}
            },
        }
    }

    /// Apply gravity if the current interval has elapsed (call every frame)
    pub fn update(&mut self, now: Duration) {
        if self.terminated || self.state != GameState::Playing {
            return;
        }

        if now.saturating_sub(self.last_fall) < self.score.gravity {
            return;
        }

        self.last_fall = now;
        if !self.try_move(0, 1, 0) {
            self.lock_piece(now);
        }
    }

    /// Commit a transform if it is legal
    fn try_move(&mut self, dx: i32, dy: i32, drot: usize) -> bool {
        if self.current.can_apply(&self.board, dx, dy, drot) {
            self.current = self.current.moved(dx, dy, drot);
            true
        } else {
            false
        }
    }

    /// Move down one row for a point. Never locks.
    fn soft_drop(&mut self) {
        if self.try_move(0, 1, 0) {
            self.score.add_soft_drop(1);
        }
    }

    fn hard_drop(&mut self, now: Duration) {
        let mut distance = 0;
        while self.try_move(0, 1, 0) {
            distance += 1;
        }
        self.score.add_hard_drop(distance);
        self.lock_piece(now);
    }

    /// Lock the current piece, resolve line clears and spawn the next piece
    fn lock_piece(&mut self, now: Duration) {
        self.board.lock(&self.current);

        let cleared = self.board.clear_full_rows();
        if cleared > 0 {
            debug!(cleared, total = self.score.lines + cleared as u32, "lines cleared");
            if self.score.add_clear(cleared) {
                info!(
                    level = self.score.level,
                    gravity_ms = self.score.gravity.as_millis() as u64,
                    "level up"
                );
            }
        }

        self.current = Piece::spawn(self.next);
        self.next = self.randomizer.next();
        self.last_fall = now;
        debug!(kind = ?self.current.kind, next = ?self.next, "spawned");

        if !self.current.fits(&self.board) {
            info!(
                score = self.score.points,
                level = self.score.level,
                lines = self.score.lines,
                "game over"
            );
            self.state = GameState::GameOver;
        }
    }

    /// Start over with an empty board, keeping the piece stream
    fn restart(&mut self, now: Duration) {
        info!("restart");
        self.board = Board::new();
        self.current = Piece::spawn(self.randomizer.next());
        self.next = self.randomizer.next();
        self.score = Score::new();
        self.state = GameState::Playing;
        self.last_fall = now;
    }

    /// Read-only view for rendering
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board.tags(),
            active: ActiveView::from(&self.current),
            next: self.next,
            score: self.score.points,
            level: self.score.level,
            lines: self.score.lines,
            state: self.state,
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
