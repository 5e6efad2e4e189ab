//! Active falling piece logic

use crate::board::{BOARD_WIDTH, Board};
use crate::shapes::rotations;
use crate::tetromino::PieceKind;

/// Spawn anchor: horizontally centered, one row above the board so the
/// first gravity step brings the piece fully into view
pub const SPAWN_X: i32 = BOARD_WIDTH as i32 / 2 - 2;
pub const SPAWN_Y: i32 = -1;

/// An active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    /// The type of tetromino
    pub kind: PieceKind,
    /// Index into the kind's rotation states
    pub rotation: usize,
    /// Board position of the local frame's top-left corner
    pub x: i32,
    pub y: i32,
}

impl Piece {
    /// Create a new piece at the spawn position
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: 0,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    /// Number of distinct rotation states for this piece's kind
    pub fn rotation_count(&self) -> usize {
        rotations(self.kind).len()
    }

    /// Local offsets of the current rotation state
    pub fn offsets(&self) -> &'static [(i32, i32)] {
        let states = rotations(self.kind);
        &states[self.rotation % states.len()]
    }

    /// Absolute board positions of all blocks
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + use<> {
        let (px, py) = (self.x, self.y);
        self.offsets()
            .iter()
            .map(move |&(ox, oy)| (px + ox, py + oy))
    }

    /// The piece after a translation and a clockwise rotation by `drot` steps
    pub fn moved(&self, dx: i32, dy: i32, drot: usize) -> Piece {
        Piece {
            kind: self.kind,
            rotation: (self.rotation + drot) % self.rotation_count(),
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Whether the transformed piece fits on the board. All or nothing.
    pub fn can_apply(&self, board: &Board, dx: i32, dy: i32, drot: usize) -> bool {
        self.moved(dx, dy, drot)
            .cells()
            .all(|(x, y)| !board.is_blocked(x, y))
    }

    /// Whether the piece fits where it is
    pub fn fits(&self, board: &Board) -> bool {
        self.can_apply(board, 0, 0, 0)
    }
}
