//! Read-only views of a session for rendering and logging

use crate::board::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::game::GameState;
use crate::piece::Piece;
use crate::tetromino::PieceKind;
use serde::Serialize;

/// The piece under player control
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveView {
    pub kind: PieceKind,
    pub rotation: usize,
    /// Board position of the piece's local frame
    pub anchor: (i32, i32),
    /// Absolute (x, y) of every block, including blocks above the board
    pub cells: Vec<(i32, i32)>,
}

impl From<&Piece> for ActiveView {
    fn from(piece: &Piece) -> Self {
        Self {
            kind: piece.kind,
            rotation: piece.rotation,
            anchor: (piece.x, piece.y),
            cells: piece.cells().collect(),
        }
    }
}

/// Everything a front-end needs to draw one frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Color tags by [y][x], 0 where empty
    pub board: [[u8; BOARD_WIDTH]; BOARD_HEIGHT],
    pub active: ActiveView,
    pub next: PieceKind,
    pub score: u64,
    pub level: u32,
    pub lines: u32,
    pub state: GameState,
}

impl Snapshot {
    /// Kind of the active piece if it covers (x, y)
    pub fn active_at(&self, x: i32, y: i32) -> Option<PieceKind> {
        self.active
            .cells
            .contains(&(x, y))
            .then_some(self.active.kind)
    }

    /// Kind locked at (x, y), if any
    pub fn locked_at(&self, x: usize, y: usize) -> Option<PieceKind> {
        self.board
            .get(y)
            .and_then(|row| row.get(x))
            .and_then(|&tag| PieceKind::from_color_tag(tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Game;

    #[test]
    fn test_snapshot_of_new_game() {
        let game = Game::with_seed(3);
        let snapshot = game.snapshot();

        assert_eq!(snapshot.board, [[0; BOARD_WIDTH]; BOARD_HEIGHT]);
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.level, 1);
        assert_eq!(snapshot.lines, 0);
        assert_eq!(snapshot.state, GameState::Playing);
        assert_eq!(snapshot.active.anchor, (3, -1));
        assert_eq!(snapshot.active.cells.len(), 4);
    }

    #[test]
    fn test_active_at() {
        let piece = Piece::spawn(PieceKind::O);
        let view = ActiveView::from(&piece);
        assert_eq!(view.cells, vec![(4, -1), (5, -1), (4, 0), (5, 0)]);

        let mut snapshot = Game::with_seed(3).snapshot();
        snapshot.active = view;
        assert_eq!(snapshot.active_at(4, 0), Some(PieceKind::O));
        assert_eq!(snapshot.active_at(3, 0), None);
        assert_eq!(snapshot.locked_at(4, 0), None);
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let snapshot = Game::with_seed(3).snapshot();
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["state"], "Playing");
        assert_eq!(json["level"], 1);
        assert_eq!(json["board"].as_array().map(Vec::len), Some(BOARD_HEIGHT));
        assert_eq!(json["active"]["cells"].as_array().map(Vec::len), Some(4));
    }
}
