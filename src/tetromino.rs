//! Piece kinds and their canonical shapes

use ratatui::style::Color;
use serde::Serialize;

/// The 7 tetromino kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// Every kind, in table order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Position of this kind in [`PieceKind::ALL`]
    pub fn index(self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::J => 1,
            PieceKind::L => 2,
            PieceKind::O => 3,
            PieceKind::S => 4,
            PieceKind::T => 5,
            PieceKind::Z => 6,
        }
    }

    /// Canonical shape as rows of a rectangular mask, `X` marks a filled cell
    pub fn mask(self) -> &'static [&'static str] {
        match self {
            PieceKind::I => &["....", "XXXX", "....", "...."],
            PieceKind::J => &["X..", "XXX", "..."],
            PieceKind::L => &["..X", "XXX", "..."],
            PieceKind::O => &[".XX.", ".XX.", "....", "...."],
            PieceKind::S => &[".XX", "XX.", "..."],
            PieceKind::T => &[".X.", "XXX", "..."],
            PieceKind::Z => &["XX.", ".XX", "..."],
        }
    }

    /// Tag stored in locked board cells. Never zero.
    pub fn color_tag(self) -> u8 {
        match self {
            PieceKind::Z => 1,
            PieceKind::O => 2,
            PieceKind::L => 3,
            PieceKind::J => 4,
            PieceKind::T => 5,
            PieceKind::I => 6,
            PieceKind::S => 10,
        }
    }

    /// Reverse of [`PieceKind::color_tag`]
    pub fn from_color_tag(tag: u8) -> Option<PieceKind> {
        PieceKind::ALL.into_iter().find(|kind| kind.color_tag() == tag)
    }

    /// Terminal color for this kind
    pub fn color(self) -> Color {
        match self {
            PieceKind::I => Color::Cyan,
            PieceKind::J => Color::Blue,
            PieceKind::L => Color::Yellow,
            PieceKind::O => Color::Green,
            PieceKind::S => Color::LightGreen,
            PieceKind::T => Color::Magenta,
            PieceKind::Z => Color::Red,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_index_matches_table_order() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn test_color_tags_are_distinct_and_nonzero() {
        let tags: HashSet<u8> = PieceKind::ALL.iter().map(|k| k.color_tag()).collect();
        assert_eq!(tags.len(), 7);
        assert!(!tags.contains(&0));
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_color_tag(kind.color_tag()), Some(kind));
        }
        assert_eq!(PieceKind::from_color_tag(0), None);
    }

    #[test]
    fn test_every_mask_has_four_cells() {
        for kind in PieceKind::ALL {
            let filled: usize = kind
                .mask()
                .iter()
                .map(|row| row.chars().filter(|&c| c == 'X').count())
                .sum();
            assert_eq!(filled, 4, "{kind:?}");
        }
    }
}
