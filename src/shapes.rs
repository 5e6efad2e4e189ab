//! Rotation table for every piece kind
//!
//! Each kind's mask is placed in a 4x4 frame and rotated clockwise until the
//! pattern repeats. Patterns that only differ by a translation inside the frame
//! count as the same rotation, so the O piece has one state, I/S/Z have two and
//! J/L/T have four. The table is computed once and never changes afterwards.

use crate::tetromino::PieceKind;
use std::sync::LazyLock;

/// Side length of the local frame
pub const FRAME_SIZE: usize = 4;

/// Filled cells of a local frame, indexed `[y][x]`
pub type Frame = [[bool; FRAME_SIZE]; FRAME_SIZE];

/// Occupied `(x, y)` offsets of one rotation state
pub type Offsets = Vec<(i32, i32)>;

static SHAPE_TABLE: LazyLock<Vec<Vec<Offsets>>> = LazyLock::new(|| {
    PieceKind::ALL
        .iter()
        .map(|kind| build_rotations(kind.mask()))
        .collect()
});

/// Rotation states of a kind, in clockwise application order
pub fn rotations(kind: PieceKind) -> &'static [Offsets] {
    &SHAPE_TABLE[kind.index()]
}

/// Place a mask in the top-left corner of a 4x4 frame, padding with empty
/// cells and dropping anything past the fourth row or column
pub fn normalize(mask: &[&str]) -> Frame {
    let mut frame = [[false; FRAME_SIZE]; FRAME_SIZE];
    for (y, row) in mask.iter().take(FRAME_SIZE).enumerate() {
        for (x, ch) in row.chars().take(FRAME_SIZE).enumerate() {
            frame[y][x] = ch == 'X';
        }
    }
    frame
}

/// Rotate a frame 90 degrees clockwise
pub fn rotate(frame: &Frame) -> Frame {
    let mut rotated = [[false; FRAME_SIZE]; FRAME_SIZE];
    for (y, row) in rotated.iter_mut().enumerate() {
        for (x, cell) in row.iter_mut().enumerate() {
            *cell = frame[FRAME_SIZE - x - 1][y];
        }
    }
    rotated
}

/// Filled cells of a frame in row-major order
pub fn offsets(frame: &Frame) -> Offsets {
    let mut cells = Vec::with_capacity(4);
    for (y, row) in frame.iter().enumerate() {
        for (x, &filled) in row.iter().enumerate() {
            if filled {
                cells.push((x as i32, y as i32));
            }
        }
    }
    cells
}

/// Cells shifted so the pattern touches the top and left edges.
/// Two frames hold the same pattern iff their canonical forms are equal.
fn canonical(cells: &[(i32, i32)]) -> Offsets {
    let min_x = cells.iter().map(|&(x, _)| x).min().unwrap_or(0);
    let min_y = cells.iter().map(|&(_, y)| y).min().unwrap_or(0);
    cells.iter().map(|&(x, y)| (x - min_x, y - min_y)).collect()
}

/// Distinct rotation states of a mask, first occurrence of each kept
pub fn build_rotations(mask: &[&str]) -> Vec<Offsets> {
    let mut frame = normalize(mask);
    let mut seen: Vec<Offsets> = Vec::with_capacity(4);
    let mut states = Vec::with_capacity(4);

    for _ in 0..4 {
        let cells = offsets(&frame);
        let key = canonical(&cells);
        if !seen.contains(&key) {
            seen.push(key);
            states.push(cells);
        }
        frame = rotate(&frame);
    }

    states
}
