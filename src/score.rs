//! Scoring, leveling and gravity speed

use std::time::Duration;

/// Points for clearing 1, 2, 3 or 4 rows with a single lock
pub const LINE_CLEAR_POINTS: [u64; 5] = [0, 100, 300, 500, 800];

/// Rows needed per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Gravity interval at level 1
pub const INITIAL_GRAVITY: Duration = Duration::from_millis(600);
/// Gravity never gets faster than this
pub const GRAVITY_FLOOR: Duration = Duration::from_millis(80);
/// Interval multiplier applied on each level-up
pub const GRAVITY_DECAY: f64 = 0.85;

/// Score, level, line count and the current fall speed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Score {
    /// Current score
    pub points: u64,
    /// Current level, starts at 1
    pub level: u32,
    /// Total lines cleared
    pub lines: u32,
    /// Time for one unobstructed fall step
    pub gravity: Duration,
}

impl Default for Score {
    fn default() -> Self {
        Self::new()
    }
}

impl Score {
    pub fn new() -> Self {
        Self {
            points: 0,
            level: 1,
            lines: 0,
            gravity: INITIAL_GRAVITY,
        }
    }

    /// Record a line clear. Returns true if it raised the level.
    ///
    /// The award depends only on the number of rows, never on the level.
    pub fn add_clear(&mut self, cleared: usize) -> bool {
        if cleared == 0 {
            return false;
        }

        self.lines += cleared as u32;
        self.points += LINE_CLEAR_POINTS[cleared.min(4)];

        let level = self.lines / LINES_PER_LEVEL + 1;
        if level > self.level {
            self.level = level;
            self.gravity = GRAVITY_FLOOR.max(self.gravity.mul_f64(GRAVITY_DECAY));
            true
        } else {
            false
        }
    }

    /// Add score for soft drop (1 point per cell)
    pub fn add_soft_drop(&mut self, cells: u32) {
        self.points += cells as u64;
    }

    /// Add score for hard drop (2 points per cell)
    pub fn add_hard_drop(&mut self, cells: u32) {
        self.points += cells as u64 * 2;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_score() {
        let score = Score::new();
        assert_eq!(score.points, 0);
        assert_eq!(score.level, 1);
        assert_eq!(score.lines, 0);
        assert_eq!(score.gravity, Duration::from_millis(600));
    }

    #[test]
    fn test_clear_table() {
        for (cleared, expected) in [(1, 100), (2, 300), (3, 500), (4, 800)] {
            let mut score = Score::new();
            score.add_clear(cleared);
            assert_eq!(score.points, expected);
            assert_eq!(score.lines, cleared as u32);
        }
    }

    #[test]
    fn test_clear_ignores_level() {
        let mut score = Score::new();
        score.level = 7;
        score.lines = 60;
        score.add_clear(4);
        assert_eq!(score.points, 800);
        assert_eq!(score.level, 7);
    }

    #[test]
    fn test_no_clear_does_nothing() {
        let mut score = Score::new();
        assert!(!score.add_clear(0));
        assert_eq!(score, Score::new());
    }

    #[test]
    fn test_level_up() {
        let mut score = Score::new();
        for _ in 0..9 {
            assert!(!score.add_clear(1));
        }
        assert_eq!(score.level, 1);
        assert_eq!(score.gravity, INITIAL_GRAVITY);

        assert!(score.add_clear(1));
        assert_eq!(score.level, 2);
        assert_eq!(score.gravity, INITIAL_GRAVITY.mul_f64(0.85));
        assert!(score.gravity < INITIAL_GRAVITY);
    }

    #[test]
    fn test_level_jump_decays_once() {
        let mut score = Score::new();
        score.lines = 18;
        // 18 + 4 = 22 lines -> level 3 straight from level 1
        assert!(score.add_clear(4));
        assert_eq!(score.level, 3);
        assert_eq!(score.gravity, INITIAL_GRAVITY.mul_f64(0.85));
    }

    #[test]
    fn test_gravity_floor() {
        let mut score = Score::new();
        score.gravity = Duration::from_millis(90);
        score.lines = 9;
        assert!(score.add_clear(1));
        assert_eq!(score.gravity, GRAVITY_FLOOR);

        score.lines = 19;
        assert!(score.add_clear(1));
        assert_eq!(score.gravity, GRAVITY_FLOOR);
    }

    #[test]
    fn test_gravity_reaches_floor_eventually() {
        let mut score = Score::new();
        let mut previous = score.gravity;
        for _ in 0..40 {
            score.add_clear(4);
            assert!(score.gravity <= previous);
            assert!(score.gravity >= GRAVITY_FLOOR);
            previous = score.gravity;
        }
        assert_eq!(score.gravity, GRAVITY_FLOOR);
    }

    #[test]
    fn test_drop_points() {
        let mut score = Score::new();
        score.add_soft_drop(3);
        score.add_hard_drop(10);
        assert_eq!(score.points, 23);
    }
}
