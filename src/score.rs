//! Scoring: 5 * n * n + 5 points for n rows removed by one lock

/// Points for removing `lines` rows with a single lock.
/// Grows faster than linear: 1 -> 10, 2 -> 25, 3 -> 50, 4 -> 85.
pub fn points_for(lines: u32) -> u64 {
    if lines == 0 {
        return 0;
    }
    let n = lines as u64;
    5 * n * n + 5
}

/// Running totals for one game
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    /// Current score
    pub points: u64,
    /// Total rows removed
    pub lines: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for a lock that removed `lines` rows; returns the points added
    pub fn add_clear(&mut self, lines: u32) -> u64 {
        let gained = points_for(lines);
        self.points += gained;
        self.lines += lines;
        gained
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_table() {
        assert_eq!(points_for(0), 0);
        assert_eq!(points_for(1), 10);
        assert_eq!(points_for(2), 25);
        assert_eq!(points_for(3), 50);
        assert_eq!(points_for(4), 85);
    }

    #[test]
    fn test_accumulates() {
        let mut score = Score::new();
        assert_eq!(score.add_clear(1), 10);
        assert_eq!(score.add_clear(4), 85);
        assert_eq!(score.points, 95);
        assert_eq!(score.lines, 5);
    }

    #[test]
    fn test_multi_clear_beats_singles() {
        let mut combined = Score::new();
        combined.add_clear(2);
        let mut split = Score::new();
        split.add_clear(1);
        split.add_clear(1);
        assert!(combined.points > split.points);
        assert_eq!(combined.lines, split.lines);
    }

    #[test]
    fn test_reset() {
        let mut score = Score::new();
        score.add_clear(3);
        score.reset();
        assert_eq!(score, Score::default());
    }
}
