//! Tetromino definitions and rotation patterns
//!
//! Each kind owns 1, 2 or 4 patterns. A pattern is 4 (dx, dy) offsets from
//! the piece's anchor, x growing rightward and y growing downward.

use crate::square::Color;

/// A single rotation state: the 4 occupied offsets relative to the anchor
pub type Pattern = [(i32, i32); 4];

/// The 7 tetromino kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

const I_PATTERNS: [Pattern; 2] = [
    [(0, 1), (1, 1), (2, 1), (3, 1)],
    [(1, 0), (1, 1), (1, 2), (1, 3)],
];

const J_PATTERNS: [Pattern; 4] = [
    [(1, 0), (1, 1), (1, 2), (0, 2)],
    [(0, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (2, 0), (1, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (2, 2)],
];

const L_PATTERNS: [Pattern; 4] = [
    [(1, 0), (1, 1), (1, 2), (2, 2)],
    [(0, 1), (1, 1), (2, 1), (0, 2)],
    [(0, 0), (1, 0), (1, 1), (1, 2)],
    [(2, 0), (0, 1), (1, 1), (2, 1)],
];

const O_PATTERNS: [Pattern; 1] = [[(0, 0), (1, 0), (0, 1), (1, 1)]];

const S_PATTERNS: [Pattern; 2] = [
    [(1, 0), (2, 0), (0, 1), (1, 1)],
    [(1, 0), (1, 1), (2, 1), (2, 2)],
];

const T_PATTERNS: [Pattern; 4] = [
    [(0, 1), (1, 1), (2, 1), (1, 2)],
    [(1, 0), (0, 1), (1, 1), (1, 2)],
    [(1, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (2, 1), (1, 2)],
];

const Z_PATTERNS: [Pattern; 2] = [
    [(0, 0), (1, 0), (1, 1), (2, 1)],
    [(2, 0), (1, 1), (2, 1), (1, 2)],
];

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Rotation patterns in rotation order
    pub fn patterns(&self) -> &'static [Pattern] {
        match self {
            PieceKind::I => &I_PATTERNS,
            PieceKind::J => &J_PATTERNS,
            PieceKind::L => &L_PATTERNS,
            PieceKind::O => &O_PATTERNS,
            PieceKind::S => &S_PATTERNS,
            PieceKind::T => &T_PATTERNS,
            PieceKind::Z => &Z_PATTERNS,
        }
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns().len()
    }

    /// Outline color of the kind's squares
    pub fn fore_color(&self) -> Color {
        match self {
            PieceKind::I => Color::Red,
            PieceKind::J => Color::Black,
            PieceKind::L => Color::Magenta,
            PieceKind::O => Color::Blue,
            PieceKind::S => Color::Green,
            PieceKind::T => Color::Purple,
            PieceKind::Z => Color::Orange,
        }
    }

    /// Center color, shared by every kind
    pub fn fill_color(&self) -> Color {
        Color::Azure
    }

    /// Single-letter name, used by text renderers
    pub fn letter(&self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::T => 'T',
            PieceKind::Z => 'Z',
        }
    }

    /// Kind whose palette uses this outline color
    pub fn from_fore_color(color: Color) -> Option<PieceKind> {
        PieceKind::ALL.into_iter().find(|kind| kind.fore_color() == color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_pattern_counts() {
        assert_eq!(PieceKind::O.pattern_count(), 1);
        assert_eq!(PieceKind::I.pattern_count(), 2);
        assert_eq!(PieceKind::S.pattern_count(), 2);
        assert_eq!(PieceKind::Z.pattern_count(), 2);
        assert_eq!(PieceKind::J.pattern_count(), 4);
        assert_eq!(PieceKind::L.pattern_count(), 4);
        assert_eq!(PieceKind::T.pattern_count(), 4);
    }

    #[test]
    fn test_patterns_have_four_distinct_cells() {
        for kind in PieceKind::ALL {
            for pattern in kind.patterns() {
                let unique: HashSet<_> = pattern.iter().collect();
                assert_eq!(unique.len(), 4, "{kind:?} has overlapping offsets");
                assert!(pattern.iter().all(|&(dx, dy)| (0..4).contains(&dx) && (0..4).contains(&dy)));
            }
        }
    }

    #[test]
    fn test_colors_identify_kind() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_fore_color(kind.fore_color()), Some(kind));
        }
        assert_eq!(PieceKind::from_fore_color(Color::Azure), None);
    }
}
