//! Single grid cell: occupancy plus the colors it was filled with

/// Cosmetic color carried by a filled square.
///
/// The engine never interprets colors, it only hands them to whoever
/// renders the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    #[default]
    Black,
    Purple,
    Red,
    Magenta,
    Green,
    Orange,
    Blue,
    Azure,
    Rgb(u8, u8, u8),
}

/// Position of a square inside its grid, column first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub col: usize,
    pub row: usize,
}

impl Pos {
    pub const fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }
}

/// A cell of a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Square {
    pos: Pos,
    occupied: bool,
    fore: Color,
    fill: Color,
}

impl Square {
    pub fn new(pos: Pos) -> Self {
        Self {
            pos,
            occupied: false,
            fore: Color::default(),
            fill: Color::default(),
        }
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn is_occupied(&self) -> bool {
        self.occupied
    }

    pub fn fore(&self) -> Color {
        self.fore
    }

    pub fn fill(&self) -> Color {
        self.fill
    }

    /// Mark the square filled with the given color pair
    pub fn set_occupied(&mut self, fore: Color, fill: Color) {
        self.fore = fore;
        self.fill = fill;
        self.occupied = true;
    }

    /// Mark the square empty. Colors are left as they were.
    pub fn clear(&mut self) {
        self.occupied = false;
    }

    /// Take over another square's state while keeping this slot's position
    pub(crate) fn copy_state(&mut self, other: &Square) {
        self.occupied = other.occupied;
        self.fore = other.fore;
        self.fill = other.fill;
    }
}
