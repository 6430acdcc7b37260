//! Falling piece: anchor, rotation and the grid cells it resolves to

use crate::grid::Grid;
use crate::square::Pos;
use crate::tetromino::PieceKind;

/// Grid cells a piece covers; None where an offset falls off the grid
pub type Cells = [Option<Pos>; 4];

/// A piece placed on some grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    /// Anchor (x, y); pattern offsets are relative to it
    x: i32,
    y: i32,
    /// Index into the kind's pattern list
    rotation: usize,
    cells: Cells,
    /// Whether the cells are currently filled on the grid
    shown: bool,
}

/// Cells covered by `kind` in `rotation` when anchored at (x, y)
fn resolve(grid: &Grid, kind: PieceKind, x: i32, y: i32, rotation: usize) -> Cells {
    match kind.patterns().get(rotation) {
        Some(pattern) => (*pattern).map(|(dx, dy)| grid.locate(x + dx, y + dy)),
        None => [None; 4],
    }
}

impl Piece {
    /// Create a piece in its first rotation, anchored at (x, y). It is not shown.
    pub fn new(kind: PieceKind, grid: &Grid, x: i32, y: i32) -> Self {
        Self {
            kind,
            x,
            y,
            rotation: 0,
            cells: resolve(grid, kind, x, y, 0),
            shown: false,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn anchor(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn rotation(&self) -> usize {
        self.rotation
    }

    pub fn cells(&self) -> &Cells {
        &self.cells
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }

    /// Whether every candidate cell exists and is free. A cell this piece
    /// itself fills counts as free, since the piece vacates it first.
    fn fits(&self, grid: &Grid, dest: &Cells) -> bool {
        dest.iter().all(|cell| match cell {
            None => false,
            Some(pos) => !grid.is_occupied(*pos) || (self.shown && self.cells.contains(cell)),
        })
    }

    fn relocate(&mut self, grid: &mut Grid, x: i32, y: i32, rotation: usize, cells: Cells) {
        let shown = self.shown;
        if shown {
            self.hide(grid);
        }
        self.x = x;
        self.y = y;
        self.rotation = rotation;
        self.cells = cells;
        if shown {
            self.show(grid);
        }
    }

    /// Try to shift the piece by (dx, dy), returns true if it moved
    pub fn move_by(&mut self, grid: &mut Grid, dx: i32, dy: i32) -> bool {
        let (x, y) = (self.x + dx, self.y + dy);
        let dest = resolve(grid, self.kind, x, y, self.rotation);
        if !self.fits(grid, &dest) {
            return false;
        }
        self.relocate(grid, x, y, self.rotation, dest);
        true
    }

    pub fn move_left(&mut self, grid: &mut Grid) -> bool {
        self.move_by(grid, -1, 0)
    }

    pub fn move_right(&mut self, grid: &mut Grid) -> bool {
        self.move_by(grid, 1, 0)
    }

    pub fn move_down(&mut self, grid: &mut Grid) -> bool {
        self.move_by(grid, 0, 1)
    }

    /// Try to advance to the next rotation in place, returns true if it rotated
    pub fn rotate(&mut self, grid: &mut Grid) -> bool {
        let count = self.kind.pattern_count();
        if count == 0 {
            return false;
        }
        let rotation = (self.rotation + 1) % count;
        let dest = resolve(grid, self.kind, self.x, self.y, rotation);
        if !self.fits(grid, &dest) {
            return false;
        }
        self.relocate(grid, self.x, self.y, rotation, dest);
        true
    }

    /// Whether a one-row descent would succeed. Does not move the piece.
    pub fn can_descend(&self, grid: &Grid) -> bool {
        let dest = resolve(grid, self.kind, self.x, self.y + 1, self.rotation);
        self.fits(grid, &dest)
    }

    /// Whether the piece can be displayed where it stands: every cell on the
    /// grid and none already filled
    pub fn can_show(&self, grid: &Grid) -> bool {
        self.cells
            .iter()
            .all(|cell| cell.is_some_and(|pos| !grid.is_occupied(pos)))
    }

    /// Lowest row (largest index) the piece covers
    pub fn bottom_row(&self) -> Option<usize> {
        self.cells.iter().flatten().map(|pos| pos.row).max()
    }

    /// Fill the piece's cells on the grid
    pub fn show(&mut self, grid: &mut Grid) {
        let (fore, fill) = (self.kind.fore_color(), self.kind.fill_color());
        for pos in self.cells.iter().flatten() {
            grid.show(*pos, fore, fill);
        }
        self.shown = true;
    }

    /// Empty the piece's cells on the grid
    pub fn hide(&mut self, grid: &mut Grid) {
        for pos in self.cells.iter().flatten() {
            grid.hide(*pos);
        }
        self.shown = false;
    }

    /// Move the piece onto another grid at (x, y), back in its first rotation.
    /// Hide it on the old grid before calling this.
    pub fn rehome(&mut self, grid: &Grid, x: i32, y: i32) {
        self.x = x;
        self.y = y;
        self.rotation = 0;
        self.cells = resolve(grid, self.kind, x, y, 0);
        self.shown = false;
    }
}
