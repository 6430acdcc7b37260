//! Main game board: the grid, the falling piece and line elimination

use crate::grid::{Event, Grid, Observer, SubscriptionId};
use crate::piece::Piece;
use crate::randomizer::Randomizer;
use crate::tetromino::PieceKind;

/// Standard board dimensions
pub const BOARD_ROWS: usize = 20;
pub const BOARD_COLS: usize = 10;
/// Anchor new pieces appear at
pub const SPAWN_ANCHOR: (i32, i32) = (3, 0);

/// Result of putting a new current piece on the board
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Placed,
    /// The piece's cells are already taken; nothing became current
    Obstructed,
}

/// What one descent step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No current piece
    Idle,
    /// The piece moved down one row
    Descended,
    /// The piece landed; `lines` rows were cleared
    Locked { lines: u32 },
}

/// The game board
#[derive(Debug)]
pub struct Board {
    grid: Grid,
    current: Option<Piece>,
    spawn: (i32, i32),
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BOARD_ROWS, BOARD_COLS)
    }
}

impl Board {
    /// Create an empty board spawning pieces at [`SPAWN_ANCHOR`]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::with_spawn(rows, cols, SPAWN_ANCHOR)
    }

    pub fn with_spawn(rows: usize, cols: usize, spawn: (i32, i32)) -> Self {
        Self {
            grid: Grid::new(rows, cols),
            current: None,
            spawn,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn current_piece(&self) -> Option<&Piece> {
        self.current.as_ref()
    }

    pub fn spawn_anchor(&self) -> (i32, i32) {
        self.spawn
    }

    pub fn subscribe<O>(&mut self, observer: O) -> SubscriptionId
    where
        O: Observer + 'static,
    {
        self.grid.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.grid.unsubscribe(id)
    }

    /// Create a piece of `kind` at the spawn anchor and make it current
    pub fn spawn_piece(&mut self, kind: PieceKind) -> Placement {
        let (x, y) = self.spawn;
        let piece = Piece::new(kind, &self.grid, x, y);
        self.install(piece)
    }

    /// Spawn a piece of whatever kind the randomizer draws
    pub fn spawn_random(&mut self, randomizer: &mut Randomizer) -> Placement {
        self.spawn_piece(randomizer.next())
    }

    /// Take over a piece from elsewhere (the preview) as the current piece,
    /// re-anchored at the spawn point
    pub fn place_piece(&mut self, mut piece: Piece) -> Placement {
        let (x, y) = self.spawn;
        piece.rehome(&self.grid, x, y);
        self.install(piece)
    }

    fn install(&mut self, mut piece: Piece) -> Placement {
        if !piece.can_show(&self.grid) {
            tracing::debug!("spawn of {:?} obstructed at {:?}", piece.kind(), piece.anchor());
            self.current = None;
            return Placement::Obstructed;
        }
        piece.show(&mut self.grid);
        tracing::debug!("spawned {:?} at {:?}", piece.kind(), piece.anchor());
        self.current = Some(piece);
        Placement::Placed
    }

    pub fn move_left(&mut self) -> bool {
        match &mut self.current {
            Some(piece) => piece.move_left(&mut self.grid),
            None => false,
        }
    }

    pub fn move_right(&mut self) -> bool {
        match &mut self.current {
            Some(piece) => piece.move_right(&mut self.grid),
            None => false,
        }
    }

    /// Move down one row without locking
    pub fn move_down(&mut self) -> bool {
        match &mut self.current {
            Some(piece) => piece.move_down(&mut self.grid),
            None => false,
        }
    }

    pub fn rotate(&mut self) -> bool {
        match &mut self.current {
            Some(piece) => piece.rotate(&mut self.grid),
            None => false,
        }
    }

    /// One descent step. A piece that cannot descend is locked: the lock
    /// signal goes out, lines are eliminated, the current piece is dropped and
    /// the ready-for-next signal goes out, in that order.
    pub fn tick(&mut self) -> TickOutcome {
        let Some(piece) = &mut self.current else {
            return TickOutcome::Idle;
        };

        if piece.can_descend(&self.grid) {
            piece.move_down(&mut self.grid);
            return TickOutcome::Descended;
        }

        let bottom = piece.bottom_row();
        tracing::debug!("{:?} locked at {:?}", piece.kind(), piece.anchor());
        self.grid.emit(Event::PieceLocked);
        let lines = match bottom {
            Some(row) => self.eliminate_lines(row),
            None => 0,
        };
        self.current = None;
        self.grid.emit(Event::ReadyForNext);
        TickOutcome::Locked { lines }
    }

    /// Remove full rows among `start_row` and the three rows above it.
    ///
    /// Scans upward. After a removal the same row index is checked again,
    /// since the row above has slid into it, and the upper bound of the scan
    /// moves down by one. Returns the number of rows removed; a non-zero
    /// count is also announced as [`Event::LinesCleared`].
    pub fn eliminate_lines(&mut self, start_row: usize) -> u32 {
        let mut row = start_row.min(self.grid.rows() - 1) as isize;
        let mut upper = (row - 3).max(0);
        let mut cleared = 0;

        while row >= upper {
            if !self.grid.is_row_full(row as usize) {
                row -= 1;
                continue;
            }
            cleared += 1;
            self.grid.collapse_row(row as usize);
            upper += 1;
        }

        if cleared > 0 {
            tracing::debug!("cleared {} line(s) scanning up from row {}", cleared, start_row);
            self.grid.emit(Event::LinesCleared(cleared));
        }
        cleared
    }

    /// Empty the board and forget the current piece
    pub fn reset(&mut self) {
        self.current = None;
        self.grid.clear();
    }
}
