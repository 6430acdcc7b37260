//! Fixed-size arena of squares plus the notification hub renderers subscribe to
//!
//! Squares live in fixed slots addressed by (col, row), row 0 at the top.
//! Shifting rows copies state between slots; slots never move.

use crate::square::{Color, Pos, Square};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// State change raised by a grid or by the board that owns it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A square became occupied
    Shown { pos: Pos, fore: Color, fill: Color },
    /// A square became empty
    Hidden { pos: Pos },
    /// The falling piece could not descend and is now part of the stack
    PieceLocked,
    /// Lines were checked and the board wants a new current piece
    ReadyForNext,
    /// Full rows were removed by a single lock
    LinesCleared(u32),
}

/// Something that wants to hear about grid events
pub trait Observer {
    fn notify(&mut self, event: &Event);
}

impl<F> Observer for F
where
    F: FnMut(&Event),
{
    fn notify(&mut self, event: &Event) {
        self(event)
    }
}

/// Shared observer; the caller keeps a clone to read it back
impl<O> Observer for Rc<RefCell<O>>
where
    O: Observer,
{
    fn notify(&mut self, event: &Event) {
        self.borrow_mut().notify(event)
    }
}

/// Handle returned by [`Grid::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// A rows x cols grid of squares
pub struct Grid {
    rows: usize,
    cols: usize,
    /// Row-major storage (row * cols + col)
    squares: Vec<Square>,
    observers: Vec<(SubscriptionId, Box<dyn Observer>)>,
    next_subscription: u64,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("occupied", &self.occupied_count())
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Grid {
    /// Create an empty grid.
    ///
    /// # Panics
    ///
    /// Panics if `rows` or `cols` is zero.
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "grid needs at least one row and one column, got {rows}x{cols}");
        let squares = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| Square::new(Pos::new(col, row))))
            .collect();
        Self {
            rows,
            cols,
            squares,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    fn index(&self, pos: Pos) -> usize {
        pos.row * self.cols + pos.col
    }

    /// Resolve signed coordinates to a position on this grid.
    /// Returns None if out of bounds.
    pub fn locate(&self, x: i32, y: i32) -> Option<Pos> {
        if x < 0 || y < 0 {
            return None;
        }
        let (col, row) = (x as usize, y as usize);
        if col >= self.cols || row >= self.rows {
            return None;
        }
        Some(Pos::new(col, row))
    }

    /// Get the square at (x, y), None if out of bounds
    pub fn square(&self, x: i32, y: i32) -> Option<&Square> {
        self.locate(x, y).map(|pos| &self.squares[self.index(pos)])
    }

    /// Get the square at a position already known to be on this grid
    pub fn at(&self, pos: Pos) -> Option<&Square> {
        if pos.col >= self.cols || pos.row >= self.rows {
            return None;
        }
        Some(&self.squares[self.index(pos)])
    }

    pub fn is_occupied(&self, pos: Pos) -> bool {
        self.at(pos).is_some_and(Square::is_occupied)
    }

    /// Iterate over one row, left to right
    pub fn row(&self, row: usize) -> impl Iterator<Item = &Square> {
        let start = row.min(self.rows) * self.cols;
        let end = if row < self.rows { start + self.cols } else { start };
        self.squares[start..end].iter()
    }

    pub fn is_row_full(&self, row: usize) -> bool {
        row < self.rows && self.row(row).all(Square::is_occupied)
    }

    pub fn occupied_count(&self) -> usize {
        self.squares.iter().filter(|sq| sq.is_occupied()).count()
    }

    /// Fill a square and notify subscribers
    pub(crate) fn show(&mut self, pos: Pos, fore: Color, fill: Color) {
        if pos.col >= self.cols || pos.row >= self.rows {
            return;
        }
        let idx = self.index(pos);
        self.squares[idx].set_occupied(fore, fill);
        self.emit(Event::Shown { pos, fore, fill });
    }

    /// Empty a square and notify subscribers
    pub(crate) fn hide(&mut self, pos: Pos) {
        if pos.col >= self.cols || pos.row >= self.rows {
            return;
        }
        let idx = self.index(pos);
        self.squares[idx].clear();
        self.emit(Event::Hidden { pos });
    }

    /// Remove `row` by shifting every row above it down by one.
    /// Row 0 becomes empty. Only cells whose visible state changed are reported.
    pub(crate) fn collapse_row(&mut self, row: usize) {
        if row >= self.rows {
            return;
        }
        for target in (1..=row).rev() {
            for col in 0..self.cols {
                let src = self.squares[self.index(Pos::new(col, target - 1))];
                self.overwrite(Pos::new(col, target), &src);
            }
        }
        for col in 0..self.cols {
            let empty = Square::new(Pos::new(col, 0));
            self.overwrite(Pos::new(col, 0), &empty);
        }
    }

    fn overwrite(&mut self, pos: Pos, src: &Square) {
        let idx = self.index(pos);
        let before = self.squares[idx];
        self.squares[idx].copy_state(src);
        let after = self.squares[idx];
        if before == after || (!before.is_occupied() && !after.is_occupied()) {
            return;
        }
        if after.is_occupied() {
            self.emit(Event::Shown {
                pos,
                fore: after.fore(),
                fill: after.fill(),
            });
        } else {
            self.emit(Event::Hidden { pos });
        }
    }

    /// Empty every square
    pub(crate) fn clear(&mut self) {
        for idx in 0..self.squares.len() {
            if self.squares[idx].is_occupied() {
                let pos = self.squares[idx].pos();
                self.squares[idx].clear();
                self.emit(Event::Hidden { pos });
            }
        }
    }

    /// Register an observer for every event this grid raises
    pub fn subscribe<O>(&mut self, observer: O) -> SubscriptionId
    where
        O: Observer + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Drop a subscription. Returns false if the id was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    pub(crate) fn emit(&mut self, event: Event) {
        for (_, observer) in &mut self.observers {
            observer.notify(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder(grid: &mut Grid) -> Rc<RefCell<Vec<Event>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        grid.subscribe(move |e: &Event| sink.borrow_mut().push(*e));
        events
    }

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new(20, 10);
        assert_eq!(grid.rows(), 20);
        assert_eq!(grid.cols(), 10);
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    #[should_panic]
    fn test_zero_dimensions_panic() {
        let _ = Grid::new(0, 10);
    }

    #[test]
    fn test_out_of_bounds() {
        let grid = Grid::new(20, 10);
        assert!(grid.square(-1, 0).is_none());
        assert!(grid.square(0, -1).is_none());
        assert!(grid.square(10, 0).is_none());
        assert!(grid.square(0, 20).is_none());
        assert_eq!(grid.square(9, 19).map(Square::pos), Some(Pos::new(9, 19)));
    }

    #[test]
    fn test_show_hide_notify() {
        let mut grid = Grid::new(4, 4);
        let events = recorder(&mut grid);
        let pos = Pos::new(1, 2);

        grid.show(pos, Color::Red, Color::Azure);
        assert!(grid.is_occupied(pos));
        grid.hide(pos);
        assert!(!grid.is_occupied(pos));

        assert_eq!(
            *events.borrow(),
            vec![
                Event::Shown {
                    pos,
                    fore: Color::Red,
                    fill: Color::Azure
                },
                Event::Hidden { pos },
            ]
        );
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let mut grid = Grid::new(4, 4);
        let events = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&events);
        let id = grid.subscribe(move |_: &Event| *sink.borrow_mut() += 1);

        grid.show(Pos::new(0, 0), Color::Blue, Color::Azure);
        assert!(grid.unsubscribe(id));
        assert!(!grid.unsubscribe(id));
        grid.hide(Pos::new(0, 0));

        assert_eq!(*events.borrow(), 1);
    }

    #[derive(Default)]
    struct Tally {
        shown: usize,
        hidden: usize,
    }

    impl Observer for Tally {
        fn notify(&mut self, event: &Event) {
            match event {
                Event::Shown { .. } => self.shown += 1,
                Event::Hidden { .. } => self.hidden += 1,
                _ => {}
            }
        }
    }

    #[test]
    fn test_shared_observer_receives_events() {
        let mut grid = Grid::new(3, 3);
        let tally = Rc::new(RefCell::new(Tally::default()));
        grid.subscribe(Rc::clone(&tally));

        grid.show(Pos::new(0, 0), Color::Green, Color::Azure);
        grid.show(Pos::new(1, 0), Color::Green, Color::Azure);
        grid.hide(Pos::new(0, 0));

        assert_eq!(tally.borrow().shown, 2);
        assert_eq!(tally.borrow().hidden, 1);
        assert_eq!(Rc::strong_count(&tally), 2);
    }

    #[test]
    fn test_collapse_row_shifts_down() {
        let mut grid = Grid::new(4, 3);
        // Row 3 full, row 2 has col 0, row 1 has col 2
        for col in 0..3 {
            grid.show(Pos::new(col, 3), Color::Red, Color::Azure);
        }
        grid.show(Pos::new(0, 2), Color::Green, Color::Azure);
        grid.show(Pos::new(2, 1), Color::Blue, Color::Azure);
        assert!(grid.is_row_full(3));

        grid.collapse_row(3);

        assert!(grid.is_occupied(Pos::new(0, 3)));
        assert_eq!(grid.at(Pos::new(0, 3)).map(Square::fore), Some(Color::Green));
        assert!(!grid.is_occupied(Pos::new(1, 3)));
        assert!(grid.is_occupied(Pos::new(2, 2)));
        assert!(grid.row(0).all(|sq| !sq.is_occupied()));
        assert!(grid.row(1).all(|sq| !sq.is_occupied()));
        assert_eq!(grid.occupied_count(), 2);
    }

    #[test]
    fn test_collapse_reports_only_changes() {
        let mut grid = Grid::new(3, 2);
        grid.show(Pos::new(0, 2), Color::Red, Color::Azure);
        grid.show(Pos::new(1, 2), Color::Red, Color::Azure);
        grid.show(Pos::new(0, 1), Color::Red, Color::Azure);
        let events = recorder(&mut grid);

        grid.collapse_row(2);

        // (0,2) stays red, (1,2) empties, (0,1) empties
        assert_eq!(
            *events.borrow(),
            vec![
                Event::Hidden { pos: Pos::new(1, 2) },
                Event::Hidden { pos: Pos::new(0, 1) },
            ]
        );
    }

    #[test]
    fn test_clear_hides_occupied_only() {
        let mut grid = Grid::new(2, 2);
        grid.show(Pos::new(1, 1), Color::Red, Color::Azure);
        let events = recorder(&mut grid);
        grid.clear();
        assert_eq!(grid.occupied_count(), 0);
        assert_eq!(*events.borrow(), vec![Event::Hidden { pos: Pos::new(1, 1) }]);
    }
}
