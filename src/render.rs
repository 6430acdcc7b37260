//! Text rendering
//!
//! [`TextRenderer`] keeps its own picture of a grid, built only from the
//! events the grid raises. [`render_grid`] draws a grid directly.

use crate::grid::{Event, Grid, Observer};
use crate::square::{Color, Pos};
use crate::tetromino::PieceKind;
use serde::{Deserialize, Serialize};

/// How a cell is drawn: two characters per cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockStyle {
    #[default]
    Solid,
    Bracket,
    Round,
    /// The piece letter for each filled cell
    Letters,
}

impl BlockStyle {
    /// Glyphs for an empty cell
    pub fn empty(&self) -> &'static str {
        match self {
            BlockStyle::Solid => "░░",
            BlockStyle::Bracket | BlockStyle::Round => "..",
            BlockStyle::Letters => ". ",
        }
    }

    /// Glyphs for a cell filled with `fore`
    pub fn filled(&self, fore: Color) -> String {
        match self {
            BlockStyle::Solid => "██".to_string(),
            BlockStyle::Bracket => "[]".to_string(),
            BlockStyle::Round => "()".to_string(),
            BlockStyle::Letters => {
                let letter = PieceKind::from_fore_color(fore).map_or('#', |kind| kind.letter());
                format!("{letter} ")
            }
        }
    }
}

fn draw(rows: usize, cols: usize, style: BlockStyle, cell: impl Fn(Pos) -> Option<Color>) -> String {
    let mut out = String::with_capacity((rows + 1) * (cols * 2 + 3));
    for row in 0..rows {
        out.push('|');
        for col in 0..cols {
            match cell(Pos::new(col, row)) {
                Some(fore) => out.push_str(&style.filled(fore)),
                None => out.push_str(style.empty()),
            }
        }
        out.push_str("|\n");
    }
    out.push('+');
    out.push_str(&"-".repeat(cols * 2));
    out.push_str("+\n");
    out
}

/// Draw the grid as it is now
pub fn render_grid(grid: &Grid, style: BlockStyle) -> String {
    draw(grid.rows(), grid.cols(), style, |pos| {
        grid.at(pos).filter(|sq| sq.is_occupied()).map(|sq| sq.fore())
    })
}

/// Renderer fed purely by grid events
#[derive(Debug, Clone)]
pub struct TextRenderer {
    rows: usize,
    cols: usize,
    style: BlockStyle,
    /// Outline color of each filled cell, row-major
    cells: Vec<Option<Color>>,
    locks: u32,
    lines: u32,
}

impl TextRenderer {
    /// Renderer for an initially empty grid
    pub fn new(rows: usize, cols: usize, style: BlockStyle) -> Self {
        Self {
            rows,
            cols,
            style,
            cells: vec![None; rows * cols],
            locks: 0,
            lines: 0,
        }
    }

    /// Renderer starting from the grid's current contents
    pub fn for_grid(grid: &Grid, style: BlockStyle) -> Self {
        let mut renderer = Self::new(grid.rows(), grid.cols(), style);
        for row in 0..grid.rows() {
            for sq in grid.row(row).filter(|sq| sq.is_occupied()) {
                renderer.set(sq.pos(), Some(sq.fore()));
            }
        }
        renderer
    }

    fn set(&mut self, pos: Pos, value: Option<Color>) {
        if pos.row < self.rows && pos.col < self.cols {
            self.cells[pos.row * self.cols + pos.col] = value;
        }
    }

    pub fn apply(&mut self, event: &Event) {
        match *event {
            Event::Shown { pos, fore, .. } => self.set(pos, Some(fore)),
            Event::Hidden { pos } => self.set(pos, None),
            Event::PieceLocked => self.locks += 1,
            Event::LinesCleared(n) => self.lines += n,
            Event::ReadyForNext => {}
        }
    }

    pub fn is_filled(&self, pos: Pos) -> bool {
        pos.row < self.rows && pos.col < self.cols && self.cells[pos.row * self.cols + pos.col].is_some()
    }

    /// Pieces locked so far
    pub fn locks(&self) -> u32 {
        self.locks
    }

    /// Rows cleared so far
    pub fn lines_cleared(&self) -> u32 {
        self.lines
    }

    pub fn render(&self) -> String {
        draw(self.rows, self.cols, self.style, |pos| {
            self.cells[pos.row * self.cols + pos.col]
        })
    }
}

impl Observer for TextRenderer {
    fn notify(&mut self, event: &Event) {
        self.apply(event)
    }
}
