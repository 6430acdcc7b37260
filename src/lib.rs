//! Falling-block puzzle engine
//!
//! Pieces fall on a [`Board`], rows that fill up are removed and scored, and
//! every cell change is announced through [`Event`]s so any renderer (or none)
//! can follow along. [`Game`] sequences turns on top of the board.

pub mod board;
pub mod config;
pub mod game;
pub mod grid;
pub mod piece;
pub mod randomizer;
pub mod render;
pub mod score;
pub mod square;
pub mod tetromino;
pub mod timer;

pub use board::{Board, Placement, TickOutcome};
pub use config::{Config, ConfigError};
pub use game::{Action, Game, GameState};
pub use grid::{Event, Grid, Observer, SubscriptionId};
pub use piece::Piece;
pub use randomizer::Randomizer;
pub use render::{BlockStyle, TextRenderer, render_grid};
pub use score::{Score, points_for};
pub use square::{Color, Pos, Square};
pub use tetromino::PieceKind;
pub use timer::DescentTimer;
