//! Game controller: turn sequencing, the descent timer and the next-piece preview

use crate::board::{Board, Placement, TickOutcome};
use crate::config::Config;
use crate::grid::{Grid, Observer, SubscriptionId};
use crate::piece::Piece;
use crate::randomizer::Randomizer;
use crate::score::Score;
use crate::timer::DescentTimer;
use std::time::{Duration, Instant};

/// Preview grid dimensions
pub const PREVIEW_ROWS: usize = 4;
pub const PREVIEW_COLS: usize = 4;
/// Anchor of the piece shown on the preview grid
const PREVIEW_ANCHOR: (i32, i32) = (0, 0);

/// Game state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameState {
    /// Nothing running yet
    #[default]
    Idle,
    Running,
    Paused,
    /// The next piece had nowhere to go; start again to play
    GameOver,
}

/// Input actions the game can process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    /// One descent step, locking the piece if it cannot go further
    SoftDrop,
    Rotate,
    /// Start, pause or resume depending on the state
    StartPause,
}

/// The main game struct
#[derive(Debug)]
pub struct Game {
    board: Board,
    /// Grid the next piece is displayed on
    preview: Grid,
    next: Option<Piece>,
    randomizer: Randomizer,
    score: Score,
    state: GameState,
    timer: DescentTimer,
    /// Last instant the caller handed us
    now: Instant,
}

impl Game {
    /// Standard 20x10 board, 1 second gravity
    pub fn new(randomizer: Randomizer) -> Self {
        Self::with_layout(
            Board::default(),
            Grid::new(PREVIEW_ROWS, PREVIEW_COLS),
            DescentTimer::default().interval(),
            randomizer,
        )
    }

    pub fn with_layout(board: Board, preview: Grid, interval: Duration, randomizer: Randomizer) -> Self {
        Self {
            board,
            preview,
            next: None,
            randomizer,
            score: Score::new(),
            state: GameState::Idle,
            timer: DescentTimer::new(interval),
            now: Instant::now(),
        }
    }

    /// Build a game from validated settings
    pub fn from_config(config: &Config) -> Self {
        let board = Board::with_spawn(
            config.board.rows,
            config.board.cols,
            (config.board.spawn_col, config.board.spawn_row),
        );
        let preview = Grid::new(config.preview.rows, config.preview.cols);
        let randomizer = match config.randomizer.seed {
            Some(seed) => Randomizer::with_seed(seed),
            None => Randomizer::from_entropy(),
        };
        Self::with_layout(board, preview, config.timing.descent_interval(), randomizer)
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn preview(&self) -> &Grid {
        &self.preview
    }

    /// The piece that will fall after the current one
    pub fn next_piece(&self) -> Option<&Piece> {
        self.next.as_ref()
    }

    pub fn interval(&self) -> Duration {
        self.timer.interval()
    }

    /// Listen to cell and lock/clear events of the main board
    pub fn subscribe_board<O>(&mut self, observer: O) -> SubscriptionId
    where
        O: Observer + 'static,
    {
        self.board.subscribe(observer)
    }

    /// Listen to cell events of the preview grid
    pub fn subscribe_preview<O>(&mut self, observer: O) -> SubscriptionId
    where
        O: Observer + 'static,
    {
        self.preview.subscribe(observer)
    }

    /// Begin a fresh game. Ignored while a game is running or paused.
    /// A restart zeroes the score and line count.
    pub fn start(&mut self, now: Instant) {
        if matches!(self.state, GameState::Running | GameState::Paused) {
            return;
        }
        self.now = now;
        self.board.reset();
        self.preview.clear();
        self.next = None;
        self.score.reset();

        if self.board.spawn_random(&mut self.randomizer) == Placement::Obstructed {
            self.game_over();
            return;
        }
        self.deal_next();
        self.timer.start(now);
        self.state = GameState::Running;
        tracing::info!("game started, tick every {:?}", self.timer.interval());
    }

    pub fn pause(&mut self) {
        if self.state == GameState::Running {
            self.timer.stop();
            self.state = GameState::Paused;
            tracing::info!("paused");
        }
    }

    pub fn resume(&mut self, now: Instant) {
        if self.state == GameState::Paused {
            self.now = now;
            self.timer.start(now);
            self.state = GameState::Running;
            tracing::info!("resumed");
        }
    }

    /// The start/pause button: Idle or GameOver starts, Running pauses, Paused resumes
    pub fn toggle(&mut self, now: Instant) {
        match self.state {
            GameState::Idle | GameState::GameOver => self.start(now),
            GameState::Running => self.pause(),
            GameState::Paused => self.resume(now),
        }
    }

    /// Process an action
    pub fn process_action(&mut self, action: Action, now: Instant) {
        self.now = now;
        if action == Action::StartPause {
            self.toggle(now);
            return;
        }
        if self.state != GameState::Running {
            return;
        }
        match action {
            Action::MoveLeft => {
                self.board.move_left();
            }
            Action::MoveRight => {
                self.board.move_right();
            }
            Action::Rotate => {
                self.board.rotate();
            }
            Action::SoftDrop => {
                self.tick();
            }
            Action::StartPause => {}
        }
    }

    /// Advance the clock; runs at most one descent step when the timer is due
    pub fn update(&mut self, now: Instant) {
        self.now = now;
        if self.state == GameState::Running && self.timer.poll(now) {
            self.tick();
        }
    }

    /// One descent step. Only acts while running.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state != GameState::Running {
            return TickOutcome::Idle;
        }
        let outcome = self.board.tick();
        if let TickOutcome::Locked { lines } = outcome {
            self.on_locked(lines);
        }
        outcome
    }

    fn on_locked(&mut self, lines: u32) {
        self.timer.stop();
        if lines > 0 {
            let gained = self.score.add_clear(lines);
            tracing::debug!(
                "{} line(s) for {} points, score {} lines {}",
                lines,
                gained,
                self.score.points,
                self.score.lines
            );
        }
        self.hand_off();
    }

    /// Move the preview piece onto the board and deal a new one
    fn hand_off(&mut self) {
        let piece = match self.next.take() {
            Some(mut piece) => {
                piece.hide(&mut self.preview);
                piece
            }
            None => {
                let (x, y) = PREVIEW_ANCHOR;
                Piece::new(self.randomizer.next(), &self.preview, x, y)
            }
        };

        if self.board.place_piece(piece) == Placement::Obstructed {
            self.game_over();
            return;
        }
        self.deal_next();
        self.timer.start(self.now);
    }

    fn deal_next(&mut self) {
        let (x, y) = PREVIEW_ANCHOR;
        let mut piece = Piece::new(self.randomizer.next(), &self.preview, x, y);
        piece.show(&mut self.preview);
        self.next = Some(piece);
    }

    fn game_over(&mut self) {
        self.timer.stop();
        self.state = GameState::GameOver;
        tracing::info!(
            "game over: score {} lines {}",
            self.score.points,
            self.score.lines
        );
    }
}
