use std::{
    io,
    time::{Duration, Instant},
};

use crate::{Cell, GridSize};

use super::{
    game_session::{Command, GameSession, SessionState, TickEvent},
    game_stats::SessionStats,
};

/// How long to wait for input while nothing is scheduled.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// What occupies a cell when drawing the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    SnakeHead,
    SnakeBody,
    Food,
}

/// Non-board information presented with each frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Hud<'a> {
    pub grid: GridSize,
    pub state: SessionState,
    pub score: usize,
    pub length: usize,
    pub elapsed: Duration,
    pub best_score: Option<usize>,
    pub last_result: Option<&'a SessionStats>,
    /// Message of the last failed save, until a later save succeeds.
    pub persistence_error: Option<&'a str>,
}

/// Display and input device driving a [`GameLoop`].
///
/// Each frame is a series of [`draw_cell`](Self::draw_cell) calls for the
/// occupied cells followed by one [`present`](Self::present). Cells not
/// drawn since the previous `present` are empty.
pub trait Renderer {
    fn draw_cell(&mut self, cell: Cell, kind: CellKind);

    fn present(&mut self, hud: &Hud<'_>) -> io::Result<()>;

    /// Waits up to `timeout` for the next player command.
    fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<Command>>;
}

/// Destination of completed session records.
pub trait StatsSink {
    type Error: std::error::Error;

    /// Stores a completed session.
    ///
    /// On failure the record must be kept in memory so that a later
    /// [`record`](Self::record) or [`flush`](Self::flush) can retry.
    fn record(&mut self, stats: &SessionStats) -> Result<(), Self::Error>;

    /// Retries any write left pending by an earlier failure.
    fn flush(&mut self) -> Result<(), Self::Error>;

    /// Best score stored so far, shown while playing.
    fn best_score(&self) -> Option<usize>;
}

/// Fixed-interval driver for a [`GameSession`].
///
/// Runs input, tick, and render in strict sequence on the calling thread.
/// A tick fires whenever the configured interval has elapsed since the
/// previous one while the session is running; a frame is presented after
/// anything changed; otherwise the loop waits for input until the next tick
/// is due.
///
/// Sessions that end are persisted immediately through the [`StatsSink`].
/// Quitting discards the session in progress.
#[derive(Debug)]
pub struct GameLoop<R, S> {
    session: GameSession,
    renderer: R,
    sink: S,
    last_tick: Instant,
    dirty: bool,
    should_exit: bool,
    persistence_error: Option<String>,
}

impl<R, S> GameLoop<R, S>
where
    R: Renderer,
    S: StatsSink,
{
    pub fn new(session: GameSession, renderer: R, sink: S) -> Self {
        Self {
            session,
            renderer,
            sink,
            last_tick: Instant::now(),
            dirty: true,
            should_exit: false,
            persistence_error: None,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn persistence_error(&self) -> Option<&str> {
        self.persistence_error.as_deref()
    }

    pub fn into_parts(self) -> (GameSession, R, S) {
        (self.session, self.renderer, self.sink)
    }

    /// Runs until a [`Command::Quit`] arrives.
    pub fn run(&mut self) -> io::Result<()> {
        while !self.should_exit {
            let interval = self.session.config().tick_interval;
            let running = self.session.state().is_running();

            if running && self.last_tick.elapsed() >= interval {
                self.last_tick = Instant::now();
                self.step(interval);
            }

            if self.dirty {
                self.render()?;
            }

            let timeout = if self.session.state().is_running() {
                (self.last_tick + interval).saturating_duration_since(Instant::now())
            } else {
                IDLE_POLL
            };
            if let Some(command) = self.renderer.poll_input(timeout)? {
                self.apply(command);
            }
        }
        self.shutdown();
        Ok(())
    }

    fn step(&mut self, delta: Duration) {
        match self.session.tick(delta) {
            TickEvent::Idle => return,
            TickEvent::Moved | TickEvent::Ate => {}
            TickEvent::Ended(stats) => self.persist(&stats),
        }
        self.dirty = true;
    }

    fn apply(&mut self, command: Command) {
        if command == Command::Quit {
            self.should_exit = true;
            return;
        }
        if !self.session.handle(command) {
            return;
        }
        if matches!(command, Command::Start | Command::TogglePause) {
            // A fresh interval starts when the clock (re)starts.
            self.last_tick = Instant::now();
        }
        self.dirty = true;
    }

    fn persist(&mut self, stats: &SessionStats) {
        match self.sink.record(stats) {
            Ok(()) => self.persistence_error = None,
            Err(error) => {
                log::warn!("failed to save session statistics: {error}");
                self.persistence_error = Some(error.to_string());
            }
        }
    }

    fn shutdown(&mut self) {
        if matches!(
            self.session.state(),
            SessionState::Running | SessionState::Paused
        ) {
            log::info!("discarding unfinished session");
        }
        match self.sink.flush() {
            Ok(()) => self.persistence_error = None,
            Err(error) => {
                log::warn!("failed to save pending statistics on exit: {error}");
                self.persistence_error = Some(error.to_string());
            }
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let session = &self.session;
        let snake = session.snake();
        if let Some(food) = session.food() {
            self.renderer.draw_cell(food.cell(), CellKind::Food);
        }
        for (i, cell) in snake.cells().enumerate() {
            let kind = if i == 0 {
                CellKind::SnakeHead
            } else {
                CellKind::SnakeBody
            };
            self.renderer.draw_cell(cell, kind);
        }

        let hud = Hud {
            grid: session.grid(),
            state: session.state(),
            score: session.score(),
            length: snake.len(),
            elapsed: session.elapsed(),
            best_score: self.sink.best_score(),
            last_result: session.last_result(),
            persistence_error: self.persistence_error.as_deref(),
        };
        self.renderer.present(&hud)?;
        self.dirty = false;
        Ok(())
    }
}
