use std::time::Duration;

use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::{Direction, Food, FoodSeed, GridSize, Snake};

use super::{
    game_config::GameConfig,
    game_stats::{GameOutcome, SessionRecorder, SessionStats},
};

/// Lifecycle of a play-through.
///
/// ```text
/// Ready --start--> Running --tick(collision)--> GameOver --restart--> Ready
///                  Running <--toggle pause--> Paused
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Ready,
    Running,
    Paused,
    GameOver(GameOutcome),
}

/// Player intent, decoded from whatever input device drives the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Start,
    TogglePause,
    Restart,
    Quit,
}

/// What a single call to [`GameSession::tick`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum TickEvent {
    /// Not running; nothing advanced.
    Idle,
    Moved,
    Ate,
    /// The session just ended and produced its final record.
    Ended(SessionStats),
}

/// The snake game state machine.
///
/// Owns the snake, the food, and the statistics recorder of the current
/// session. It has no notion of wall-clock time: the caller decides when a
/// tick happens and how long it lasted.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use snake_engine::{Command, FoodSeed, GameConfig, GameSession, TickEvent};
///
/// let config = GameConfig::new(10, 10).with_seed(FoodSeed::new(7));
/// let mut session = GameSession::new(config);
/// session.handle(Command::Start);
///
/// let event = session.tick(Duration::from_millis(150));
/// assert_ne!(event, TickEvent::Idle);
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    seeds: Pcg32,
    snake: Snake,
    food: Option<Food>,
    recorder: SessionRecorder,
    state: SessionState,
    pending_turn: Option<Direction>,
    last_result: Option<SessionStats>,
}

impl GameSession {
    /// Creates a session in the [`SessionState::Ready`] state with the board laid out.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let seeds = match config.seed {
            Some(seed) => Pcg32::seed_from_u64(seed.value()),
            None => Pcg32::from_rng(&mut rand::rng()),
        };
        let snake = Snake::new(
            config.grid.center(),
            Direction::Right,
            config.initial_length,
            config.grid,
        );
        let recorder = SessionRecorder::start(FoodSeed::new(0), snake.len());
        let mut this = Self {
            config,
            seeds,
            snake,
            food: None,
            recorder,
            state: SessionState::Ready,
            pending_turn: None,
            last_result: None,
        };
        this.lay_out_board();
        this
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn grid(&self) -> GridSize {
        self.config.grid
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// The food, or `None` once the board has no free cell left.
    #[must_use]
    pub fn food(&self) -> Option<&Food> {
        self.food.as_ref()
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.recorder.score()
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.recorder.elapsed()
    }

    #[must_use]
    pub fn recorder(&self) -> &SessionRecorder {
        &self.recorder
    }

    /// Record of the most recently ended session, if any.
    #[must_use]
    pub fn last_result(&self) -> Option<&SessionStats> {
        self.last_result.as_ref()
    }

    /// Applies a command that is valid in the current state.
    ///
    /// Returns `true` if the command changed anything. Commands that make no
    /// sense in the current state are ignored. [`Command::Quit`] is left to
    /// the caller, which owns the loop.
    pub fn handle(&mut self, command: Command) -> bool {
        match (command, self.state) {
            (Command::Turn(direction), SessionState::Running | SessionState::Paused) => {
                self.request_turn(direction)
            }
            (Command::Start, SessionState::Ready) => {
                self.start();
                true
            }
            (Command::TogglePause, SessionState::Running) => {
                self.state = SessionState::Paused;
                true
            }
            (Command::TogglePause, SessionState::Paused) => {
                self.state = SessionState::Running;
                true
            }
            (Command::Restart, SessionState::GameOver(_)) => {
                self.lay_out_board();
                self.state = SessionState::Ready;
                true
            }
            _ => false,
        }
    }

    /// Buffers a turn for the next tick.
    ///
    /// A request is valid if it is not a reversal of the direction the snake
    /// will move with at the next tick. Among several valid requests in one
    /// tick, the last one wins.
    fn request_turn(&mut self, direction: Direction) -> bool {
        if !self.snake.can_turn(direction) {
            log::debug!("ignoring reversal to {direction:?}");
            return false;
        }
        self.pending_turn = Some(direction);
        true
    }

    fn lay_out_board(&mut self) {
        let seed = self.seeds.random::<FoodSeed>();
        let grid = self.config.grid;
        let snake = Snake::new(
            grid.center(),
            Direction::Right,
            self.config.initial_length,
            grid,
        );
        self.food = Food::spawn(seed, grid, |cell| snake.occupies(cell)).ok();
        self.recorder = SessionRecorder::start(seed, snake.len());
        self.snake = snake;
        self.pending_turn = None;
    }

    fn start(&mut self) {
        // Restart the clock; the layout was prepared when entering Ready.
        self.recorder = SessionRecorder::start(self.recorder.seed(), self.snake.len());
        self.state = SessionState::Running;
        log::info!(
            "session started on a {}x{} grid",
            self.config.grid.width,
            self.config.grid.height
        );
    }

    /// Advances the game by one tick of length `delta`.
    ///
    /// Applies the buffered turn, moves the snake, and handles food. A
    /// collision or a full board ends the session and returns its record.
    pub fn tick(&mut self, delta: Duration) -> TickEvent {
        if !self.state.is_running() {
            return TickEvent::Idle;
        }

        if let Some(direction) = self.pending_turn.take() {
            self.snake.set_direction(direction);
        }
        self.recorder.on_tick(self.snake.direction(), delta);

        let grid = self.config.grid;
        let Some(food) = self.food.as_mut() else {
            return self.end(GameOutcome::BoardFull);
        };
        let grow = match self.snake.next_head(grid, false) {
            Ok(next) => food.is_consumed(next),
            Err(error) => return self.end(error.into()),
        };
        if let Err(error) = self.snake.advance(grid, grow) {
            return self.end(error.into());
        }
        self.recorder.on_length(self.snake.len());

        if !grow {
            return TickEvent::Moved;
        }

        food.consume();
        self.recorder.on_food_consumed();
        let snake = &self.snake;
        if food.place(grid, |cell| snake.occupies(cell)).is_err() {
            self.food = None;
            return self.end(GameOutcome::BoardFull);
        }
        TickEvent::Ate
    }

    fn end(&mut self, outcome: GameOutcome) -> TickEvent {
        self.state = SessionState::GameOver(outcome);
        let stats = self.recorder.finalize(outcome);
        log::info!(
            "session ended: {outcome}, score {} in {:.1}s",
            stats.score,
            stats.duration_seconds
        );
        self.last_result = Some(stats.clone());
        TickEvent::Ended(stats)
    }
}

#[cfg(test)]
mod tests {
    use crate::Cell;

    use super::*;

    const TICK: Duration = Duration::from_millis(100);

    fn running_session(width: usize, height: usize) -> GameSession {
        let config = GameConfig::new(width, height).with_seed(FoodSeed::new(11));
        let mut session = GameSession::new(config);
        assert!(session.handle(Command::Start));
        session
    }

    /// Moves the food somewhere harmless so movement tests stay predictable.
    fn park_food(session: &mut GameSession, cell: Cell) {
        session.food.as_mut().unwrap().set_cell(cell);
    }

    #[test]
    fn test_starts_ready_with_centered_snake() {
        let session = GameSession::new(GameConfig::new(10, 10).with_seed(FoodSeed::new(1)));
        assert_eq!(session.state(), SessionState::Ready);
        assert_eq!(session.snake().head(), Cell::new(5, 5));
        assert_eq!(session.snake().direction(), Direction::Right);
        let food = session.food().unwrap();
        assert!(!session.snake().occupies(food.cell()));
    }

    #[test]
    fn test_tick_is_idle_unless_running() {
        let mut session = GameSession::new(GameConfig::new(10, 10));
        assert_eq!(session.tick(TICK), TickEvent::Idle);

        session.handle(Command::Start);
        session.handle(Command::TogglePause);
        assert_eq!(session.state(), SessionState::Paused);
        assert_eq!(session.tick(TICK), TickEvent::Idle);
        assert_eq!(session.snake().head(), Cell::new(5, 5));

        session.handle(Command::TogglePause);
        assert_eq!(session.state(), SessionState::Running);
    }

    #[test]
    fn test_three_ticks_straight_right() {
        let mut session = running_session(10, 10);
        park_food(&mut session, Cell::new(0, 0));
        for _ in 0..3 {
            assert_eq!(session.tick(TICK), TickEvent::Moved);
        }
        assert_eq!(session.snake().head(), Cell::new(8, 5));
        assert_eq!(session.snake().len(), 1);
    }

    #[test]
    fn test_eating_grows_by_one() {
        let mut session = running_session(10, 10);
        park_food(&mut session, Cell::new(6, 5));

        assert_eq!(session.tick(TICK), TickEvent::Ate);
        assert_eq!(session.snake().head(), Cell::new(6, 5));
        assert_eq!(session.snake().len(), 2);
        assert_eq!(session.score(), 1);

        let food = session.food().unwrap();
        assert!(!session.snake().occupies(food.cell()));
        assert_eq!(food.eaten(), 1);
    }

    #[test]
    fn test_wall_collision_ends_session() {
        let mut session = running_session(10, 10);
        park_food(&mut session, Cell::new(0, 0));
        session.handle(Command::Turn(Direction::Left));
        for _ in 0..5 {
            assert_eq!(session.tick(TICK), TickEvent::Moved);
        }
        assert_eq!(session.snake().head(), Cell::new(0, 5));

        let TickEvent::Ended(stats) = session.tick(TICK) else {
            panic!("expected the session to end");
        };
        assert_eq!(stats.outcome, GameOutcome::WallCollision);
        assert_eq!(stats.ticks, 6);
        assert_eq!(
            session.state(),
            SessionState::GameOver(GameOutcome::WallCollision)
        );
        assert_eq!(session.last_result(), Some(&stats));
        assert_eq!(session.tick(TICK), TickEvent::Idle);
    }

    #[test]
    fn test_self_collision_ends_session() {
        let config = GameConfig::new(10, 10)
            .with_seed(FoodSeed::new(2))
            .with_initial_length(3);
        let mut session = GameSession::new(config);
        session.handle(Command::Start);
        park_food(&mut session, Cell::new(6, 5));
        assert_eq!(session.tick(TICK), TickEvent::Ate);
        park_food(&mut session, Cell::new(7, 5));
        assert_eq!(session.tick(TICK), TickEvent::Ate);
        park_food(&mut session, Cell::new(0, 0));
        assert_eq!(session.snake().len(), 5);

        for direction in [Direction::Down, Direction::Left, Direction::Up] {
            session.handle(Command::Turn(direction));
            assert_ne!(session.tick(TICK), TickEvent::Idle);
        }
        assert_eq!(
            session.state(),
            SessionState::GameOver(GameOutcome::SelfCollision)
        );
    }

    #[test]
    fn test_last_valid_turn_wins() {
        let config = GameConfig::new(10, 10)
            .with_seed(FoodSeed::new(3))
            .with_initial_length(2);
        let mut session = GameSession::new(config);
        session.handle(Command::Start);
        park_food(&mut session, Cell::new(0, 0));

        assert!(session.handle(Command::Turn(Direction::Up)));
        assert!(session.handle(Command::Turn(Direction::Down)));
        assert!(!session.handle(Command::Turn(Direction::Left)));
        session.tick(TICK);

        assert_eq!(session.snake().direction(), Direction::Down);
        assert_eq!(session.snake().head(), Cell::new(5, 6));
    }

    #[test]
    fn test_turns_buffered_while_paused() {
        let mut session = running_session(10, 10);
        park_food(&mut session, Cell::new(0, 0));
        session.handle(Command::TogglePause);
        assert!(session.handle(Command::Turn(Direction::Up)));
        assert_eq!(session.snake().direction(), Direction::Right);

        session.handle(Command::TogglePause);
        session.tick(TICK);
        assert_eq!(session.snake().head(), Cell::new(5, 4));
    }

    #[test]
    fn test_direction_changes_recorded() {
        let mut session = running_session(10, 10);
        park_food(&mut session, Cell::new(0, 0));
        session.tick(TICK);
        session.handle(Command::Turn(Direction::Up));
        session.tick(TICK);
        session.handle(Command::Turn(Direction::Up));
        session.tick(TICK);
        assert_eq!(session.recorder().direction_changes(), 1);
        assert_eq!(session.elapsed(), TICK * 3);
    }

    #[test]
    fn test_restart_only_from_game_over() {
        let mut session = running_session(10, 10);
        assert!(!session.handle(Command::Restart));
        assert!(!session.handle(Command::Start));

        park_food(&mut session, Cell::new(0, 0));
        while !session.state().is_game_over() {
            session.tick(TICK);
        }
        assert!(session.handle(Command::Restart));
        assert_eq!(session.state(), SessionState::Ready);
        assert_eq!(session.snake().head(), Cell::new(5, 5));
        assert_eq!(session.score(), 0);
        assert!(session.last_result().is_some());
    }

    #[test]
    fn test_filling_the_board_ends_as_board_full() {
        // A 2x2 board: the length-3 snake leaves exactly one free cell.
        let config = GameConfig::new(2, 2)
            .with_seed(FoodSeed::new(5))
            .with_initial_length(3);
        let mut session = GameSession::new(config);
        session.handle(Command::Start);
        assert_eq!(session.snake().len(), 2);

        // Whichever free cell the food starts on, this route eats everything.
        let mut outcome = None;
        for direction in [Direction::Up, Direction::Left, Direction::Down] {
            session.handle(Command::Turn(direction));
            if let TickEvent::Ended(stats) = session.tick(TICK) {
                outcome = Some(stats.outcome);
                break;
            }
        }
        assert_eq!(outcome, Some(GameOutcome::BoardFull));
        assert!(session.food().is_none());
    }

    #[test]
    fn test_same_seed_same_food() {
        let a = GameSession::new(GameConfig::new(12, 12).with_seed(FoodSeed::new(77)));
        let b = GameSession::new(GameConfig::new(12, 12).with_seed(FoodSeed::new(77)));
        assert_eq!(a.food().unwrap().cell(), b.food().unwrap().cell());
        assert_eq!(a.recorder().seed(), b.recorder().seed());
    }
}
