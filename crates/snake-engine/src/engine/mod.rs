//! Game rules, session lifecycle, and the real-time loop.
//!
//! - [`GameSession`] - State machine for one play-through at a time (ready, running, paused, game over)
//! - [`SessionRecorder`] - Per-tick metrics for the session in progress
//! - [`SessionStats`] - Immutable record of a completed session
//! - [`GameConfig`] - Grid size, speed, and seed of a session
//! - [`GameLoop`] - Fixed-interval driver over a [`Renderer`] and a [`StatsSink`]
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`]; the board is laid out in the ready state
//! 2. [`Command::Start`] begins the run and the clock
//! 3. Each [`GameSession::tick`] applies the buffered turn and moves the snake one cell
//! 4. Eating food grows the snake and relocates the food
//! 5. A collision or a full board ends the session with a [`SessionStats`]
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use snake_engine::{Command, Direction, FoodSeed, GameConfig, GameSession, TickEvent};
//!
//! let mut session = GameSession::new(GameConfig::new(8, 8).with_seed(FoodSeed::new(3)));
//! session.handle(Command::Start);
//! session.handle(Command::Turn(Direction::Up));
//!
//! let stats = loop {
//!     if let TickEvent::Ended(stats) = session.tick(Duration::from_millis(100)) {
//!         break stats;
//!     }
//! };
//! assert!(stats.outcome.is_wall_collision() || stats.outcome.is_board_full());
//! ```

pub use self::{game_config::*, game_loop::*, game_session::*, game_stats::*};

mod game_config;
mod game_loop;
mod game_session;
mod game_stats;
