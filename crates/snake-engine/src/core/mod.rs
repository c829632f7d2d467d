//! Board primitives: grid geometry, the snake, and the food.
//!
//! These types know nothing about time, input, or persistence. They are
//! driven by [`GameSession`](crate::GameSession), one move per tick.

pub use self::{food::*, grid::*, snake::*};

mod food;
mod grid;
mod snake;
