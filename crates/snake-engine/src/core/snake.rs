use std::collections::VecDeque;

use crate::CollisionError;

use super::grid::{Cell, Direction, GridSize};

/// The player-controlled snake.
///
/// The body is an ordered sequence of cells with the head at the front and
/// the tail at the back. Consecutive cells are always grid-adjacent and no
/// cell appears twice.
///
/// # Example
///
/// ```
/// use snake_engine::{Cell, Direction, GridSize, Snake};
///
/// let grid = GridSize::new(10, 10);
/// let mut snake = Snake::new(Cell::new(5, 5), Direction::Right, 1, grid);
///
/// snake.advance(grid, false).unwrap();
/// assert_eq!(snake.head(), Cell::new(6, 5));
/// assert_eq!(snake.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Cell>,
    direction: Direction,
}

impl Snake {
    /// Longest body a fresh snake may start with.
    pub const MAX_INITIAL_LENGTH: usize = 3;

    /// Creates a snake with its head at `head`, facing `direction`.
    ///
    /// The remaining segments are laid out behind the head. `length` is
    /// clamped to `1..=MAX_INITIAL_LENGTH`, and shortened further if the
    /// segments would leave the grid.
    #[must_use]
    pub fn new(head: Cell, direction: Direction, length: usize, grid: GridSize) -> Self {
        let length = length.clamp(1, Self::MAX_INITIAL_LENGTH);
        let mut body = VecDeque::with_capacity(length);
        body.push_back(head);
        while body.len() < length {
            let last = body[body.len() - 1];
            let Some(next) = last.step(direction.opposite(), grid) else {
                break;
            };
            body.push_back(next);
        }
        Self { body, direction }
    }

    #[must_use]
    pub fn head(&self) -> Cell {
        *self.body.front().expect("snake body is never empty")
    }

    #[must_use]
    pub fn tail(&self) -> Cell {
        *self.body.back().expect("snake body is never empty")
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; present for API completeness alongside [`Self::len`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Iterates over the body from head to tail.
    pub fn cells(&self) -> impl ExactSizeIterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    /// Returns true if `cell` is any body segment, head included.
    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Returns true if the snake may face `direction` on its next move.
    ///
    /// Reversing onto the neck is only allowed while the snake is a single cell.
    #[must_use]
    pub fn can_turn(&self, direction: Direction) -> bool {
        self.len() == 1 || !self.direction.is_opposite(direction)
    }

    /// Updates the facing direction, effective on the next move.
    ///
    /// Returns `false` and leaves the direction unchanged for a 180-degree
    /// reversal while the snake is longer than one cell.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if !self.can_turn(direction) {
            return false;
        }
        self.direction = direction;
        true
    }

    /// Computes the cell the head would enter on the next move.
    ///
    /// The wall check runs first: a move that leaves the grid is reported as
    /// [`CollisionError::WallCollision`] even if it would also hit the body.
    /// The tail segment does not count as an obstacle when it is about to be
    /// vacated, that is when `grow` is false.
    pub fn next_head(&self, grid: GridSize, grow: bool) -> Result<Cell, CollisionError> {
        let next = self
            .head()
            .step(self.direction, grid)
            .ok_or(CollisionError::WallCollision)?;
        let obstacles = if grow { self.len() } else { self.len() - 1 };
        if self.body.iter().take(obstacles).any(|&cell| cell == next) {
            return Err(CollisionError::SelfCollision);
        }
        Ok(next)
    }

    /// Moves the snake one cell in its current direction.
    ///
    /// On success the new head is prepended; the tail is dropped unless
    /// `grow` is true, in which case the length increases by one. On
    /// collision the snake is left untouched.
    pub fn advance(&mut self, grid: GridSize, grow: bool) -> Result<Cell, CollisionError> {
        let next = self.next_head(grid, grow)?;
        self.body.push_front(next);
        if !grow {
            self.body.pop_back();
        }
        Ok(next)
    }
}
