use serde::{Deserialize, Serialize};

/// Facing direction of the snake.
///
/// `Up` points toward row 0, `Left` toward column 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Returns the direction pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns true if turning from `self` to `other` is a 180-degree turn.
    #[must_use]
    pub fn is_opposite(self, other: Self) -> bool {
        self.opposite() == other
    }

    /// Unit vector `(dx, dy)` of this direction.
    #[must_use]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// A single position on the board, in cell units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

impl Cell {
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Returns the neighbouring cell in `direction`.
    ///
    /// Returns `None` if the neighbour lies outside `grid`.
    #[must_use]
    pub fn step(self, direction: Direction, grid: GridSize) -> Option<Self> {
        let (dx, dy) = direction.delta();
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        let cell = Self { x, y };
        grid.contains(cell).then_some(cell)
    }

    /// Returns true if `other` shares an edge with this cell.
    #[must_use]
    pub fn is_adjacent(self, other: Self) -> bool {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y) == 1
    }
}

/// Board dimensions in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: usize,
    pub height: usize,
}

impl GridSize {
    #[must_use]
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub const fn cell_count(self) -> usize {
        self.width * self.height
    }

    #[must_use]
    pub const fn contains(self, cell: Cell) -> bool {
        cell.x < self.width && cell.y < self.height
    }

    #[must_use]
    pub const fn center(self) -> Cell {
        Cell::new(self.width / 2, self.height / 2)
    }

    /// Iterates over every cell in row-major order.
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Cell::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_directions() {
        assert!(Direction::Up.is_opposite(Direction::Down));
        assert!(Direction::Down.is_opposite(Direction::Up));
        assert!(Direction::Left.is_opposite(Direction::Right));
        assert!(Direction::Right.is_opposite(Direction::Left));

        assert!(!Direction::Up.is_opposite(Direction::Left));
        assert!(!Direction::Right.is_opposite(Direction::Right));
    }

    #[test]
    fn test_step_inside_grid() {
        let grid = GridSize::new(10, 10);
        let cell = Cell::new(5, 5);
        assert_eq!(cell.step(Direction::Up, grid), Some(Cell::new(5, 4)));
        assert_eq!(cell.step(Direction::Down, grid), Some(Cell::new(5, 6)));
        assert_eq!(cell.step(Direction::Left, grid), Some(Cell::new(4, 5)));
        assert_eq!(cell.step(Direction::Right, grid), Some(Cell::new(6, 5)));
    }

    #[test]
    fn test_step_reaches_adjacent_cell() {
        let grid = GridSize::new(3, 3);
        for cell in grid.cells() {
            for dir in Direction::ALL {
                if let Some(next) = cell.step(dir, grid) {
                    assert!(next.is_adjacent(cell));
                    assert_eq!(next.step(dir.opposite(), grid), Some(cell));
                }
            }
        }
    }

    #[test]
    fn test_step_off_every_edge() {
        let grid = GridSize::new(10, 8);
        assert_eq!(Cell::new(0, 3).step(Direction::Left, grid), None);
        assert_eq!(Cell::new(9, 3).step(Direction::Right, grid), None);
        assert_eq!(Cell::new(4, 0).step(Direction::Up, grid), None);
        assert_eq!(Cell::new(4, 7).step(Direction::Down, grid), None);
    }

    #[test]
    fn test_cells_row_major() {
        let grid = GridSize::new(3, 2);
        let cells = grid.cells().collect::<Vec<_>>();
        assert_eq!(cells.len(), grid.cell_count());
        assert_eq!(cells[0], Cell::new(0, 0));
        assert_eq!(cells[2], Cell::new(2, 0));
        assert_eq!(cells[3], Cell::new(0, 1));
    }

    #[test]
    fn test_direction_serialization() {
        let json = serde_json::to_string(&Direction::Left).unwrap();
        assert_eq!(json, "\"left\"");
        let back: Direction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Direction::Left);
    }
}
