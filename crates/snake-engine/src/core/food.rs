use std::fmt::Write as _;

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::NoSpaceError;

use super::grid::{Cell, GridSize};

/// Seed for deterministic food placement.
///
/// Two sessions started with the same seed on the same grid, fed the same
/// inputs, place their food on the same cells. The seed is serialized as a
/// 16-digit lowercase hex string so it survives JSON tooling that reads
/// numbers as doubles.
///
/// # Example
///
/// ```
/// use rand::Rng as _;
/// use snake_engine::FoodSeed;
///
/// let seed: FoodSeed = rand::rng().random();
/// let pinned = FoodSeed::new(42);
/// assert_eq!(pinned.value(), 42);
/// # let _ = seed;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoodSeed(u64);

impl FoodSeed {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl Serialize for FoodSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut hex_str = String::with_capacity(16);
        write!(&mut hex_str, "{:016x}", self.0).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&hex_str)
    }
}

impl<'de> Deserialize<'de> for FoodSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        if hex_str.len() != 16 {
            return Err(serde::de::Error::custom(format!(
                "invalid hex: expected 16 characters, got {}",
                hex_str.len()
            )));
        }
        let num = u64::from_str_radix(&hex_str, 16)
            .map_err(|e| serde::de::Error::custom(format!("invalid hex: {hex_str} ({e})")))?;
        Ok(Self(num))
    }
}

impl Distribution<FoodSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> FoodSeed {
        FoodSeed(rng.random())
    }
}

/// The single food item on the board.
///
/// Food is always placed on a cell the caller reports as free, chosen
/// uniformly among all free cells.
#[derive(Debug, Clone)]
pub struct Food {
    cell: Cell,
    eaten: usize,
    rng: Pcg32,
}

impl Food {
    /// Creates the food and places it on a free cell.
    ///
    /// `is_occupied` reports the cells food must avoid (the snake's body).
    pub fn spawn<F>(seed: FoodSeed, grid: GridSize, is_occupied: F) -> Result<Self, NoSpaceError>
    where
        F: Fn(Cell) -> bool,
    {
        let mut food = Self {
            cell: Cell::new(0, 0),
            eaten: 0,
            rng: Pcg32::seed_from_u64(seed.0),
        };
        food.place(grid, is_occupied)?;
        Ok(food)
    }

    /// Relocates the food to a uniformly random free cell.
    ///
    /// Fails with [`NoSpaceError`] when every cell of the grid is occupied;
    /// the previous cell is kept in that case.
    pub fn place<F>(&mut self, grid: GridSize, is_occupied: F) -> Result<Cell, NoSpaceError>
    where
        F: Fn(Cell) -> bool,
    {
        let free = grid.cells().filter(|&cell| !is_occupied(cell)).count();
        if free == 0 {
            return Err(NoSpaceError);
        }
        let index = self.rng.random_range(0..free);
        let cell = grid
            .cells()
            .filter(|&cell| !is_occupied(cell))
            .nth(index)
            .ok_or(NoSpaceError)?;
        self.cell = cell;
        Ok(cell)
    }

    /// Returns true if `head` is on the food.
    #[must_use]
    pub fn is_consumed(&self, head: Cell) -> bool {
        head == self.cell
    }

    /// Counts one food as eaten.
    pub fn consume(&mut self) {
        self.eaten += 1;
    }

    #[must_use]
    pub fn cell(&self) -> Cell {
        self.cell
    }

    /// Number of food items eaten since the food was spawned.
    #[must_use]
    pub fn eaten(&self) -> usize {
        self.eaten
    }

    #[cfg(test)]
    pub(crate) fn set_cell(&mut self, cell: Cell) {
        self.cell = cell;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_food_avoids_excluded_cells() {
        let grid = GridSize::new(4, 4);
        let exclude = grid
            .cells()
            .filter(|cell| cell.x < 3)
            .collect::<HashSet<_>>();

        for seed in 0..50 {
            let food = Food::spawn(FoodSeed::new(seed), grid, |c| exclude.contains(&c)).unwrap();
            assert!(!exclude.contains(&food.cell()));
            assert_eq!(food.cell().x, 3);
        }
    }

    #[test]
    fn test_single_free_cell_is_chosen() {
        let grid = GridSize::new(3, 3);
        let free = Cell::new(1, 2);
        let food = Food::spawn(FoodSeed::new(7), grid, |c| c != free).unwrap();
        assert_eq!(food.cell(), free);
    }

    #[test]
    fn test_full_board_reports_no_space() {
        let grid = GridSize::new(3, 3);
        assert!(Food::spawn(FoodSeed::new(1), grid, |_| true).is_err());

        let mut food = Food::spawn(FoodSeed::new(1), grid, |_| false).unwrap();
        let before = food.cell();
        assert_eq!(food.place(grid, |_| true), Err(NoSpaceError));
        assert_eq!(food.cell(), before);
    }

    #[test]
    fn test_placement_is_deterministic_per_seed() {
        let grid = GridSize::new(20, 20);
        let mut a = Food::spawn(FoodSeed::new(99), grid, |_| false).unwrap();
        let mut b = Food::spawn(FoodSeed::new(99), grid, |_| false).unwrap();
        for _ in 0..10 {
            assert_eq!(a.place(grid, |_| false), b.place(grid, |_| false));
        }
    }

    #[test]
    fn test_is_consumed() {
        let grid = GridSize::new(5, 5);
        let food = Food::spawn(FoodSeed::new(3), grid, |_| false).unwrap();
        assert!(food.is_consumed(food.cell()));
        let elsewhere = grid.cells().find(|&c| c != food.cell()).unwrap();
        assert!(!food.is_consumed(elsewhere));
    }

    #[test]
    fn test_seed_serialization() {
        let seed = FoodSeed::new(0x0123_4567_89ab_cdef);
        let serialized = serde_json::to_string(&seed).unwrap();
        assert_eq!(serialized, "\"0123456789abcdef\"");

        let deserialized: FoodSeed = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, seed);

        assert!(serde_json::from_str::<FoodSeed>("\"abc\"").is_err());
        assert!(serde_json::from_str::<FoodSeed>("\"zzzzzzzzzzzzzzzz\"").is_err());
    }
}
