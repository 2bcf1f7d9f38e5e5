//! Square board of tile values.
//!
//! A cell holds 0 when empty, otherwise a power of two ≥ 2. Rows are stored
//! top to bottom, cells left to right.

use serde::{Serialize, Deserialize};
use std::fmt;

use crate::config::game::{MAX_TILE, MIN_GRID_SIZE};
use crate::game::error::GridError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u64>>", into = "Vec<Vec<u64>>")]
pub struct Grid {
    cells: Vec<Vec<u64>>,
}

/// Whether `value` may appear in a cell.
pub fn is_valid_cell(value: u64) -> bool {
    value == 0 || (value >= 2 && value <= MAX_TILE && value.is_power_of_two())
}

/// Whether two neighbouring cells merge when slid together.
pub fn can_merge(a: u64, b: u64) -> bool {
    a != 0 && a == b && a < MAX_TILE
}

impl Grid {
    /// Create an empty `size`×`size` grid.
    ///
    /// Panics if `size` is below the minimum board size.
    pub fn new(size: usize) -> Self {
        assert!(size >= MIN_GRID_SIZE, "grid size {} is below the minimum of {}", size, MIN_GRID_SIZE);
        Grid { cells: vec![vec![0; size]; size] }
    }

    /// Build a grid from rows, validating shape and cell values.
    pub fn from_rows(rows: Vec<Vec<u64>>) -> Result<Self, GridError> {
        let size = rows.len();
        if size < MIN_GRID_SIZE {
            return Err(GridError::TooSmall(size));
        }
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != size {
                return Err(GridError::NotSquare { row, len: cells.len(), expected: size });
            }
            if let Some((col, &value)) = cells.iter().enumerate().find(|(_, v)| !is_valid_cell(**v)) {
                return Err(GridError::InvalidTile { row, col, value });
            }
        }
        Ok(Grid { cells: rows })
    }

    /// Rows produced by the engine itself are square and valid by construction.
    pub(crate) fn from_rows_unchecked(rows: Vec<Vec<u64>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == rows.len()));
        Grid { cells: rows }
    }

    pub fn size(&self) -> usize {
        self.cells.len()
    }

    pub fn get(&self, row: usize, col: usize) -> u64 {
        self.cells[row][col]
    }

    pub fn rows(&self) -> &[Vec<u64>] {
        &self.cells
    }

    /// Coordinates of every empty cell, in row-major order.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        self.cells.iter().enumerate()
            .flat_map(|(row, cells)| cells.iter().enumerate().filter_map(move |(col, value)| {
                if *value == 0 {
                    Some((row, col))
                } else {
                    None
                }
            }))
            .collect()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|value| *value != 0)
    }

    pub fn count_tiles(&self) -> usize {
        self.cells.iter().flatten().filter(|value| **value != 0).count()
    }

    pub fn tile_sum(&self) -> u64 {
        self.cells.iter().flatten().fold(0u64, |sum, value| sum.saturating_add(*value))
    }

    pub fn max_tile(&self) -> u64 {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Copy of this grid with one cell replaced.
    pub fn with_tile(&self, row: usize, col: usize, value: u64) -> Grid {
        assert!(is_valid_cell(value), "invalid tile value {}", value);
        let mut cells = self.cells.clone();
        cells[row][col] = value;
        Grid { cells }
    }

    /// Swap rows and columns.
    pub fn transpose(&self) -> Grid {
        Grid { cells: transpose(&self.cells) }
    }

    /// Mirror every row left to right.
    pub fn reverse_rows(&self) -> Grid {
        Grid { cells: reverse_rows(&self.cells) }
    }
}

pub(crate) fn transpose<T: Copy>(cells: &[Vec<T>]) -> Vec<Vec<T>> {
    let size = cells.len();
    (0..size).map(|col| cells.iter().map(|row| row[col]).collect()).collect()
}

pub(crate) fn reverse_rows<T: Copy>(cells: &[Vec<T>]) -> Vec<Vec<T>> {
    cells.iter().map(|row| row.iter().rev().copied().collect()).collect()
}

impl TryFrom<Vec<Vec<u64>>> for Grid {
    type Error = GridError;

    fn try_from(rows: Vec<Vec<u64>>) -> Result<Self, Self::Error> {
        Grid::from_rows(rows)
    }
}

impl From<Grid> for Vec<Vec<u64>> {
    fn from(grid: Grid) -> Self {
        grid.cells
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for value in row {
                if *value == 0 {
                    write!(f, "{:>6}", ".")?;
                } else {
                    write!(f, "{:>6}", value)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new(4);
        assert_eq!(grid.size(), 4);
        assert!(grid.rows().iter().all(|row| row.len() == 4));
        assert_eq!(grid.count_tiles(), 0);
        assert_eq!(grid.empty_cells().len(), 16);
    }

    #[test]
    #[should_panic]
    fn test_new_grid_rejects_tiny_size() {
        Grid::new(1);
    }

    #[test]
    fn test_from_rows_rejects_malformed_input() {
        assert_eq!(Grid::from_rows(vec![vec![0]]), Err(GridError::TooSmall(1)));
        assert_eq!(
            Grid::from_rows(vec![vec![0, 0], vec![0]]),
            Err(GridError::NotSquare { row: 1, len: 1, expected: 2 })
        );
        assert_eq!(
            Grid::from_rows(vec![vec![2, 3], vec![0, 0]]),
            Err(GridError::InvalidTile { row: 0, col: 1, value: 3 })
        );
        assert_eq!(
            Grid::from_rows(vec![vec![0, 0], vec![1, 0]]),
            Err(GridError::InvalidTile { row: 1, col: 0, value: 1 })
        );
    }

    #[test]
    fn test_tile_ceiling() {
        assert!(is_valid_cell(MAX_TILE));
        assert!(!is_valid_cell(MAX_TILE << 1));
        assert_eq!(
            Grid::from_rows(vec![vec![1 << 63, 1 << 63], vec![0, 0]]),
            Err(GridError::InvalidTile { row: 0, col: 0, value: 1 << 63 })
        );
        assert!(serde_json::from_str::<Grid>(&format!("[[{},0],[0,0]]", 1u64 << 63)).is_err());

        assert!(can_merge(MAX_TILE / 2, MAX_TILE / 2));
        assert!(!can_merge(MAX_TILE, MAX_TILE));
        assert!(!can_merge(0, 0));
        assert!(!can_merge(2, 4));
    }

    #[test]
    fn test_empty_cells_row_major() {
        let grid = Grid::from_rows(vec![vec![2, 0], vec![0, 4]]).unwrap();
        assert_eq!(grid.empty_cells(), vec![(0, 1), (1, 0)]);
    }

    #[test]
    fn test_transforms() {
        let grid = Grid::from_rows(vec![
            vec![2, 4, 8],
            vec![0, 16, 0],
            vec![32, 0, 64],
        ]).unwrap();
        assert_eq!(grid.transpose().rows(), &[vec![2, 0, 32], vec![4, 16, 0], vec![8, 0, 64]]);
        assert_eq!(grid.reverse_rows().rows(), &[vec![8, 4, 2], vec![0, 16, 0], vec![64, 0, 32]]);
        assert_eq!(grid.transpose().transpose(), grid);
        assert_eq!(grid.reverse_rows().reverse_rows(), grid);
    }

    #[test]
    fn test_with_tile_leaves_original() {
        let grid = Grid::new(2);
        let next = grid.with_tile(1, 0, 4);
        assert_eq!(grid.get(1, 0), 0);
        assert_eq!(next.get(1, 0), 4);
    }

    #[test]
    fn test_serde_validates() {
        let grid: Grid = serde_json::from_str("[[2,0],[0,4]]").unwrap();
        assert_eq!(grid.get(1, 1), 4);
        assert_eq!(serde_json::to_string(&grid).unwrap(), "[[2,0],[0,4]]");
        assert!(serde_json::from_str::<Grid>("[[2,0],[0,5]]").is_err());
        assert!(serde_json::from_str::<Grid>("[[2,0,0],[0,4,0]]").is_err());
    }
}
