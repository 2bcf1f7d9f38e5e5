//! Tile movement system.
//!
//! Every direction is reduced to sliding rows to the left: the grid is first
//! oriented (identity, row reversal, transpose, or transpose then reversal),
//! each row is slid and merged, and the result is oriented back.

use crate::game::grid::{Grid, can_merge, reverse_rows, transpose};
use crate::game::types::{Direction, MergeMask, MoveResult};

/// Result of sliding a single row to the left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSlide {
    pub cells: Vec<u64>,
    pub merged: Vec<bool>,
    pub gained: u64,
}

/// Slide one row to the left, merging equal neighbours once per move.
///
/// The scan runs once, left to right, so `[2, 2, 2, 2]` becomes `[4, 4, 0, 0]`.
/// Tiles already at the ceiling only slide.
pub fn slide_row_left(row: &[u64]) -> RowSlide {
    let dense: Vec<u64> = row.iter().copied().filter(|value| *value != 0).collect();
    let mut cells = Vec::with_capacity(row.len());
    let mut merged = Vec::with_capacity(row.len());
    let mut gained: u64 = 0;

    let mut i = 0;
    while i < dense.len() {
        if i + 1 < dense.len() && can_merge(dense[i], dense[i + 1]) {
            let value = dense[i] * 2;
            cells.push(value);
            merged.push(true);
            gained = gained.saturating_add(value);
            i += 2;
        } else {
            cells.push(dense[i]);
            merged.push(false);
            i += 1;
        }
    }

    cells.resize(row.len(), 0);
    merged.resize(row.len(), false);
    RowSlide { cells, merged, gained }
}

/// Rotate/reflect `cells` so that `direction` becomes a left slide.
fn orient<T: Copy>(cells: &[Vec<T>], direction: Direction) -> Vec<Vec<T>> {
    match direction {
        Direction::Left => cells.to_vec(),
        Direction::Right => reverse_rows(cells),
        Direction::Up => transpose(cells),
        Direction::Down => reverse_rows(&transpose(cells)),
    }
}

/// Inverse of [`orient`].
fn restore<T: Copy>(cells: &[Vec<T>], direction: Direction) -> Vec<Vec<T>> {
    match direction {
        Direction::Left => cells.to_vec(),
        Direction::Right => reverse_rows(cells),
        Direction::Up => transpose(cells),
        Direction::Down => transpose(&reverse_rows(cells)),
    }
}

/// Compute the grid after moving every tile toward `direction`.
///
/// The input grid is never modified. When nothing can slide or merge the
/// returned grid equals the input, the gained score is 0 and the merge mask
/// is clear.
pub fn move_grid(grid: &Grid, direction: Direction) -> MoveResult {
    let oriented = orient(grid.rows(), direction);

    let mut cells = Vec::with_capacity(oriented.len());
    let mut merged = Vec::with_capacity(oriented.len());
    let mut gained_score: u64 = 0;
    for row in &oriented {
        let slide = slide_row_left(row);
        gained_score = gained_score.saturating_add(slide.gained);
        cells.push(slide.cells);
        merged.push(slide.merged);
    }

    let result = MoveResult {
        grid: Grid::from_rows_unchecked(restore(&cells, direction)),
        merged: MergeMask(restore(&merged, direction)),
        gained_score,
    };
    debug_assert!(result.changed(grid) || (result.gained_score == 0 && result.merged.is_clear()));
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::game::MAX_TILE;

    fn grid(rows: Vec<Vec<u64>>) -> Grid {
        Grid::from_rows(rows).unwrap()
    }

    #[test]
    fn test_slide_row_left() {
        assert_eq!(slide_row_left(&[0, 0, 0, 0]).cells, vec![0, 0, 0, 0]);
        assert_eq!(slide_row_left(&[0, 0, 0, 2]).cells, vec![2, 0, 0, 0]);
        assert_eq!(slide_row_left(&[2, 0, 2, 0]).cells, vec![4, 0, 0, 0]);
        assert_eq!(slide_row_left(&[2, 8, 8, 4]).cells, vec![2, 16, 4, 0]);
        assert_eq!(slide_row_left(&[2, 4, 8, 16]).cells, vec![2, 4, 8, 16]);
        assert_eq!(slide_row_left(&[2, 0, 0, 4]).cells, vec![2, 4, 0, 0]);
        assert_eq!(slide_row_left(&[0, 4, 4, 4]).cells, vec![8, 4, 0, 0]);
    }

    #[test]
    fn test_slide_row_no_cascade() {
        let slide = slide_row_left(&[2, 2, 2, 2]);
        assert_eq!(slide.cells, vec![4, 4, 0, 0]);
        assert_eq!(slide.merged, vec![true, true, false, false]);
        assert_eq!(slide.gained, 8);

        let slide = slide_row_left(&[4, 4, 8, 0]);
        assert_eq!(slide.cells, vec![8, 8, 0, 0]);
        assert_eq!(slide.merged, vec![true, false, false, false]);
        assert_eq!(slide.gained, 8);
    }

    #[test]
    fn test_slide_row_merge_positions_follow_compaction() {
        let slide = slide_row_left(&[2, 2, 4, 4, 0, 8]);
        assert_eq!(slide.cells, vec![4, 8, 8, 0, 0, 0]);
        assert_eq!(slide.merged, vec![true, true, false, false, false, false]);
        assert_eq!(slide.gained, 12);
    }

    #[test]
    fn test_slide_row_at_tile_ceiling() {
        let slide = slide_row_left(&[0, MAX_TILE, MAX_TILE, 0]);
        assert_eq!(slide.cells, vec![MAX_TILE, MAX_TILE, 0, 0]);
        assert!(slide.merged.iter().all(|m| !m));
        assert_eq!(slide.gained, 0);

        let slide = slide_row_left(&[MAX_TILE / 2, MAX_TILE / 2, MAX_TILE, 0]);
        assert_eq!(slide.cells, vec![MAX_TILE, MAX_TILE, 0, 0]);
        assert_eq!(slide.merged, vec![true, false, false, false]);
        assert_eq!(slide.gained, MAX_TILE);
    }

    #[test]
    fn test_ceiling_tiles_never_overflow_a_move() {
        let g = grid(vec![vec![MAX_TILE, MAX_TILE], vec![MAX_TILE, MAX_TILE]]);
        for direction in Direction::ALL {
            let result = move_grid(&g, direction);
            assert_eq!(result.grid, g);
            assert_eq!(result.gained_score, 0);
            assert!(result.merged.is_clear());
        }
        assert!(crate::game::systems::is_terminal(&g));
    }

    #[test]
    fn test_slide_row_alternating_values() {
        let slide = slide_row_left(&[2, 4, 2, 4]);
        assert_eq!(slide.cells, vec![2, 4, 2, 4]);
        assert!(slide.merged.iter().all(|m| !m));
        assert_eq!(slide.gained, 0);
    }

    #[test]
    fn test_move_left() {
        let g = grid(vec![
            vec![2, 4, 8, 16],
            vec![2, 8, 8, 4],
            vec![4, 0, 0, 4],
            vec![2, 0, 0, 4],
        ]);
        let result = move_grid(&g, Direction::Left);
        assert_eq!(result.grid, grid(vec![
            vec![2, 4, 8, 16],
            vec![2, 16, 4, 0],
            vec![8, 0, 0, 0],
            vec![2, 4, 0, 0],
        ]));
        assert_eq!(result.gained_score, 24);
        assert!(result.merged.get(1, 1));
        assert!(result.merged.get(2, 0));
        assert_eq!(result.merged.count(), 2);
    }

    #[test]
    fn test_move_right() {
        let g = grid(vec![
            vec![2, 4, 8, 16],
            vec![2, 8, 8, 4],
            vec![4, 0, 0, 4],
            vec![2, 0, 0, 4],
        ]);
        let result = move_grid(&g, Direction::Right);
        assert_eq!(result.grid, grid(vec![
            vec![2, 4, 8, 16],
            vec![0, 2, 16, 4],
            vec![0, 0, 0, 8],
            vec![0, 0, 2, 4],
        ]));
        assert_eq!(result.gained_score, 24);
        assert!(result.merged.get(1, 2));
        assert!(result.merged.get(2, 3));
    }

    #[test]
    fn test_move_up() {
        let g = grid(vec![
            vec![2, 2, 4, 2],
            vec![4, 8, 0, 0],
            vec![8, 8, 0, 0],
            vec![16, 4, 4, 4],
        ]);
        let result = move_grid(&g, Direction::Up);
        assert_eq!(result.grid, grid(vec![
            vec![2, 2, 8, 2],
            vec![4, 16, 0, 4],
            vec![8, 4, 0, 0],
            vec![16, 0, 0, 0],
        ]));
        assert_eq!(result.gained_score, 24);
        assert!(result.merged.get(1, 1));
        assert!(result.merged.get(0, 2));
        assert_eq!(result.merged.count(), 2);
    }

    #[test]
    fn test_move_down() {
        let g = grid(vec![
            vec![2, 2, 4, 2],
            vec![4, 8, 0, 0],
            vec![8, 8, 0, 0],
            vec![16, 4, 4, 4],
        ]);
        let result = move_grid(&g, Direction::Down);
        assert_eq!(result.grid, grid(vec![
            vec![2, 0, 0, 0],
            vec![4, 2, 0, 0],
            vec![8, 16, 0, 2],
            vec![16, 4, 8, 4],
        ]));
        assert_eq!(result.gained_score, 24);
        assert!(result.merged.get(2, 1));
        assert!(result.merged.get(3, 2));
    }

    #[test]
    fn test_move_does_not_touch_input() {
        let g = grid(vec![vec![2, 2], vec![0, 4]]);
        let snapshot = g.clone();
        let _ = move_grid(&g, Direction::Left);
        assert_eq!(g, snapshot);
    }

    #[test]
    fn test_noop_move() {
        let g = grid(vec![vec![2, 4], vec![0, 8]]);
        let result = move_grid(&g, Direction::Up);
        assert!(!result.changed(&g));
        assert_eq!(result.grid, g);
        assert_eq!(result.gained_score, 0);
        assert!(result.merged.is_clear());
    }
}
