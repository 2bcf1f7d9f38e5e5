use crate::game::grid::{Grid, can_merge};

/// True when some move would change the grid: a cell is empty or two
/// orthogonal neighbours can merge.
pub fn has_available_move(grid: &Grid) -> bool {
    if !grid.is_full() {
        return true;
    }
    let size = grid.size();
    (0..size).any(|row| {
        (0..size).any(|col| {
            let value = grid.get(row, col);
            (row + 1 < size && can_merge(value, grid.get(row + 1, col)))
                || (col + 1 < size && can_merge(value, grid.get(row, col + 1)))
        })
    })
}

/// True when no move can change the grid.
pub fn is_terminal(grid: &Grid) -> bool {
    !has_available_move(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::systems::move_grid;
    use crate::game::types::Direction;

    fn grid(rows: Vec<Vec<u64>>) -> Grid {
        Grid::from_rows(rows).unwrap()
    }

    #[test]
    fn test_empty_cell_is_never_terminal() {
        assert!(!is_terminal(&Grid::new(4)));
        assert!(!is_terminal(&grid(vec![
            vec![2, 4, 2, 4],
            vec![4, 2, 4, 2],
            vec![2, 4, 2, 4],
            vec![4, 2, 4, 0],
        ])));
    }

    #[test]
    fn test_checkerboard_is_terminal() {
        let g = grid(vec![
            vec![2, 4, 2, 4],
            vec![4, 2, 4, 2],
            vec![2, 4, 2, 4],
            vec![4, 2, 4, 2],
        ]);
        assert!(is_terminal(&g));
        assert!(Direction::ALL.iter().all(|d| !move_grid(&g, *d).changed(&g)));
    }

    #[test]
    fn test_horizontal_pair_is_not_terminal() {
        assert!(!is_terminal(&grid(vec![
            vec![2, 4, 2, 4],
            vec![4, 2, 4, 2],
            vec![2, 4, 2, 4],
            vec![4, 2, 8, 8],
        ])));
    }

    #[test]
    fn test_vertical_pair_is_not_terminal() {
        assert!(!is_terminal(&grid(vec![
            vec![2, 4, 2, 16],
            vec![4, 2, 4, 16],
            vec![2, 4, 2, 4],
            vec![4, 2, 4, 2],
        ])));
    }

    #[test]
    fn test_diagonal_pair_is_terminal() {
        let g = grid(vec![vec![2, 4], vec![8, 2]]);
        assert!(is_terminal(&g));
        assert!(!has_available_move(&g));
    }
}
