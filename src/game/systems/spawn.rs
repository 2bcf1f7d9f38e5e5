//! Random tile spawning.
//!
//! The random source is always passed in so sessions and tests can use a
//! seeded generator.

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::config::game::{BASE_TILE, BONUS_TILE, FOUR_TILE_PROBABILITY, INITIAL_TILES};
use crate::game::grid::Grid;

/// Place a 2 (or, rarely, a 4) on a uniformly chosen empty cell.
///
/// A full grid is returned unchanged.
pub fn spawn_random_tile<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Grid {
    let empty_cells = grid.empty_cells();

    match empty_cells.choose(rng) {
        Some(&(row, col)) => {
            let value = if rng.random_bool(FOUR_TILE_PROBABILITY) { BONUS_TILE } else { BASE_TILE };
            grid.with_tile(row, col, value)
        }
        None => grid.clone(),
    }
}

/// Create an empty grid and place the initial tiles on it.
pub fn seed_grid<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Grid {
    (0..INITIAL_TILES).fold(Grid::new(size), |grid, _| spawn_random_tile(&grid, rng))
}
