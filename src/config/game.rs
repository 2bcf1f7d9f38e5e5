/// Game configuration constants.
/// 
/// This module defines the main gameplay parameters such as grid dimensions,
/// tile spawn odds and the time-attack limit.
pub const CLASSIC_GRID_SIZE: usize = 4; // Side length of the classic board.

/// Side length of the large board mode.
pub const LARGE_GRID_SIZE: usize = 6;

/// Smallest board the engine accepts.
pub const MIN_GRID_SIZE: usize = 2;

/// Number of tiles placed on a fresh board.
pub const INITIAL_TILES: usize = 2;

/// Probability that a spawned tile is a 4 instead of a 2.
pub const FOUR_TILE_PROBABILITY: f64 = 0.1;

/// Value of a regular spawned tile.
pub const BASE_TILE: u64 = 2;

/// Value of the rarer spawned tile.
pub const BONUS_TILE: u64 = 4;

/// Largest tile a cell may hold. Two of these never merge, so a move can
/// always double a tile without overflowing.
pub const MAX_TILE: u64 = 1 << 62;

/// Session length (in seconds) for the time-attack mode.
/// The session ends once elapsed time reaches this value.
pub const TIME_ATTACK_LIMIT_SECS: u64 = 60;

/// Interval (in seconds) between two session timer ticks.
pub const TIMER_TICK_SECS: u64 = 1;
