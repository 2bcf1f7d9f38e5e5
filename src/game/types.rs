use serde::{Serialize, Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;

use crate::config::game::{CLASSIC_GRID_SIZE, LARGE_GRID_SIZE, TIME_ATTACK_LIMIT_SECS};
use crate::game::error::GridError;
use crate::game::grid::Grid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Left, Direction::Right, Direction::Up, Direction::Down];
}

impl FromStr for Direction {
    type Err = GridError;

    /// Accepts direction names and the browser arrow-key names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "arrowleft" => Ok(Direction::Left),
            "right" | "arrowright" => Ok(Direction::Right),
            "up" | "arrowup" => Ok(Direction::Up),
            "down" | "arrowdown" => Ok(Direction::Down),
            _ => Err(GridError::InvalidDirection(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for Direction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    Classic,
    Large,
    TimeAttack,
}

impl GameMode {
    pub fn grid_size(&self) -> usize {
        match self {
            GameMode::Classic | GameMode::TimeAttack => CLASSIC_GRID_SIZE,
            GameMode::Large => LARGE_GRID_SIZE,
        }
    }

    /// Session time limit in seconds, if the mode has one.
    pub fn time_limit(&self) -> Option<u64> {
        match self {
            GameMode::TimeAttack => Some(TIME_ATTACK_LIMIT_SECS),
            _ => None,
        }
    }
}

/// N×N matrix marking the cells produced by a merge during one move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MergeMask(pub Vec<Vec<bool>>);

impl MergeMask {
    pub fn clear(size: usize) -> Self {
        MergeMask(vec![vec![false; size]; size])
    }

    pub fn is_clear(&self) -> bool {
        self.0.iter().flatten().all(|merged| !merged)
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        self.0[row][col]
    }

    pub fn count(&self) -> usize {
        self.0.iter().flatten().filter(|merged| **merged).count()
    }
}

/// Outcome of one directional move over a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    pub grid: Grid,
    pub merged: MergeMask,
    pub gained_score: u64,
}

impl MoveResult {
    /// True when the move slid or merged at least one tile.
    pub fn changed(&self, before: &Grid) -> bool {
        self.grid != *before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_from_str() {
        assert_eq!("left".parse::<Direction>(), Ok(Direction::Left));
        assert_eq!(" Down ".parse::<Direction>(), Ok(Direction::Down));
        assert_eq!("ArrowUp".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!("arrowright".parse::<Direction>(), Ok(Direction::Right));
        assert_eq!(
            "diagonal".parse::<Direction>(),
            Err(GridError::InvalidDirection("diagonal".to_string()))
        );
    }

    #[test]
    fn test_direction_serde() {
        assert_eq!(serde_json::to_string(&Direction::Left).unwrap(), r#""left""#);
        assert_eq!(serde_json::from_str::<Direction>(r#""ArrowDown""#).unwrap(), Direction::Down);
        assert_eq!(serde_json::from_str::<Direction>(r#""UP""#).unwrap(), Direction::Up);
        let err = serde_json::from_str::<Direction>(r#""stay""#).unwrap_err();
        assert!(err.to_string().contains("invalid direction"));
    }

    #[test]
    fn test_mode_sizes() {
        assert_eq!(GameMode::Classic.grid_size(), 4);
        assert_eq!(GameMode::Large.grid_size(), 6);
        assert_eq!(GameMode::TimeAttack.grid_size(), 4);
        assert_eq!(GameMode::Classic.time_limit(), None);
        assert_eq!(GameMode::TimeAttack.time_limit(), Some(TIME_ATTACK_LIMIT_SECS));
        assert_eq!(serde_json::from_str::<GameMode>(r#""time_attack""#).unwrap(), GameMode::TimeAttack);
    }
}
