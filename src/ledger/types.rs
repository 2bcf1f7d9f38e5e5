use serde::{Serialize, Deserialize};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("invalid player id: {0:?}")]
    InvalidPlayer(String),
}

/// A player's best single run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestScoreEntry {
    pub player: String,
    pub score: u64,
    pub time: u64,
}

/// A player's accumulated score over every saved run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalScoreEntry {
    pub player: String,
    pub score_total: u64,
    pub games_played: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardData {
    pub best_scores: Vec<BestScoreEntry>,
    pub total_scores: Vec<TotalScoreEntry>,
}
