//! Score ledger.
//!
//! The ledger persists finished runs and serves the leaderboard. The game
//! never depends on it succeeding: a failed save is reported to the player,
//! who may retry.

pub mod memory;
pub mod types;

use std::sync::Arc;
use tokio::sync::RwLock;

pub use memory::InMemoryLedger;
pub use types::{LeaderboardData, LedgerError};

/// Persistence adapter for finished runs.
pub trait ScoreLedger: Send + Sync {
    /// Record one finished run for `player`.
    fn save_score(&mut self, player: &str, score: u64, time_secs: u64) -> Result<(), LedgerError>;

    /// Highest score recorded for `player`, if any.
    fn best_score(&self, player: &str) -> Option<u64>;

    /// Top `limit` entries of both leaderboard views.
    fn leaderboard(&self, limit: usize) -> LeaderboardData;
}

/// Ledger handle shared between HTTP handlers and game sessions.
pub type SharedLedger = Arc<RwLock<Box<dyn ScoreLedger>>>;

pub fn shared<L: ScoreLedger + 'static>(ledger: L) -> SharedLedger {
    let ledger: Box<dyn ScoreLedger> = Box::new(ledger);
    Arc::new(RwLock::new(ledger))
}
