//! In-memory ledger, used by the server and in tests.

use std::collections::HashMap;
use log::debug;

use super::ScoreLedger;
use super::types::{BestScoreEntry, LeaderboardData, LedgerError, TotalScoreEntry};

#[derive(Debug, Clone, Default)]
struct PlayerRecord {
    best_score: u64,
    best_time: u64,
    score_total: u64,
    games_played: u32,
}

#[derive(Debug, Default)]
pub struct InMemoryLedger {
    records: HashMap<String, PlayerRecord>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreLedger for InMemoryLedger {
    fn save_score(&mut self, player: &str, score: u64, time_secs: u64) -> Result<(), LedgerError> {
        if player.trim().is_empty() {
            return Err(LedgerError::InvalidPlayer(player.to_string()));
        }
        let record = self.records.entry(player.to_string()).or_default();
        let first_game = record.games_played == 0;
        if first_game
            || score > record.best_score
            || (score == record.best_score && time_secs < record.best_time)
        {
            record.best_score = score;
            record.best_time = time_secs;
        }
        record.score_total = record.score_total.saturating_add(score);
        record.games_played += 1;
        debug!("[Ledger] Saved score={} time={} for player={}", score, time_secs, player);
        Ok(())
    }

    fn best_score(&self, player: &str) -> Option<u64> {
        self.records.get(player).map(|record| record.best_score)
    }

    fn leaderboard(&self, limit: usize) -> LeaderboardData {
        let mut best_scores: Vec<BestScoreEntry> = self.records.iter()
            .map(|(player, record)| BestScoreEntry {
                player: player.clone(),
                score: record.best_score,
                time: record.best_time,
            })
            .collect();
        best_scores.sort_by(|a, b| {
            b.score.cmp(&a.score)
                .then(a.time.cmp(&b.time))
                .then(a.player.cmp(&b.player))
        });
        best_scores.truncate(limit);

        let mut total_scores: Vec<TotalScoreEntry> = self.records.iter()
            .map(|(player, record)| TotalScoreEntry {
                player: player.clone(),
                score_total: record.score_total,
                games_played: record.games_played,
            })
            .collect();
        total_scores.sort_by(|a, b| {
            b.score_total.cmp(&a.score_total).then(a.player.cmp(&b.player))
        });
        total_scores.truncate(limit);

        LeaderboardData { best_scores, total_scores }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_ledger() {
        let ledger = InMemoryLedger::new();
        assert_eq!(ledger.best_score("0xabc"), None);
        assert_eq!(ledger.leaderboard(10), LeaderboardData::default());
    }

    #[test]
    fn test_rejects_empty_player() {
        let mut ledger = InMemoryLedger::new();
        assert_eq!(ledger.save_score("  ", 10, 1), Err(LedgerError::InvalidPlayer("  ".to_string())));
    }

    #[test]
    fn test_best_score_keeps_highest_and_fastest() {
        let mut ledger = InMemoryLedger::new();
        ledger.save_score("alice", 100, 50).unwrap();
        ledger.save_score("alice", 80, 10).unwrap();
        ledger.save_score("alice", 100, 30).unwrap();
        let board = ledger.leaderboard(10);
        assert_eq!(board.best_scores, vec![BestScoreEntry { player: "alice".into(), score: 100, time: 30 }]);
        assert_eq!(board.total_scores, vec![TotalScoreEntry { player: "alice".into(), score_total: 280, games_played: 3 }]);
        assert_eq!(ledger.best_score("alice"), Some(100));
    }

    #[test]
    fn test_leaderboard_ordering_and_limit() {
        let mut ledger = InMemoryLedger::new();
        ledger.save_score("alice", 200, 90).unwrap();
        ledger.save_score("bob", 200, 60).unwrap();
        ledger.save_score("carol", 300, 120).unwrap();
        ledger.save_score("dave", 50, 5).unwrap();
        ledger.save_score("dave", 50, 5).unwrap();
        ledger.save_score("dave", 150, 5).unwrap();

        let board = ledger.leaderboard(3);
        let best: Vec<&str> = board.best_scores.iter().map(|e| e.player.as_str()).collect();
        assert_eq!(best, vec!["carol", "bob", "alice"]);
        let total: Vec<&str> = board.total_scores.iter().map(|e| e.player.as_str()).collect();
        assert_eq!(total, vec!["carol", "dave", "alice"]);
    }
}
