//! High score leaderboard
//!
//! Best finished runs for the current page session, top 10 by score.

use serde::{Deserialize, Serialize};

use crate::hud::HudSnapshot;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single finished run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// Distance travelled (world units)
    pub distance: u64,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a run to the leaderboard (if it qualifies).
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, score: u64, distance: u64) -> Option<usize> {
        let rank = self.potential_rank(score)?;
        self.entries.insert(rank - 1, HighScoreEntry { score, distance });
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    /// Record a finished run from its final HUD values
    pub fn record_run(&mut self, hud: &HudSnapshot) -> Option<usize> {
        let rank = self.add_score(hud.score, hud.distance);
        match rank {
            Some(rank) => log::info!("Run scored {} - rank #{}", hud.score, rank),
            None => log::info!("Run scored {} - not ranked", hud.score),
        }
        rank
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranking_order() {
        let mut scores = HighScores::new();
        assert!(scores.is_empty());
        assert_eq!(scores.add_score(100, 50), Some(1));
        assert_eq!(scores.add_score(300, 120), Some(1));
        assert_eq!(scores.add_score(200, 90), Some(2));
        // Ties rank below the existing entry
        assert_eq!(scores.add_score(200, 80), Some(3));

        let ranked: Vec<u64> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(ranked, vec![300, 200, 200, 100]);
        assert_eq!(scores.top_score(), Some(300));
    }

    #[test]
    fn test_zero_score_never_ranks() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(0, 10), None);
        assert!(scores.is_empty());
    }

    #[test]
    fn test_full_board_trims_lowest() {
        let mut scores = HighScores::new();
        for score in 1..=MAX_HIGH_SCORES as u64 {
            scores.add_score(score * 10, score);
        }
        assert!(!scores.qualifies(5));
        assert_eq!(scores.potential_rank(10), None);
        assert_eq!(scores.add_score(15, 1), Some(10));
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().map(|e| e.score), Some(15));
    }
}
