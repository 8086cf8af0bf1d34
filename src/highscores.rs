//! Best scores for the running session
//!
//! One best per difficulty, kept in memory only.

use serde::{Deserialize, Serialize};

use crate::tuning::Difficulty;

/// Session leaderboard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScores {
    normal: Option<u32>,
    hard: Option<u32>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `score` would beat the current best for `difficulty`
    pub fn qualifies(&self, difficulty: Difficulty, score: u32) -> bool {
        score > 0 && self.best(difficulty).is_none_or(|best| score > best)
    }

    /// Record a finished run; returns true if it set a new best
    pub fn record(&mut self, difficulty: Difficulty, score: u32) -> bool {
        if !self.qualifies(difficulty, score) {
            return false;
        }
        let slot = match difficulty {
            Difficulty::Normal => &mut self.normal,
            Difficulty::Hard => &mut self.hard,
        };
        *slot = Some(score);
        log::info!("New {} best: {}", difficulty.as_str(), score);
        true
    }

    pub fn best(&self, difficulty: Difficulty) -> Option<u32> {
        match difficulty {
            Difficulty::Normal => self.normal,
            Difficulty::Hard => self.hard,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.normal.is_none() && self.hard.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let hs = HighScores::new();
        assert!(hs.is_empty());
        assert_eq!(hs.best(Difficulty::Normal), None);
        assert!(hs.qualifies(Difficulty::Normal, 1));
        assert!(!hs.qualifies(Difficulty::Normal, 0));
    }

    #[test]
    fn test_best_is_per_difficulty() {
        let mut hs = HighScores::new();
        assert!(hs.record(Difficulty::Normal, 500));
        assert!(!hs.record(Difficulty::Normal, 300));
        assert!(hs.record(Difficulty::Hard, 200));
        assert!(hs.record(Difficulty::Normal, 800));

        assert_eq!(hs.best(Difficulty::Normal), Some(800));
        assert_eq!(hs.best(Difficulty::Hard), Some(200));
        assert!(!hs.is_empty());
    }

    #[test]
    fn test_zero_score_leaves_board_empty() {
        let mut hs = HighScores::new();
        assert!(!hs.record(Difficulty::Normal, 0));
        assert!(hs.is_empty());
    }

    #[test]
    fn test_tie_is_not_a_new_best() {
        let mut hs = HighScores::new();
        hs.record(Difficulty::Hard, 100);
        assert!(!hs.record(Difficulty::Hard, 100));
    }
}
