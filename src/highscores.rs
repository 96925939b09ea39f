//! High score leaderboard system
//!
//! In-memory top-10 table. The engine itself does no IO; hosts persist the
//! JSON form wherever suits them and feed it back on startup.

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Who set it
    pub name: String,
    /// Forward lanes crossed
    pub score: u32,
    /// How long the run lasted, in ticks
    pub tick_count: u64,
}

/// High score leaderboard, sorted descending by score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
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
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, name: &str, score: u32, tick_count: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            name: name.to_string(),
            score,
            tick_count,
        };

        // Find insertion point (sorted descending by score; ties keep the
        // earlier entry ahead)
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        // Trim to max size
        self.entries.truncate(MAX_HIGH_SCORES);

        log::debug!("High score: {} lanes by {} (rank {})", score, name, rank);
        Some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Serialize for host-side persistence
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Rebuild from host-side persistence
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_score_never_qualifies() {
        let scores = HighScores::new();
        assert!(!scores.qualifies(0));
        assert!(scores.qualifies(1));
    }

    #[test]
    fn test_ranks_insert_sorted_descending() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score("ada", 10, 600), Some(1));
        assert_eq!(scores.add_score("bo", 30, 900), Some(1));
        assert_eq!(scores.add_score("cy", 20, 750), Some(2));

        let order: Vec<u32> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(order, vec![30, 20, 10]);
        assert_eq!(scores.top_score(), Some(30));
    }

    #[test]
    fn test_ties_keep_earlier_entry_ahead() {
        let mut scores = HighScores::new();
        scores.add_score("first", 12, 500);
        assert_eq!(scores.add_score("second", 12, 400), Some(2));
        assert_eq!(scores.entries[0].name, "first");
        assert_eq!(scores.entries[1].name, "second");
    }

    #[test]
    fn test_table_caps_at_ten_entries() {
        let mut scores = HighScores::new();
        for i in 1..=12u32 {
            scores.add_score("p", i * 10, 0);
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        // Lowest survivors are 30..=120; 10 and 20 fell off.
        assert_eq!(scores.entries.last().map(|e| e.score), Some(30));
        assert!(!scores.qualifies(20));
        assert!(scores.qualifies(31));
        assert_eq!(scores.potential_rank(25), None);
        assert_eq!(scores.potential_rank(125), Some(1));
    }

    #[test]
    fn test_json_round_trip() {
        let mut scores = HighScores::new();
        scores.add_score("ada", 42, 2500);
        scores.add_score("bo", 17, 1100);

        let json = scores.to_json().unwrap();
        let back = HighScores::from_json(&json).unwrap();
        assert_eq!(back, scores);
    }
}
