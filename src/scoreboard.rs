//! In-memory high-score table.
//!
//! Keeps the best finished games of one process, highest first. Nothing is
//! written to disk.

use log::info;

use crate::session::ScoreSink;

/// Number of entries the table keeps.
pub const MAX_HIGH_SCORES: usize = 5;

/// Name recorded when the player has not given one.
pub const DEFAULT_PLAYER_NAME: &str = "Player";

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
}

/// Ranked top-five table fed by finished games.
#[derive(Debug, Clone)]
pub struct HighScores {
    player: String,
    entries: Vec<ScoreEntry>,
}

impl Default for HighScores {
    fn default() -> Self {
        Self::new(DEFAULT_PLAYER_NAME)
    }
}

impl HighScores {
    /// Empty table that records future scores under `player`.
    #[must_use]
    pub fn new(player: impl Into<String>) -> Self {
        Self {
            player: player.into(),
            entries: Vec::with_capacity(MAX_HIGH_SCORES + 1),
        }
    }

    /// Inserts a score and returns its 1-based rank if it made the table.
    ///
    /// Zero scores are ignored. Ties keep the earlier entry ahead.
    pub fn record(&mut self, name: &str, score: u32) -> Option<usize> {
        if score == 0 {
            return None;
        }

        let index = self.entries.partition_point(|entry| entry.score >= score);
        if index >= MAX_HIGH_SCORES {
            return None;
        }

        self.entries.insert(
            index,
            ScoreEntry {
                name: name.to_owned(),
                score,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(index + 1)
    }

    /// Entries ranked highest first.
    #[must_use]
    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    /// Top score, or 0 for an empty table.
    #[must_use]
    pub fn best(&self) -> u32 {
        self.entries.first().map_or(0, |entry| entry.score)
    }

    #[must_use]
    pub fn player(&self) -> &str {
        &self.player
    }
}

impl ScoreSink for HighScores {
    fn report_final_score(&mut self, score: u32) {
        let player = self.player.clone();
        if let Some(rank) = self.record(&player, score) {
            info!("{player} placed #{rank} with {score}");
        }
    }
}
