//! Match scoreboard
//!
//! Counts rounds won per side. Kept in memory for the current match only.

use serde::{Deserialize, Serialize};

use crate::sim::Side;

/// Win counters for both duelists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ScoreLedger {
    player_wins: u32,
    opponent_wins: u32,
}

impl ScoreLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit a round to `side`
    pub fn record_win(&mut self, side: Side) {
        let counter = match side {
            Side::Player => &mut self.player_wins,
            Side::Opponent => &mut self.opponent_wins,
        };
        *counter = counter.saturating_add(1);
    }

    /// Zero both counters (match reset)
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn player_wins(&self) -> u32 {
        self.player_wins
    }

    pub fn opponent_wins(&self) -> u32 {
        self.opponent_wins
    }

    pub fn wins(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player_wins,
            Side::Opponent => self.opponent_wins,
        }
    }

    /// Side with more wins, if any
    pub fn leader(&self) -> Option<Side> {
        match self.player_wins.cmp(&self.opponent_wins) {
            std::cmp::Ordering::Greater => Some(Side::Player),
            std::cmp::Ordering::Less => Some(Side::Opponent),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Scoreboard text, e.g. `0003 - 0001`
    pub fn display(&self) -> String {
        format!(
            "{} - {}",
            format_score(self.player_wins),
            format_score(self.opponent_wins)
        )
    }
}

/// Zero-padded four digit score
pub fn format_score(wins: u32) -> String {
    format!("{:04}", wins)
}
