use std::collections::HashMap;

use serde::Serialize;

use crate::domain::{PlayerId, RankingSystem};

pub type StatsMap = HashMap<PlayerId, PlayerStats>;

/// Per-player accumulator for every ranking criterion
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PlayerStats {
    pub plain_score: f64,
    pub wins: u32,
    /// Games played with the black pieces, byes excluded
    pub black_times: u32,
}

impl PlayerStats {
    pub fn value(&self, criterion: RankingSystem) -> f64 {
        match criterion {
            RankingSystem::PlainScore => self.plain_score,
            RankingSystem::Wins => f64::from(self.wins),
            RankingSystem::BlackTimes => f64::from(self.black_times),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingEntry {
    pub player_id: PlayerId,
    /// 1-based, contiguous, never shared
    pub rank: usize,
    pub plain_score: f64,
    pub wins: u32,
    pub black_times: u32,
}

impl RankingEntry {
    pub fn new(player_id: PlayerId, rank: usize, stats: &PlayerStats) -> Self {
        Self {
            player_id,
            rank,
            plain_score: stats.plain_score,
            wins: stats.wins,
            black_times: stats.black_times,
        }
    }
}

/// Entries ordered by rank
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Ranking {
    entries: Vec<RankingEntry>,
}

impl Ranking {
    pub fn new(entries: Vec<RankingEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[RankingEntry] {
        &self.entries
    }

    pub fn get(&self, player_id: PlayerId) -> Option<&RankingEntry> {
        self.entries.iter().find(|e| e.player_id == player_id)
    }
}
