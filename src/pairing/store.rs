use anyhow::Result;
use chrono::Utc;

use super::types::RoundPlan;
use crate::domain::{self, Game, GameId, Round, RoundId, Tournament, TournamentId};

/// Where generated rounds go
pub trait RoundStore {
    /// Persists one round and its pairings. The store picks the round's
    /// sequential number within the tournament.
    fn save_round(&mut self, tournament: &Tournament, plan: &RoundPlan) -> Result<Round>;

    /// Persists a whole schedule in round order. Stores that can roll back
    /// keep nothing when any round fails.
    fn save_schedule(&mut self, tournament: &Tournament, plans: &[RoundPlan]) -> Result<Vec<Round>> {
        plans.iter().map(|plan| self.save_round(tournament, plan)).collect()
    }
}

/// Keeps rounds and games in memory
#[derive(Debug, Default)]
pub struct MemoryRoundStore {
    rounds: Vec<Round>,
    games: Vec<Game>,
}

impl MemoryRoundStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    fn next_round_number(&self, tournament_id: TournamentId) -> u32 {
        let existing = self.rounds.iter().filter(|r| r.tournament_id == tournament_id).count();
        existing as u32 + 1
    }
}

impl RoundStore for MemoryRoundStore {
    fn save_round(&mut self, tournament: &Tournament, plan: &RoundPlan) -> Result<Round> {
        let number = self.next_round_number(tournament.id);
        let round = Round {
            id: self.rounds.len() as RoundId + 1,
            tournament_id: tournament.id,
            number,
            name: domain::round_name(number),
            start_date: Utc::now().naive_utc(),
            finished: false,
        };

        for pairing in &plan.pairings {
            let id = self.games.len() as GameId + 1;
            self.games.push(Game::new(id, round.id, pairing.white, pairing.black));
        }

        self.rounds.push(round.clone());
        Ok(round)
    }
}
