use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::Connection;

use super::{games, rounds};
use crate::domain::{self, Round, Tournament};
use crate::pairing::{RoundPlan, RoundStore};

/// Writes generated rounds to SQLite. A schedule is stored in a single
/// transaction, so a failure leaves no partial schedule behind.
pub struct SqliteRoundStore<'a> {
    conn: &'a mut Connection,
}

impl<'a> SqliteRoundStore<'a> {
    pub fn new(conn: &'a mut Connection) -> Self {
        Self { conn }
    }
}

fn insert_plan(conn: &Connection, tournament: &Tournament, plan: &RoundPlan) -> Result<Round> {
    let number = rounds::count_rounds(conn, tournament.id)? + 1;
    let round = rounds::insert_round(
        conn,
        tournament.id,
        number,
        &domain::round_name(number),
        Utc::now().naive_utc(),
    )?;

    for pairing in &plan.pairings {
        games::insert_game(conn, round.id, pairing.white, pairing.black)
            .with_context(|| format!("Failed to store board {} of {}", pairing.board, round.name))?;
    }

    Ok(round)
}

impl RoundStore for SqliteRoundStore<'_> {
    fn save_round(&mut self, tournament: &Tournament, plan: &RoundPlan) -> Result<Round> {
        self.save_schedule(tournament, std::slice::from_ref(plan))?
            .pop()
            .ok_or_else(|| anyhow::anyhow!("No round stored for {}", tournament.name))
    }

    fn save_schedule(&mut self, tournament: &Tournament, plans: &[RoundPlan]) -> Result<Vec<Round>> {
        let tx = self
            .conn
            .transaction()
            .context("Failed to start schedule transaction")?;

        let rounds = plans
            .iter()
            .map(|plan| insert_plan(&tx, tournament, plan))
            .collect::<Result<Vec<_>>>()?;

        tx.commit()
            .with_context(|| format!("Failed to commit schedule of {}", tournament.name))?;
        Ok(rounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::setup::ensure_schema;
    use crate::database::tournaments::insert_tournament;
    use crate::domain::{BoardType, ScoringPoints, TournamentSpeed};
    use crate::pairing::PlannedPairing;

    #[test]
    fn test_rounds_are_numbered_after_existing_ones() {
        let mut conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        let tournament = insert_tournament(
            &conn,
            "Club",
            &ScoringPoints::default(),
            TournamentSpeed::Rapid,
            BoardType::Lichess,
        )
        .unwrap();
        let plan = RoundPlan {
            number: 1,
            pairings: vec![PlannedPairing {
                board: 0,
                white: None,
                black: None,
            }],
        };

        let mut store = SqliteRoundStore::new(&mut conn);
        let first = store.save_round(&tournament, &plan).unwrap();
        let second = store.save_round(&tournament, &plan).unwrap();

        assert_eq!(first.name, "round_001");
        assert_eq!(second.name, "round_002");
        assert_eq!(games::list_by_tournament(&conn, tournament.id).unwrap().len(), 2);
    }

    #[test]
    fn test_failed_round_rolls_back_the_whole_schedule() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
        ensure_schema(&conn).unwrap();
        let tournament = insert_tournament(
            &conn,
            "Club",
            &ScoringPoints::default(),
            TournamentSpeed::Rapid,
            BoardType::Lichess,
        )
        .unwrap();
        let plans = vec![
            RoundPlan {
                number: 1,
                pairings: vec![PlannedPairing {
                    board: 0,
                    white: None,
                    black: None,
                }],
            },
            RoundPlan {
                number: 2,
                pairings: vec![PlannedPairing {
                    board: 0,
                    white: Some(999),
                    black: None,
                }],
            },
        ];

        let mut store = SqliteRoundStore::new(&mut conn);
        let err = store.save_schedule(&tournament, &plans).unwrap_err();

        assert!(format!("{:#}", err).contains("Failed to store board 0 of round_002"));
        assert_eq!(rounds::count_rounds(&conn, tournament.id).unwrap(), 0);
        assert!(games::list_by_tournament(&conn, tournament.id).unwrap().is_empty());
    }
}
