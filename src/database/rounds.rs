use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rusqlite::{Connection, OptionalExtension, params};

use crate::domain::{Round, TournamentId};

const ROUND_COLUMNS: &str = "id, tournament_id, number, name, start_date, finished";

pub fn insert_round(
    conn: &Connection,
    tournament_id: TournamentId,
    number: u32,
    name: &str,
    start_date: NaiveDateTime,
) -> Result<Round> {
    let sql = format!(
        "INSERT INTO rounds (tournament_id, number, name, start_date) VALUES (?1, ?2, ?3, ?4) RETURNING {}",
        ROUND_COLUMNS
    );

    conn.query_row(&sql, params![tournament_id, number, name, start_date], parse_round_row)
        .with_context(|| format!("Failed to insert {} for tournament {}", name, tournament_id))
}

fn parse_round_row(row: &rusqlite::Row) -> rusqlite::Result<Round> {
    Ok(Round {
        id: row.get(0)?,
        tournament_id: row.get(1)?,
        number: row.get(2)?,
        name: row.get(3)?,
        start_date: row.get(4)?,
        finished: row.get(5)?,
    })
}

pub fn list_by_tournament(conn: &Connection, tournament_id: TournamentId) -> Result<Vec<Round>> {
    let sql = format!(
        "SELECT {} FROM rounds WHERE tournament_id = ?1 ORDER BY number",
        ROUND_COLUMNS
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![tournament_id], parse_round_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn count_rounds(conn: &Connection, tournament_id: TournamentId) -> Result<u32> {
    let sql = "SELECT COUNT(*) FROM rounds WHERE tournament_id = ?1";
    conn.query_row(sql, params![tournament_id], |row| row.get(0))
        .context("Failed to count rounds")
}

pub fn count_rounds_with_games(conn: &Connection, tournament_id: TournamentId) -> Result<u32> {
    let sql = "SELECT COUNT(DISTINCT r.id) FROM rounds r JOIN games g ON g.round_id = r.id WHERE r.tournament_id = ?1";
    conn.query_row(sql, params![tournament_id], |row| row.get(0))
        .context("Failed to count rounds with games")
}

/// Highest numbered round that holds at least one game
pub fn latest_round_with_games(conn: &Connection, tournament_id: TournamentId) -> Result<Option<Round>> {
    let sql = format!(
        "SELECT {} FROM rounds r WHERE r.tournament_id = ?1 AND EXISTS (SELECT 1 FROM games g WHERE g.round_id = r.id) ORDER BY r.number DESC LIMIT 1",
        ROUND_COLUMNS
    );

    conn.query_row(&sql, params![tournament_id], parse_round_row)
        .optional()
        .context("Failed to query latest round with games")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::games::insert_game;
    use crate::database::setup::ensure_schema;
    use crate::database::tournaments::insert_tournament;
    use crate::domain::{BoardType, ScoringPoints, TournamentSpeed};
    use chrono::Utc;

    fn setup() -> (Connection, TournamentId) {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        let tournament = insert_tournament(
            &conn,
            "Club",
            &ScoringPoints::default(),
            TournamentSpeed::Rapid,
            BoardType::Lichess,
        )
        .unwrap();
        (conn, tournament.id)
    }

    #[test]
    fn test_round_queries() {
        let (conn, tournament_id) = setup();
        let now = Utc::now().naive_utc();
        let first = insert_round(&conn, tournament_id, 1, "round_001", now).unwrap();
        let second = insert_round(&conn, tournament_id, 2, "round_002", now).unwrap();
        insert_round(&conn, tournament_id, 3, "round_003", now).unwrap();

        assert_eq!(count_rounds(&conn, tournament_id).unwrap(), 3);
        assert_eq!(count_rounds_with_games(&conn, tournament_id).unwrap(), 0);
        assert!(latest_round_with_games(&conn, tournament_id).unwrap().is_none());

        insert_game(&conn, first.id, None, None).unwrap();
        insert_game(&conn, second.id, None, None).unwrap();

        assert_eq!(count_rounds_with_games(&conn, tournament_id).unwrap(), 2);
        let latest = latest_round_with_games(&conn, tournament_id).unwrap().unwrap();
        assert_eq!(latest.name, "round_002");
        assert!(!latest.finished);
    }

    #[test]
    fn test_rounds_listed_by_number() {
        let (conn, tournament_id) = setup();
        let now = Utc::now().naive_utc();
        insert_round(&conn, tournament_id, 2, "round_002", now).unwrap();
        insert_round(&conn, tournament_id, 1, "round_001", now).unwrap();

        let names: Vec<_> = list_by_tournament(&conn, tournament_id)
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["round_001", "round_002"]);
    }
}
