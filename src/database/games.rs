use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};

use super::models::GameRow;
use crate::domain::{Game, GameId, GameResult, PlayerId, RoundId, TournamentId};

const GAME_COLUMNS: &str = "id, round_id, white_id, black_id, finished, result";

pub fn insert_game(
    conn: &Connection,
    round_id: RoundId,
    white_id: Option<PlayerId>,
    black_id: Option<PlayerId>,
) -> Result<Game> {
    let sql = format!(
        "INSERT INTO games (round_id, white_id, black_id, result) VALUES (?1, ?2, ?3, ?4) RETURNING {}",
        GAME_COLUMNS
    );

    conn.query_row(
        &sql,
        params![round_id, white_id, black_id, GameResult::NotAvailable.as_str()],
        parse_game_row,
    )
    .context("Failed to insert game")?
    .into_game()
}

fn parse_game_row(row: &rusqlite::Row) -> rusqlite::Result<GameRow> {
    Ok(GameRow {
        id: row.get(0)?,
        round_id: row.get(1)?,
        white_id: row.get(2)?,
        black_id: row.get(3)?,
        finished: row.get(4)?,
        result: row.get(5)?,
    })
}

fn into_games(rows: Vec<GameRow>) -> Result<Vec<Game>> {
    rows.into_iter().map(GameRow::into_game).collect()
}

/// Every game of the tournament, in round order
pub fn list_by_tournament(conn: &Connection, tournament_id: TournamentId) -> Result<Vec<Game>> {
    let sql = "SELECT g.id, g.round_id, g.white_id, g.black_id, g.finished, g.result FROM games g JOIN rounds r ON g.round_id = r.id WHERE r.tournament_id = ?1 ORDER BY r.number, g.id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![tournament_id], parse_game_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    into_games(rows)
}

pub fn list_by_round(conn: &Connection, round_id: RoundId) -> Result<Vec<Game>> {
    let sql = format!("SELECT {} FROM games WHERE round_id = ?1 ORDER BY id", GAME_COLUMNS);

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![round_id], parse_game_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    into_games(rows)
}

pub fn find_by_id(conn: &Connection, game_id: GameId) -> Result<Option<Game>> {
    let sql = format!("SELECT {} FROM games WHERE id = ?1", GAME_COLUMNS);

    conn.query_row(&sql, params![game_id], parse_game_row)
        .optional()
        .context("Failed to query game by id")?
        .map(GameRow::into_game)
        .transpose()
}

/// Marks the game finished with the given result
pub fn record_result(conn: &Connection, game_id: GameId, result: GameResult) -> Result<Game> {
    let sql = format!(
        "UPDATE games SET finished = 1, result = ?1, updated_at = CURRENT_TIMESTAMP WHERE id = ?2 RETURNING {}",
        GAME_COLUMNS
    );

    conn.query_row(&sql, params![result.as_str(), game_id], parse_game_row)
        .optional()
        .context("Failed to record game result")?
        .ok_or_else(|| anyhow::anyhow!("Game {} not found", game_id))?
        .into_game()
}
