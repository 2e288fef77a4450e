use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};

use super::models::TournamentRow;
use crate::domain::{BoardType, RankingSystem, ScoringPoints, Tournament, TournamentId, TournamentSpeed};

const SELECT_COLUMNS: &str =
    "SELECT id, name, win_points, draw_points, lose_points, speed, board_type FROM tournaments";

pub fn insert_tournament(
    conn: &Connection,
    name: &str,
    scoring: &ScoringPoints,
    speed: TournamentSpeed,
    board_type: BoardType,
) -> Result<Tournament> {
    let sql = "INSERT INTO tournaments (name, win_points, draw_points, lose_points, speed, board_type) VALUES (?1, ?2, ?3, ?4, ?5, ?6) RETURNING id, name, win_points, draw_points, lose_points, speed, board_type";

    let row = conn
        .query_row(
            sql,
            params![
                name,
                scoring.win,
                scoring.draw,
                scoring.lose,
                speed.as_str(),
                board_type.as_str()
            ],
            parse_tournament_row,
        )
        .with_context(|| format!("Failed to insert tournament {}", name))?;

    row.into_tournament(Vec::new())
}

pub fn find_by_name(conn: &Connection, name: &str) -> Result<Option<Tournament>> {
    let sql = format!("{} WHERE name = ?1", SELECT_COLUMNS);

    let row = conn
        .query_row(&sql, params![name], parse_tournament_row)
        .optional()
        .context("Failed to query tournament by name")?;

    load_with_ranking_list(conn, row)
}

pub fn find_by_id(conn: &Connection, id: TournamentId) -> Result<Option<Tournament>> {
    let sql = format!("{} WHERE id = ?1", SELECT_COLUMNS);

    let row = conn
        .query_row(&sql, params![id], parse_tournament_row)
        .optional()
        .context("Failed to query tournament by id")?;

    load_with_ranking_list(conn, row)
}

/// Looks the tournament up by name, then by numeric id
pub fn find_by_key(conn: &Connection, key: &str) -> Result<Option<Tournament>> {
    if let Some(tournament) = find_by_name(conn, key)? {
        return Ok(Some(tournament));
    }

    match key.trim().parse::<TournamentId>() {
        Ok(id) => find_by_id(conn, id),
        Err(_) => Ok(None),
    }
}

/// Tournaments whose name contains `text`, ignoring case, newest first
pub fn search_by_name(conn: &Connection, text: &str) -> Result<Vec<Tournament>> {
    let needle = text.trim().to_lowercase();
    if needle.is_empty() {
        anyhow::bail!("Search text is required");
    }

    let sql = format!("{} ORDER BY id DESC", SELECT_COLUMNS);
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], parse_tournament_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to search tournaments")?;

    rows.into_iter()
        .filter(|row| row.name.to_lowercase().contains(&needle))
        .map(|row| {
            let ranking_list = load_ranking_list(conn, row.id)?;
            row.into_tournament(ranking_list)
        })
        .collect()
}

fn load_with_ranking_list(conn: &Connection, row: Option<TournamentRow>) -> Result<Option<Tournament>> {
    match row {
        Some(row) => {
            let ranking_list = load_ranking_list(conn, row.id)?;
            Ok(Some(row.into_tournament(ranking_list)?))
        }
        None => Ok(None),
    }
}

fn parse_tournament_row(row: &rusqlite::Row) -> rusqlite::Result<TournamentRow> {
    Ok(TournamentRow {
        id: row.get(0)?,
        name: row.get(1)?,
        win_points: row.get(2)?,
        draw_points: row.get(3)?,
        lose_points: row.get(4)?,
        speed: row.get(5)?,
        board_type: row.get(6)?,
    })
}

pub fn load_ranking_list(conn: &Connection, tournament_id: TournamentId) -> Result<Vec<RankingSystem>> {
    let sql = "SELECT code FROM ranking_criteria WHERE tournament_id = ?1 ORDER BY position";

    let mut stmt = conn.prepare(sql)?;
    let codes = stmt
        .query_map(params![tournament_id], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    codes.iter().map(|code| RankingSystem::from_code(code)).collect()
}

/// Replaces the stored tie-break list with the tournament's current one
pub fn save_ranking_list(conn: &Connection, tournament: &Tournament) -> Result<()> {
    conn.execute(
        "DELETE FROM ranking_criteria WHERE tournament_id = ?1",
        params![tournament.id],
    )
    .context("Failed to clear ranking criteria")?;

    for (position, criterion) in tournament.ranking_list.iter().enumerate() {
        conn.execute(
            "INSERT INTO ranking_criteria (tournament_id, position, code) VALUES (?1, ?2, ?3)",
            params![tournament.id, position as i64, criterion.as_str()],
        )
        .with_context(|| format!("Failed to store ranking criterion {}", criterion.as_str()))?;
    }

    Ok(())
}
