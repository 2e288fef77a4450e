use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};

use crate::domain::{Player, PlayerId, PlayerRatings, Roster, TournamentId};

const PLAYER_COLUMNS: &str = "id, name, email, lichess_username, lichess_rating_bullet, lichess_rating_blitz, lichess_rating_rapid, lichess_rating_classical, fide_rating_blitz, fide_rating_rapid, fide_rating_classical";

fn qualified_columns(alias: &str) -> String {
    PLAYER_COLUMNS
        .split(", ")
        .map(|column| format!("{}.{}", alias, column))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Stores the player, reusing the existing record with the same Lichess
/// username. A reused record gets the new name and ratings.
pub fn upsert_player(conn: &Connection, player: &Player) -> Result<Player> {
    if let Some(existing) = find_by_lichess_username(conn, player.lichess_username.as_deref())? {
        return update_player(conn, existing.id, player);
    }

    insert_new_player(conn, player)
}

fn find_by_lichess_username(conn: &Connection, username: Option<&str>) -> Result<Option<Player>> {
    let Some(username) = username.filter(|u| !u.is_empty()) else {
        return Ok(None);
    };
    let sql = format!("SELECT {} FROM players WHERE lichess_username = ?1", PLAYER_COLUMNS);

    conn.query_row(&sql, params![username], parse_player_row)
        .optional()
        .context("Failed to query player by lichess username")
}

fn insert_new_player(conn: &Connection, player: &Player) -> Result<Player> {
    let ratings = &player.ratings;
    let sql = format!(
        "INSERT INTO players (name, email, lichess_username, lichess_rating_bullet, lichess_rating_blitz, lichess_rating_rapid, lichess_rating_classical, fide_rating_blitz, fide_rating_rapid, fide_rating_classical) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10) RETURNING {}",
        PLAYER_COLUMNS
    );

    conn.query_row(
        &sql,
        params![
            player.name,
            player.email,
            player.lichess_username.as_deref().filter(|u| !u.is_empty()),
            ratings.lichess_rating_bullet,
            ratings.lichess_rating_blitz,
            ratings.lichess_rating_rapid,
            ratings.lichess_rating_classical,
            ratings.fide_rating_blitz,
            ratings.fide_rating_rapid,
            ratings.fide_rating_classical
        ],
        parse_player_row,
    )
    .with_context(|| format!("Failed to insert player {}", player.display_name()))
}

fn update_player(conn: &Connection, id: PlayerId, player: &Player) -> Result<Player> {
    let ratings = &player.ratings;
    let sql = format!(
        "UPDATE players SET name = ?1, email = ?2, lichess_rating_bullet = ?3, lichess_rating_blitz = ?4, lichess_rating_rapid = ?5, lichess_rating_classical = ?6, fide_rating_blitz = ?7, fide_rating_rapid = ?8, fide_rating_classical = ?9 WHERE id = ?10 RETURNING {}",
        PLAYER_COLUMNS
    );

    conn.query_row(
        &sql,
        params![
            player.name,
            player.email,
            ratings.lichess_rating_bullet,
            ratings.lichess_rating_blitz,
            ratings.lichess_rating_rapid,
            ratings.lichess_rating_classical,
            ratings.fide_rating_blitz,
            ratings.fide_rating_rapid,
            ratings.fide_rating_classical,
            id
        ],
        parse_player_row,
    )
    .with_context(|| format!("Failed to update player {}", id))
}

fn parse_player_row(row: &rusqlite::Row) -> rusqlite::Result<Player> {
    Ok(Player {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        lichess_username: row.get(3)?,
        ratings: PlayerRatings {
            lichess_rating_bullet: row.get(4)?,
            lichess_rating_blitz: row.get(5)?,
            lichess_rating_rapid: row.get(6)?,
            lichess_rating_classical: row.get(7)?,
            fide_rating_blitz: row.get(8)?,
            fide_rating_rapid: row.get(9)?,
            fide_rating_classical: row.get(10)?,
        },
    })
}

pub fn find_by_id(conn: &Connection, id: PlayerId) -> Result<Option<Player>> {
    let sql = format!("SELECT {} FROM players WHERE id = ?1", PLAYER_COLUMNS);

    conn.query_row(&sql, params![id], parse_player_row)
        .optional()
        .context("Failed to query player by id")
}

/// Appends the player to the tournament roster. Already enrolled players
/// keep their position.
pub fn enrol_player(conn: &Connection, tournament_id: TournamentId, player_id: PlayerId) -> Result<()> {
    let sql = "INSERT OR IGNORE INTO tournament_players (tournament_id, player_id, position) VALUES (?1, ?2, (SELECT COUNT(*) FROM tournament_players WHERE tournament_id = ?1))";

    conn.execute(sql, params![tournament_id, player_id])
        .with_context(|| format!("Failed to enrol player {} in tournament {}", player_id, tournament_id))?;
    Ok(())
}

/// Roster in enrolment order
pub fn list_roster(conn: &Connection, tournament_id: TournamentId) -> Result<Roster> {
    let sql = format!(
        "SELECT {} FROM players p JOIN tournament_players tp ON tp.player_id = p.id WHERE tp.tournament_id = ?1 ORDER BY tp.position",
        qualified_columns("p")
    );

    let mut stmt = conn.prepare(&sql)?;
    let players = stmt
        .query_map(params![tournament_id], parse_player_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to list tournament roster")?;

    Ok(Roster::new(players))
}

pub fn count_players(conn: &Connection, tournament_id: TournamentId) -> Result<usize> {
    let sql = "SELECT COUNT(*) FROM tournament_players WHERE tournament_id = ?1";
    let count: i64 = conn
        .query_row(sql, params![tournament_id], |row| row.get(0))
        .context("Failed to count tournament players")?;
    Ok(count as usize)
}
