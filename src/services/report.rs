use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use super::tournament::{RoundWithGames, Standings};
use crate::domain::{Game, NO_IDENTITY, PlayerId, Roster, Tournament};

#[derive(Debug, Serialize)]
struct StandingRow<'a> {
    rank: usize,
    player: String,
    plain_score: f64,
    wins: u32,
    black_times: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    lichess_username: Option<&'a str>,
}

fn player_label(roster: &Roster, id: Option<PlayerId>) -> String {
    id.and_then(|id| roster.get(id))
        .map(|p| p.display_name())
        .unwrap_or_else(|| NO_IDENTITY.to_string())
}

fn standing_rows(standings: &Standings) -> Vec<StandingRow<'_>> {
    standings
        .ranking
        .entries()
        .iter()
        .map(|entry| {
            let player = standings.roster.get(entry.player_id);
            StandingRow {
                rank: entry.rank,
                player: player_label(&standings.roster, Some(entry.player_id)),
                plain_score: entry.plain_score,
                wins: entry.wins,
                black_times: entry.black_times,
                lichess_username: player.and_then(|p| p.lichess_username.as_deref()),
            }
        })
        .collect()
}

pub fn ranking_json(standings: &Standings) -> Result<String> {
    Ok(serde_json::to_string_pretty(&standing_rows(standings))?)
}

pub fn ranking_table(standings: &Standings) -> String {
    let mut lines = vec![
        format!(
            "{} ({}, {})",
            standings.tournament.name.bold(),
            standings.tournament.speed.as_str(),
            standings.tournament.board_type.as_str()
        ),
        format!("{:>4}  {:<24} {:>6} {:>5} {:>6}", "#", "Player", "Score", "Wins", "Black"),
    ];

    for row in standing_rows(standings) {
        let rank = format!("{:>4}", row.rank);
        let rank = match row.rank {
            1 => rank.yellow().bold(),
            _ => rank.normal(),
        };
        lines.push(format!(
            "{}  {:<24} {:>6} {:>5} {:>6}",
            rank, row.player, row.plain_score, row.wins, row.black_times
        ));
    }

    lines.join("\n")
}

fn game_line(roster: &Roster, game: &Game) -> String {
    let status = if game.finished {
        game.result.as_str().green()
    } else {
        game.result.as_str().dimmed()
    };

    if let Some(player) = game.bye_player() {
        return format!(
            "  [{}] {} has a bye {}",
            game.id,
            player_label(roster, Some(player)),
            status
        );
    }

    format!(
        "  [{}] {} - {} {}",
        game.id,
        player_label(roster, game.white),
        player_label(roster, game.black),
        status
    )
}

pub fn tournament_list(tournaments: &[Tournament]) -> String {
    tournaments
        .iter()
        .map(|t| {
            format!(
                "{:>4}  {} ({}, {})",
                t.id,
                t.name.bold(),
                t.speed.as_str(),
                t.board_type.as_str()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn rounds_listing(roster: &Roster, rounds: &[RoundWithGames]) -> String {
    let mut lines = Vec::new();

    for entry in rounds {
        lines.push(format!(
            "{} {}",
            entry.round.name.bold(),
            entry.round.start_date.format("%Y-%m-%d %H:%M")
        ));
        lines.extend(entry.games.iter().map(|game| game_line(roster, game)));
    }

    lines.join("\n")
}
