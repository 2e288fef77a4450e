use super::types::{PlayerStats, StatsMap};
use crate::domain::{Game, GameResult, PlayerId, Roster, ScoringPoints};

/// Plain score of every roster player over the finished games. Players
/// without finished games keep 0.0.
pub fn compute_scores(scoring: &ScoringPoints, roster: &Roster, games: &[Game]) -> StatsMap {
    let mut scores = initialize_scores(roster);

    for game in games.iter().filter(|g| g.finished) {
        for (player_id, points) in award_points(game, scoring) {
            add_points(&mut scores, player_id, points);
        }
    }

    scores
}

fn initialize_scores(roster: &Roster) -> StatsMap {
    roster
        .players()
        .iter()
        .map(|p| (p.id, PlayerStats::default()))
        .collect()
}

fn add_points(scores: &mut StatsMap, player_id: PlayerId, points: f64) {
    if let Some(stats) = scores.get_mut(&player_id) {
        stats.plain_score += points;
    }
}

/// Points each side earns from one finished game
fn award_points(game: &Game, scoring: &ScoringPoints) -> Vec<(PlayerId, f64)> {
    match (game.white, game.black) {
        (Some(white), Some(black)) => award_played(game.result, white, black, scoring),
        (Some(present), None) | (None, Some(present)) => award_bye(game.result, present, scoring),
        (None, None) => Vec::new(),
    }
}

fn award_played(
    result: GameResult,
    white: PlayerId,
    black: PlayerId,
    scoring: &ScoringPoints,
) -> Vec<(PlayerId, f64)> {
    match result {
        GameResult::WhiteWins => vec![(white, scoring.win), (black, scoring.lose)],
        GameResult::BlackWins => vec![(white, scoring.lose), (black, scoring.win)],
        GameResult::Draw => vec![(white, scoring.draw), (black, scoring.draw)],
        GameResult::ForfeitWin => vec![(white, scoring.win)],
        GameResult::ByeFull
        | GameResult::ByeUnplayed
        | GameResult::ByeHalf
        | GameResult::ByeZero
        | GameResult::NotAvailable => Vec::new(),
    }
}

fn award_bye(result: GameResult, present: PlayerId, scoring: &ScoringPoints) -> Vec<(PlayerId, f64)> {
    match result {
        GameResult::ByeFull | GameResult::ByeUnplayed => vec![(present, scoring.win)],
        GameResult::ByeHalf => vec![(present, scoring.draw)],
        GameResult::ByeZero
        | GameResult::WhiteWins
        | GameResult::BlackWins
        | GameResult::Draw
        | GameResult::ForfeitWin
        | GameResult::NotAvailable => Vec::new(),
    }
}
