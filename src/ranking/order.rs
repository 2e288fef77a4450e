use std::cmp::Ordering;

use log::{debug, info};

use super::scores::compute_scores;
use super::stats::compute_supplementary_stats;
use super::types::{PlayerStats, Ranking, RankingEntry, StatsMap};
use crate::domain::{Game, PlayerId, RankingSystem, Roster, Tournament};

/// Orders the roster by plain score, then by the tournament's tie-break
/// list. Higher is better for every criterion, black games included.
/// Players still level keep roster order.
pub fn compute_ranking(tournament: &Tournament, roster: &Roster, games: &[Game]) -> Ranking {
    let scores = compute_scores(&tournament.scoring, roster, games);
    let stats = compute_supplementary_stats(roster, games, scores);

    if !has_finished_games(games) {
        debug!("No finished games in {}, ranking in roster order", tournament.name);
        return build_ranking(roster.ids(), &stats);
    }

    let criteria = ranking_criteria(tournament);
    let ordered = sort_players(roster, &stats, &criteria);

    info!(
        "Ranked {} players of {} by {:?}",
        ordered.len(),
        tournament.name,
        criteria.iter().map(|c| c.as_str()).collect::<Vec<_>>()
    );

    build_ranking(ordered, &stats)
}

fn has_finished_games(games: &[Game]) -> bool {
    games.iter().any(|g| g.finished)
}

/// Plain score first, whatever the configured list says
pub fn ranking_criteria(tournament: &Tournament) -> Vec<RankingSystem> {
    let mut criteria = vec![RankingSystem::PlainScore];

    for criterion in &tournament.ranking_list {
        if !criteria.contains(criterion) {
            criteria.push(*criterion);
        }
    }

    criteria
}

fn sort_players(roster: &Roster, stats: &StatsMap, criteria: &[RankingSystem]) -> Vec<PlayerId> {
    let mut players = roster.ids();
    players.sort_by(|a, b| compare_players(stats_of(stats, *a), stats_of(stats, *b), criteria));
    players
}

fn stats_of(stats: &StatsMap, player_id: PlayerId) -> PlayerStats {
    stats.get(&player_id).copied().unwrap_or_default()
}

fn compare_players(a: PlayerStats, b: PlayerStats, criteria: &[RankingSystem]) -> Ordering {
    criteria
        .iter()
        .map(|criterion| b.value(*criterion).total_cmp(&a.value(*criterion)))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

fn build_ranking(ordered: Vec<PlayerId>, stats: &StatsMap) -> Ranking {
    let entries = ordered
        .into_iter()
        .enumerate()
        .map(|(idx, player_id)| RankingEntry::new(player_id, idx + 1, &stats_of(stats, player_id)))
        .collect();

    Ranking::new(entries)
}
