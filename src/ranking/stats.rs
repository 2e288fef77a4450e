use log::debug;

use super::types::StatsMap;
use crate::domain::{Game, GameResult, PlayerId, Roster};

/// Adds win counts and games-with-black to already computed scores
pub fn compute_supplementary_stats(roster: &Roster, games: &[Game], mut scores: StatsMap) -> StatsMap {
    for game in games.iter().filter(|g| g.finished) {
        let Some((white, black)) = both_sides(game) else {
            continue;
        };

        if has_placeholder_side(roster, white, black) {
            debug!("Skipping game {} with a placeholder player", game.id);
            continue;
        }

        if let Some(winner) = winner_of(game.result, white, black) {
            if let Some(stats) = scores.get_mut(&winner) {
                stats.wins += 1;
            }
        }

        if counts_as_black_game(game.result) {
            if let Some(stats) = scores.get_mut(&black) {
                stats.black_times += 1;
            }
        }
    }

    scores
}

fn both_sides(game: &Game) -> Option<(PlayerId, PlayerId)> {
    Some((game.white?, game.black?))
}

fn has_placeholder_side(roster: &Roster, white: PlayerId, black: PlayerId) -> bool {
    [white, black]
        .iter()
        .filter_map(|id| roster.get(*id))
        .any(|player| !player.has_identity())
}

fn winner_of(result: GameResult, white: PlayerId, black: PlayerId) -> Option<PlayerId> {
    match result {
        GameResult::WhiteWins => Some(white),
        GameResult::BlackWins => Some(black),
        _ => None,
    }
}

fn counts_as_black_game(result: GameResult) -> bool {
    matches!(
        result,
        GameResult::WhiteWins | GameResult::BlackWins | GameResult::Draw
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NO_IDENTITY, Player, ScoringPoints};
    use crate::ranking::compute_scores;

    fn roster() -> Roster {
        Roster::new(vec![
            Player::new(1, "Player1"),
            Player::new(2, "Player2"),
            Player::new(3, "Player3"),
        ])
    }

    fn played(id: i64, white: i64, black: i64, result: GameResult) -> Game {
        Game::new(id, 1, Some(white), Some(black)).finish(result)
    }

    fn stats_for(roster: &Roster, games: &[Game]) -> StatsMap {
        let scores = compute_scores(&ScoringPoints::default(), roster, games);
        compute_supplementary_stats(roster, games, scores)
    }

    #[test]
    fn test_wins_counted_for_both_colors() {
        let roster = roster();
        let games = vec![
            played(1, 1, 2, GameResult::BlackWins),
            played(2, 1, 3, GameResult::WhiteWins),
        ];
        let stats = stats_for(&roster, &games);

        assert_eq!(stats[&2].wins, 1);
        assert_eq!(stats[&2].black_times, 1);
        assert_eq!(stats[&1].wins, 1);
        assert_eq!(stats[&1].black_times, 0);
        assert_eq!(stats[&3].wins, 0);
        assert_eq!(stats[&3].black_times, 1);
    }

    #[test]
    fn test_draws_count_black_games_but_not_wins() {
        let roster = roster();
        let stats = stats_for(&roster, &[played(1, 1, 3, GameResult::Draw)]);

        assert_eq!(stats[&3].black_times, 1);
        assert_eq!(stats[&1].wins + stats[&3].wins, 0);
    }

    #[test]
    fn test_byes_and_forfeits_are_not_counted() {
        let roster = roster();
        let games = vec![
            Game::new(1, 1, Some(1), None).finish(GameResult::ByeFull),
            Game::new(2, 1, None, Some(2)).finish(GameResult::ByeFull),
            played(3, 3, 2, GameResult::ForfeitWin),
        ];
        let stats = stats_for(&roster, &games);

        assert!(stats.values().all(|s| s.wins == 0 && s.black_times == 0));
        assert_eq!(stats[&3].plain_score, 1.0);
    }

    #[test]
    fn test_placeholder_players_are_skipped() {
        let roster = Roster::new(vec![Player::new(1, "Player1"), Player::new(2, NO_IDENTITY)]);
        let stats = stats_for(&roster, &[played(1, 1, 2, GameResult::WhiteWins)]);

        assert_eq!(stats[&1].wins, 0);
        assert_eq!(stats[&2].black_times, 0);
        assert_eq!(stats[&1].plain_score, 1.0);
    }

    #[test]
    fn test_unfinished_games_are_ignored() {
        let roster = roster();
        let mut game = Game::new(1, 1, Some(1), Some(2));
        game.result = GameResult::BlackWins;
        let stats = stats_for(&roster, &[game]);

        assert_eq!(stats[&2].wins, 0);
        assert_eq!(stats[&2].black_times, 0);
    }
}
