use std::cmp::Reverse;

use super::codes::{BoardType, TournamentSpeed};
use super::models::{Player, PlayerId};

/// Ordered tournament participants. Order is the pairing seed order and the
/// fallback ranking order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    pub fn new(players: Vec<Player>) -> Self {
        Self { players }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn ids(&self) -> Vec<PlayerId> {
        self.players.iter().map(|p| p.id).collect()
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Highest rated first for the tournament's category. Categories without
    /// a rating keep insertion order.
    pub fn sorted_by_rating(&self, speed: TournamentSpeed, board: BoardType) -> Roster {
        let mut players = self.players.clone();
        players.sort_by_key(|p| Reverse(p.ratings.for_category(speed, board).unwrap_or(0)));
        Roster::new(players)
    }
}

impl From<Vec<Player>> for Roster {
    fn from(players: Vec<Player>) -> Self {
        Self::new(players)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PlayerRatings;

    fn rated(id: PlayerId, name: &str, ratings: PlayerRatings) -> Player {
        Player {
            ratings,
            ..Player::new(id, name)
        }
    }

    fn sample_roster() -> Roster {
        Roster::new(vec![
            rated(
                1,
                "Player1",
                PlayerRatings {
                    lichess_rating_rapid: 2000,
                    fide_rating_classical: 2100,
                    ..Default::default()
                },
            ),
            rated(
                2,
                "Player2",
                PlayerRatings {
                    lichess_rating_rapid: 1500,
                    fide_rating_classical: 2400,
                    ..Default::default()
                },
            ),
            rated(3, "Player3", PlayerRatings::default()),
        ])
    }

    #[test]
    fn test_sorted_by_fide_classical() {
        let sorted = sample_roster().sorted_by_rating(TournamentSpeed::Classical, BoardType::OverTheBoard);
        assert_eq!(sorted.ids(), vec![2, 1, 3]);
    }

    #[test]
    fn test_sorted_by_lichess_rapid() {
        let sorted = sample_roster().sorted_by_rating(TournamentSpeed::Rapid, BoardType::Lichess);
        assert_eq!(sorted.ids(), vec![1, 2, 3]);
    }

    #[test]
    fn test_unrated_category_keeps_insertion_order() {
        let sorted = sample_roster().sorted_by_rating(TournamentSpeed::Bullet, BoardType::OverTheBoard);
        assert_eq!(sorted.ids(), vec![1, 2, 3]);
    }

    #[test]
    fn test_lookup_by_id() {
        let roster = sample_roster();
        assert_eq!(roster.get(2).map(|p| p.display_name()), Some("Player2".to_string()));
        assert!(roster.get(9).is_none());
    }
}
