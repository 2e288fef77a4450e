use chrono::NaiveDateTime;
use log::warn;
use serde::{Deserialize, Serialize};

use super::codes::{BoardType, GameResult, RankingSystem, TournamentSpeed};

pub type PlayerId = i64;
pub type TournamentId = i64;
pub type RoundId = i64;
pub type GameId = i64;

/// Display name of a placeholder record that carries no identity
pub const NO_IDENTITY: &str = "None";

/// Tournament participant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Player {
    #[serde(default)]
    pub id: PlayerId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub lichess_username: Option<String>,
    #[serde(flatten)]
    pub ratings: PlayerRatings,
}

impl Player {
    pub fn new(id: PlayerId, name: &str) -> Self {
        Self {
            id,
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    /// Lichess username, then name, then the numeric id
    pub fn display_name(&self) -> String {
        non_blank(&self.lichess_username)
            .or_else(|| non_blank(&self.name))
            .map(str::to_string)
            .unwrap_or_else(|| self.id.to_string())
    }

    pub fn has_identity(&self) -> bool {
        self.display_name() != NO_IDENTITY
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

/// Ratings by time control, refreshed by an outside rating source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerRatings {
    #[serde(default)]
    pub lichess_rating_bullet: i32,
    #[serde(default)]
    pub lichess_rating_blitz: i32,
    #[serde(default)]
    pub lichess_rating_rapid: i32,
    #[serde(default)]
    pub lichess_rating_classical: i32,
    #[serde(default)]
    pub fide_rating_blitz: i32,
    #[serde(default)]
    pub fide_rating_rapid: i32,
    #[serde(default)]
    pub fide_rating_classical: i32,
}

impl PlayerRatings {
    /// Rating used to seed a tournament, `None` when no rating applies
    pub fn for_category(&self, speed: TournamentSpeed, board: BoardType) -> Option<i32> {
        match (board, speed) {
            (BoardType::Lichess, TournamentSpeed::Bullet) => Some(self.lichess_rating_bullet),
            (BoardType::Lichess, TournamentSpeed::Blitz) => Some(self.lichess_rating_blitz),
            (BoardType::Lichess, TournamentSpeed::Rapid) => Some(self.lichess_rating_rapid),
            (BoardType::Lichess, TournamentSpeed::Classical) => {
                Some(self.lichess_rating_classical)
            }
            (BoardType::OverTheBoard, TournamentSpeed::Blitz) => Some(self.fide_rating_blitz),
            (BoardType::OverTheBoard, TournamentSpeed::Rapid) => Some(self.fide_rating_rapid),
            (BoardType::OverTheBoard, TournamentSpeed::Classical) => {
                Some(self.fide_rating_classical)
            }
            (BoardType::OverTheBoard, TournamentSpeed::Bullet) => None,
        }
    }
}

/// Points awarded per game outcome
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringPoints {
    pub win: f64,
    pub draw: f64,
    pub lose: f64,
}

impl Default for ScoringPoints {
    fn default() -> Self {
        Self {
            win: 1.0,
            draw: 0.5,
            lose: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub scoring: ScoringPoints,
    pub speed: TournamentSpeed,
    pub board_type: BoardType,
    /// Tie-break criteria applied after plain score, in order
    pub ranking_list: Vec<RankingSystem>,
}

impl Tournament {
    pub fn new(id: TournamentId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            scoring: ScoringPoints::default(),
            speed: TournamentSpeed::default(),
            board_type: BoardType::default(),
            ranking_list: Vec::new(),
        }
    }

    /// Returns false and leaves the list untouched when already present
    pub fn add_to_ranking_list(&mut self, criterion: RankingSystem) -> bool {
        if self.ranking_list.contains(&criterion) {
            warn!(
                "Ranking criterion {} already in the list of tournament {}",
                criterion.as_str(),
                self.name
            );
            return false;
        }
        self.ranking_list.push(criterion);
        true
    }

    /// Returns false when the criterion was not in the list
    pub fn remove_from_ranking_list(&mut self, criterion: RankingSystem) -> bool {
        let before = self.ranking_list.len();
        self.ranking_list.retain(|c| *c != criterion);

        if self.ranking_list.len() == before {
            warn!(
                "Ranking criterion {} not found in the list of tournament {}",
                criterion.as_str(),
                self.name
            );
            return false;
        }
        true
    }

    pub fn clean_ranking_list(&mut self) {
        self.ranking_list.clear();
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub id: RoundId,
    pub tournament_id: TournamentId,
    pub number: u32,
    pub name: String,
    pub start_date: NaiveDateTime,
    pub finished: bool,
}

/// Sequential round name, e.g. `round_001`
pub fn round_name(number: u32) -> String {
    format!("round_{:03}", number)
}

/// A pairing; a missing side means a bye
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub round_id: RoundId,
    pub white: Option<PlayerId>,
    pub black: Option<PlayerId>,
    pub finished: bool,
    pub result: GameResult,
}

impl Game {
    pub fn new(id: GameId, round_id: RoundId, white: Option<PlayerId>, black: Option<PlayerId>) -> Self {
        Self {
            id,
            round_id,
            white,
            black,
            finished: false,
            result: GameResult::NotAvailable,
        }
    }

    pub fn finish(mut self, result: GameResult) -> Self {
        self.finished = true;
        self.result = result;
        self
    }

    pub fn is_bye(&self) -> bool {
        self.white.is_none() != self.black.is_none()
    }

    /// The side that is present in a bye pairing
    pub fn bye_player(&self) -> Option<PlayerId> {
        match (self.white, self.black) {
            (Some(id), None) | (None, Some(id)) => Some(id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_prefers_lichess_username() {
        let mut player = Player::new(7, "Magnus");
        assert_eq!(player.display_name(), "Magnus");

        player.lichess_username = Some("drnykterstein".to_string());
        assert_eq!(player.display_name(), "drnykterstein");

        let anonymous = Player {
            id: 42,
            ..Default::default()
        };
        assert_eq!(anonymous.display_name(), "42");
    }

    #[test]
    fn test_sentinel_player_has_no_identity() {
        let player = Player::new(1, NO_IDENTITY);
        assert!(!player.has_identity());
        assert!(Player::new(2, "Judit").has_identity());
    }

    #[test]
    fn test_ranking_list_rejects_duplicates() {
        let mut tournament = Tournament::new(1, "Open");
        assert!(tournament.add_to_ranking_list(RankingSystem::Wins));
        assert!(!tournament.add_to_ranking_list(RankingSystem::Wins));
        assert_eq!(tournament.ranking_list, vec![RankingSystem::Wins]);
    }

    #[test]
    fn test_remove_missing_criterion_is_reported() {
        let mut tournament = Tournament::new(1, "Open");
        tournament.add_to_ranking_list(RankingSystem::Wins);
        tournament.add_to_ranking_list(RankingSystem::BlackTimes);

        assert!(!tournament.remove_from_ranking_list(RankingSystem::PlainScore));
        assert!(tournament.remove_from_ranking_list(RankingSystem::Wins));
        assert_eq!(tournament.ranking_list, vec![RankingSystem::BlackTimes]);

        tournament.clean_ranking_list();
        assert!(tournament.ranking_list.is_empty());
    }

    #[test]
    fn test_round_names_are_zero_padded() {
        assert_eq!(round_name(1), "round_001");
        assert_eq!(round_name(12), "round_012");
    }

    #[test]
    fn test_bye_player() {
        let bye = Game::new(1, 1, Some(3), None);
        assert!(bye.is_bye());
        assert_eq!(bye.bye_player(), Some(3));

        let game = Game::new(2, 1, Some(3), Some(4));
        assert!(!game.is_bye());
        assert_eq!(game.bye_player(), None);
    }

    #[test]
    fn test_otb_bullet_has_no_rating() {
        let ratings = PlayerRatings {
            fide_rating_rapid: 2100,
            ..Default::default()
        };
        assert_eq!(
            ratings.for_category(TournamentSpeed::Rapid, BoardType::OverTheBoard),
            Some(2100)
        );
        assert_eq!(
            ratings.for_category(TournamentSpeed::Bullet, BoardType::OverTheBoard),
            None
        );
    }
}
