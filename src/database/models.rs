use anyhow::Result;

use crate::domain::{
    BoardType, Game, GameId, GameResult, PlayerId, RankingSystem, RoundId, ScoringPoints, Tournament,
    TournamentId, TournamentSpeed,
};

/// Raw `tournaments` row, codes still as stored
#[derive(Debug, Clone)]
pub struct TournamentRow {
    pub id: TournamentId,
    pub name: String,
    pub win_points: f64,
    pub draw_points: f64,
    pub lose_points: f64,
    pub speed: String,
    pub board_type: String,
}

impl TournamentRow {
    pub fn into_tournament(self, ranking_list: Vec<RankingSystem>) -> Result<Tournament> {
        Ok(Tournament {
            id: self.id,
            name: self.name,
            scoring: ScoringPoints {
                win: self.win_points,
                draw: self.draw_points,
                lose: self.lose_points,
            },
            speed: TournamentSpeed::from_code(&self.speed)?,
            board_type: BoardType::from_code(&self.board_type)?,
            ranking_list,
        })
    }
}

#[derive(Debug, Clone)]
pub struct GameRow {
    pub id: GameId,
    pub round_id: RoundId,
    pub white_id: Option<PlayerId>,
    pub black_id: Option<PlayerId>,
    pub finished: bool,
    pub result: String,
}

impl GameRow {
    pub fn into_game(self) -> Result<Game> {
        Ok(Game {
            id: self.id,
            round_id: self.round_id,
            white: self.white_id,
            black: self.black_id,
            finished: self.finished,
            result: GameResult::from_code(&self.result)?,
        })
    }
}
