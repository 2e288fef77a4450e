use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Outcome of a single game, as recorded by the referee
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameResult {
    #[serde(rename = "w")]
    WhiteWins,
    #[serde(rename = "b")]
    BlackWins,
    #[serde(rename = "=")]
    Draw,
    /// White wins by default, black never showed up
    #[serde(rename = "+")]
    ForfeitWin,
    #[serde(rename = "F")]
    ByeFull,
    #[serde(rename = "U")]
    ByeUnplayed,
    #[serde(rename = "H")]
    ByeHalf,
    #[serde(rename = "Z")]
    ByeZero,
    #[default]
    #[serde(rename = "*")]
    NotAvailable,
}

impl GameResult {
    pub const ALL: [GameResult; 9] = [
        GameResult::WhiteWins,
        GameResult::BlackWins,
        GameResult::Draw,
        GameResult::ForfeitWin,
        GameResult::ByeFull,
        GameResult::ByeUnplayed,
        GameResult::ByeHalf,
        GameResult::ByeZero,
        GameResult::NotAvailable,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameResult::WhiteWins => "w",
            GameResult::BlackWins => "b",
            GameResult::Draw => "=",
            GameResult::ForfeitWin => "+",
            GameResult::ByeFull => "F",
            GameResult::ByeUnplayed => "U",
            GameResult::ByeHalf => "H",
            GameResult::ByeZero => "Z",
            GameResult::NotAvailable => "*",
        }
    }

    pub fn from_code(code: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|result| result.as_str() == code)
            .ok_or_else(|| anyhow::anyhow!("Unknown game result code: {}", code))
    }

    /// Code typed when a game is reported. `d` stands for a draw, and `*`
    /// is refused since a finished game must carry a result.
    pub fn from_reported(code: &str) -> Result<Self> {
        let result = match code.trim() {
            "d" | "D" => GameResult::Draw,
            other => Self::from_code(other)?,
        };

        if result == GameResult::NotAvailable {
            anyhow::bail!("Invalid result value: {} does not finish a game", code);
        }
        Ok(result)
    }

    /// Results a player can report from the board
    pub fn is_over_the_board(&self) -> bool {
        matches!(
            self,
            GameResult::WhiteWins | GameResult::BlackWins | GameResult::Draw
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            GameResult::WhiteWins => "1-0",
            GameResult::BlackWins => "0-1",
            GameResult::Draw => "1/2-1/2",
            GameResult::ForfeitWin => "+/-",
            GameResult::ByeFull => "bye (1)",
            GameResult::ByeUnplayed => "bye (unpaired)",
            GameResult::ByeHalf => "bye (1/2)",
            GameResult::ByeZero => "bye (0)",
            GameResult::NotAvailable => "*",
        }
    }
}

/// Tie-break criteria a tournament may rank by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RankingSystem {
    #[serde(rename = "PS")]
    PlainScore,
    #[serde(rename = "WI")]
    Wins,
    #[serde(rename = "BT")]
    BlackTimes,
}

impl RankingSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            RankingSystem::PlainScore => "PS",
            RankingSystem::Wins => "WI",
            RankingSystem::BlackTimes => "BT",
        }
    }

    pub fn from_code(code: &str) -> Result<Self> {
        match code.trim().to_uppercase().as_str() {
            "PS" => Ok(RankingSystem::PlainScore),
            "WI" => Ok(RankingSystem::Wins),
            "BT" => Ok(RankingSystem::BlackTimes),
            other => anyhow::bail!("Unknown ranking system code: {}", other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TournamentSpeed {
    #[serde(rename = "BU")]
    Bullet,
    #[serde(rename = "BL")]
    Blitz,
    #[default]
    #[serde(rename = "RA")]
    Rapid,
    #[serde(rename = "CL")]
    Classical,
}

impl TournamentSpeed {
    pub fn as_str(&self) -> &'static str {
        match self {
            TournamentSpeed::Bullet => "BU",
            TournamentSpeed::Blitz => "BL",
            TournamentSpeed::Rapid => "RA",
            TournamentSpeed::Classical => "CL",
        }
    }

    pub fn from_code(code: &str) -> Result<Self> {
        match code.trim().to_uppercase().as_str() {
            "BU" => Ok(TournamentSpeed::Bullet),
            "BL" => Ok(TournamentSpeed::Blitz),
            "RA" => Ok(TournamentSpeed::Rapid),
            "CL" => Ok(TournamentSpeed::Classical),
            other => anyhow::bail!("Unknown tournament speed: {}", other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoardType {
    #[default]
    #[serde(rename = "LIC")]
    Lichess,
    #[serde(rename = "OTB")]
    OverTheBoard,
}

impl BoardType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoardType::Lichess => "LIC",
            BoardType::OverTheBoard => "OTB",
        }
    }

    pub fn from_code(code: &str) -> Result<Self> {
        match code.trim().to_uppercase().as_str() {
            "LIC" => Ok(BoardType::Lichess),
            "OTB" => Ok(BoardType::OverTheBoard),
            other => anyhow::bail!("Unknown board type: {}", other),
        }
    }
}
