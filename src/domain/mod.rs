mod codes;
pub mod models;
mod roster;

pub use codes::{BoardType, GameResult, RankingSystem, TournamentSpeed};
pub use models::*;
pub use roster::Roster;
