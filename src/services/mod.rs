pub mod report;
pub mod tournament;

pub use tournament::{NewTournament, RoundSummary, RoundWithGames, Standings, TournamentService};
