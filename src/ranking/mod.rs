pub mod order;
pub mod scores;
pub mod stats;
pub mod types;

pub use order::{compute_ranking, ranking_criteria};
pub use scores::compute_scores;
pub use stats::compute_supplementary_stats;
pub use types::{PlayerStats, Ranking, RankingEntry, StatsMap};
