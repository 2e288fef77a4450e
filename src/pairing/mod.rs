pub mod circle;
pub mod scheduler;
mod store;
pub mod types;

pub use circle::{generate_schedule, schedule_players, seat_players};
pub use scheduler::{ScheduleOutcome, SkipReason, create_rounds};
pub use store::{MemoryRoundStore, RoundStore};
pub use types::{PlannedPairing, RoundPlan, Seat};
