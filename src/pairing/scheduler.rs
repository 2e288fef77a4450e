use anyhow::Result;
use log::{debug, info, warn};

use super::circle::schedule_players;
use super::store::RoundStore;
use super::types::RoundPlan;
use crate::domain::{PlayerId, Roster, Tournament};

/// Why a scheduling request did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingTournament,
    EmptyRoster,
}

impl SkipReason {
    pub fn message(&self) -> &'static str {
        match self {
            SkipReason::MissingTournament => "Tournament does not exist, no rounds created",
            SkipReason::EmptyRoster => "No players in the tournament, no rounds created",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleOutcome {
    Skipped(SkipReason),
    Created { rounds: usize, pairings: usize },
}

/// Generates the full round-robin for the roster and hands every round to
/// the store in order.
///
/// A missing tournament or an empty roster is not an error: a warning is
/// logged and nothing is created. Calling this twice for the same tournament
/// stores a second schedule. `bye_exemptions` is accepted for Swiss-style
/// byes and currently has no effect.
pub fn create_rounds<S: RoundStore + ?Sized>(
    tournament: Option<&Tournament>,
    roster: &Roster,
    bye_exemptions: &[PlayerId],
    store: &mut S,
) -> Result<ScheduleOutcome> {
    let Some(tournament) = tournament else {
        return Ok(skip(SkipReason::MissingTournament));
    };

    if roster.is_empty() {
        return Ok(skip(SkipReason::EmptyRoster));
    }

    if !bye_exemptions.is_empty() {
        debug!("Ignoring {} bye exemptions for round robin", bye_exemptions.len());
    }

    let schedule = schedule_players(&roster.ids());
    store_schedule(tournament, &schedule, store)
}

fn skip(reason: SkipReason) -> ScheduleOutcome {
    warn!("{}", reason.message());
    ScheduleOutcome::Skipped(reason)
}

fn store_schedule<S: RoundStore + ?Sized>(
    tournament: &Tournament,
    schedule: &[RoundPlan],
    store: &mut S,
) -> Result<ScheduleOutcome> {
    let rounds = store.save_schedule(tournament, schedule)?;
    let mut pairings = 0;

    for (round, plan) in rounds.iter().zip(schedule) {
        pairings += plan.pairings.len();
        debug!("  → Stored {} with {} pairings", round.name, plan.pairings.len());
    }

    info!(
        "Created {} rounds ({} pairings) for tournament {}",
        schedule.len(),
        pairings,
        tournament.name
    );

    Ok(ScheduleOutcome::Created {
        rounds: schedule.len(),
        pairings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Player;
    use crate::pairing::MemoryRoundStore;

    fn roster_of(names: &[&str]) -> Roster {
        names
            .iter()
            .enumerate()
            .map(|(idx, name)| Player::new(idx as i64 + 1, name))
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn test_missing_tournament_is_a_noop() {
        let mut store = MemoryRoundStore::new();
        let outcome = create_rounds(None, &roster_of(&["a", "b"]), &[], &mut store).unwrap();

        assert_eq!(outcome, ScheduleOutcome::Skipped(SkipReason::MissingTournament));
        assert_eq!(
            SkipReason::MissingTournament.message(),
            "Tournament does not exist, no rounds created"
        );
        assert!(store.rounds().is_empty());
    }

    #[test]
    fn test_empty_roster_is_a_noop_every_time() {
        let tournament = Tournament::new(1, "Empty");
        let mut store = MemoryRoundStore::new();

        for _ in 0..2 {
            let outcome = create_rounds(Some(&tournament), &Roster::default(), &[1, 2], &mut store).unwrap();
            assert_eq!(outcome, ScheduleOutcome::Skipped(SkipReason::EmptyRoster));
            if let ScheduleOutcome::Skipped(reason) = outcome {
                assert_eq!(reason.message(), "No players in the tournament, no rounds created");
            }
        }
        assert!(store.rounds().is_empty());
        assert!(store.games().is_empty());
    }

    #[test]
    fn test_rounds_are_stored_in_order() {
        let tournament = Tournament::new(1, "Club");
        let mut store = MemoryRoundStore::new();

        let outcome = create_rounds(Some(&tournament), &roster_of(&["a", "b", "c", "d"]), &[], &mut store).unwrap();

        assert_eq!(outcome, ScheduleOutcome::Created { rounds: 3, pairings: 6 });
        let names: Vec<_> = store.rounds().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["round_001", "round_002", "round_003"]);
        assert_eq!(store.games().len(), 6);
    }

    #[test]
    fn test_bye_exemptions_do_not_change_the_schedule() {
        let tournament = Tournament::new(1, "Club");
        let roster = roster_of(&["a", "b", "c", "d", "e"]);

        let mut plain = MemoryRoundStore::new();
        let mut exempted = MemoryRoundStore::new();
        create_rounds(Some(&tournament), &roster, &[], &mut plain).unwrap();
        create_rounds(Some(&tournament), &roster, &[1, 3], &mut exempted).unwrap();

        assert_eq!(plain.games(), exempted.games());
    }

    #[test]
    fn test_single_player_creates_nothing() {
        let tournament = Tournament::new(1, "Solo");
        let mut store = MemoryRoundStore::new();

        let outcome = create_rounds(Some(&tournament), &roster_of(&["a"]), &[], &mut store).unwrap();

        assert_eq!(outcome, ScheduleOutcome::Created { rounds: 0, pairings: 0 });
        assert!(store.rounds().is_empty());
    }

    #[test]
    fn test_scheduling_twice_duplicates_the_schedule() {
        let tournament = Tournament::new(1, "Club");
        let roster = roster_of(&["a", "b"]);
        let mut store = MemoryRoundStore::new();

        create_rounds(Some(&tournament), &roster, &[], &mut store).unwrap();
        create_rounds(Some(&tournament), &roster, &[], &mut store).unwrap();

        let names: Vec<_> = store.rounds().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["round_001", "round_002"]);
    }
}
