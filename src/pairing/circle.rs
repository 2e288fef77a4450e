use log::debug;

use super::types::{PlannedPairing, RoundPlan, Seat};
use crate::domain::PlayerId;

/// Seats the roster in order, adding a bye seat when the count is odd
pub fn seat_players(player_ids: &[PlayerId]) -> Vec<Seat> {
    let mut seats: Vec<Seat> = player_ids.iter().copied().map(Seat::Player).collect();

    if needs_bye_seat(seats.len()) {
        seats.push(Seat::Bye);
    }

    seats
}

fn needs_bye_seat(count: usize) -> bool {
    count % 2 == 1
}

/// Schedule straight from a roster. A lone player has nobody to meet, so
/// fewer than two players give no rounds at all.
pub fn schedule_players(player_ids: &[PlayerId]) -> Vec<RoundPlan> {
    if player_ids.len() < 2 {
        return Vec::new();
    }
    generate_schedule(&seat_players(player_ids))
}

/// Full single round-robin over an even number of seats: one round per
/// seat except the fixed one. Odd seat lists must go through
/// `seat_players` first.
pub fn generate_schedule(seats: &[Seat]) -> Vec<RoundPlan> {
    if seats.len() < 2 {
        return Vec::new();
    }
    debug_assert!(seats.len() % 2 == 0, "odd seat count {}", seats.len());

    let rounds_count = seats.len() - 1;
    debug!("Generating {} rounds for {} seats", rounds_count, seats.len());

    (0..rounds_count)
        .map(|round_index| build_round(seats, round_index))
        .collect()
}

fn build_round(seats: &[Seat], round_index: usize) -> RoundPlan {
    let number = (round_index + 1) as u32;
    let rotated = seats_for_round(seats, round_index);

    RoundPlan {
        number,
        pairings: pair_seats(&rotated, number),
    }
}

/// Seat order for a round: the last seat stays put and the others move
/// `round_index` places clockwise. Index 0 is the initial order.
pub fn seats_for_round(seats: &[Seat], round_index: usize) -> Vec<Seat> {
    let Some((fixed, rest)) = seats.split_last() else {
        return Vec::new();
    };

    let mut rotated = rest.to_vec();
    let len = rotated.len();
    if len > 0 {
        rotated.rotate_right(round_index % len);
    }
    rotated.push(*fixed);
    rotated
}

/// Pairs seat i with seat n-1-i (0-based) and assigns colors
pub fn pair_seats(seats: &[Seat], round_number: u32) -> Vec<PlannedPairing> {
    let n = seats.len();

    (0..n / 2)
        .map(|board| {
            let top = seats[board];
            let bottom = seats[n - 1 - board];
            build_pairing(board, top, bottom, round_number)
        })
        .collect()
}

fn build_pairing(board: usize, top: Seat, bottom: Seat, round_number: u32) -> PlannedPairing {
    let (white, black) = if top_plays_white(board, round_number) {
        (top, bottom)
    } else {
        (bottom, top)
    };

    match (white.player(), black.player()) {
        (None, present) | (present, None) => PlannedPairing {
            board,
            white: present,
            black: None,
        },
        (white, black) => PlannedPairing { board, white, black },
    }
}

/// Board 0 holds the fixed seat, which alternates colors every round. The
/// other boards alternate by board parity; rotation then moves each player
/// across boards so colors even out over the schedule.
fn top_plays_white(board: usize, round_number: u32) -> bool {
    if board == 0 {
        round_number % 2 == 1
    } else {
        board % 2 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    fn ids(n: i64) -> Vec<PlayerId> {
        (1..=n).collect()
    }

    fn unordered(p: &PlannedPairing) -> Option<(PlayerId, PlayerId)> {
        let (a, b) = (p.white?, p.black?);
        Some((a.min(b), a.max(b)))
    }

    #[test]
    fn test_even_roster_gets_no_bye_seat() {
        assert_eq!(seat_players(&ids(4)).len(), 4);
        let seats = seat_players(&ids(5));
        assert_eq!(seats.len(), 6);
        assert_eq!(seats.last(), Some(&Seat::Bye));
    }

    #[test]
    fn test_round_one_pairs_outer_seats() {
        let seats = seat_players(&ids(4));
        let schedule = generate_schedule(&seats);
        let first: Vec<_> = schedule[0].pairings.iter().filter_map(unordered).collect();
        assert_eq!(first, vec![(1, 4), (2, 3)]);
    }

    #[test]
    fn test_rotation_keeps_last_seat_fixed() {
        let seats = seat_players(&ids(6));
        for round_index in 0..5 {
            let rotated = seats_for_round(&seats, round_index);
            assert_eq!(rotated.len(), 6);
            assert_eq!(rotated[5], Seat::Player(6));
        }
        assert_eq!(
            seats_for_round(&seats, 1)[..5],
            [Seat::Player(5), Seat::Player(1), Seat::Player(2), Seat::Player(3), Seat::Player(4)]
        );
        assert_eq!(seats_for_round(&seats, 5), seats);
    }

    #[test]
    fn test_round_robin_is_complete_for_even_rosters() {
        for n in (2..=16).step_by(2) {
            let schedule = generate_schedule(&seat_players(&ids(n)));
            assert_eq!(schedule.len(), (n - 1) as usize);

            let mut pairs = HashSet::new();
            for round in &schedule {
                assert_eq!(round.pairings.len(), (n / 2) as usize);
                for pairing in &round.pairings {
                    assert!(pairs.insert(unordered(pairing).unwrap()), "pair repeated for n={}", n);
                }
            }
            assert_eq!(pairs.len(), (n * (n - 1) / 2) as usize);
        }
    }

    #[test]
    fn test_nobody_plays_twice_in_a_round() {
        for n in 2..=13 {
            for round in generate_schedule(&seat_players(&ids(n))) {
                let mut seen = HashSet::new();
                for pairing in &round.pairings {
                    for id in [pairing.white, pairing.black].into_iter().flatten() {
                        assert!(seen.insert(id), "player {} twice in round {}", id, round.number);
                    }
                }
            }
        }
    }

    #[test]
    fn test_odd_roster_gives_everyone_one_bye() {
        let schedule = generate_schedule(&seat_players(&ids(5)));
        assert_eq!(schedule.len(), 5);

        let mut byes: HashMap<PlayerId, usize> = HashMap::new();
        for round in &schedule {
            let round_byes: Vec<_> = round.pairings.iter().filter(|p| p.is_bye()).collect();
            assert_eq!(round_byes.len(), 1);
            assert_eq!(round.pairings.len() - round_byes.len(), 2);
            *byes.entry(round_byes[0].white.unwrap()).or_insert(0) += 1;
        }
        assert_eq!(byes.len(), 5);
        assert!(byes.values().all(|&count| count == 1));
    }

    #[test]
    fn test_colors_are_balanced() {
        for n in (2..=14).step_by(2) {
            let mut whites: HashMap<PlayerId, i64> = HashMap::new();
            for round in generate_schedule(&seat_players(&ids(n))) {
                for pairing in &round.pairings {
                    *whites.entry(pairing.white.unwrap()).or_insert(0) += 1;
                }
            }
            for id in ids(n) {
                let white = whites.get(&id).copied().unwrap_or(0);
                let black = (n - 1) - white;
                assert!((white - black).abs() <= 1, "n={} player={} w={} b={}", n, id, white, black);
            }
        }
    }

    #[test]
    fn test_fixed_seat_alternates_colors() {
        let schedule = generate_schedule(&seat_players(&ids(6)));
        for round in &schedule {
            let board = &round.pairings[0];
            let fixed_is_white = board.white == Some(6);
            assert_eq!(fixed_is_white, round.number % 2 == 0);
        }
    }

    #[test]
    fn test_schedule_is_deterministic() {
        let seats = seat_players(&ids(8));
        assert_eq!(generate_schedule(&seats), generate_schedule(&seats));
    }

    #[test]
    fn test_single_player_gets_no_rounds() {
        assert!(schedule_players(&ids(1)).is_empty());
        assert!(schedule_players(&[]).is_empty());
        assert!(generate_schedule(&[Seat::Player(1)]).is_empty());
        assert_eq!(schedule_players(&ids(3)).len(), 3);
    }

    #[test]
    fn test_rotation_wraps_past_a_full_turn() {
        let seats = seat_players(&ids(4));
        assert_eq!(seats_for_round(&seats, 4), seats_for_round(&seats, 1));
        assert_eq!(seats_for_round(&[Seat::Player(1)], 3), vec![Seat::Player(1)]);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "odd seat count 3")]
    fn test_odd_seat_list_is_rejected() {
        generate_schedule(&[Seat::Player(1), Seat::Player(2), Seat::Player(3)]);
    }
}
