//! Round and position arithmetic. Pure integer math shared by every bracket operation.

use crate::models::Slot;

/// Number of rounds for a bracket whose first round has `first_round_matches` matches.
/// Zero or one first-round match is a final-only bracket.
pub fn round_count(first_round_matches: usize) -> u32 {
    let mut rounds = 1;
    let mut size = first_round_matches;
    while size > 1 {
        size = size.div_ceil(2);
        rounds += 1;
    }
    rounds
}

/// Number of matches in `round` (1-based). Zero outside `1..=round_count`.
pub fn matches_in_round(first_round_matches: usize, round: u32) -> usize {
    if round == 0 || round > round_count(first_round_matches) {
        return 0;
    }
    let mut size = first_round_matches;
    for _ in 1..round {
        size = size.div_ceil(2);
    }
    size
}

/// Where the match at (`round`, `position`) sends its winner: (round, position, slot).
pub fn successor_of(round: u32, position: u32) -> (u32, u32, Slot) {
    let slot = if position % 2 == 1 { Slot::A } else { Slot::B };
    (round + 1, position.div_ceil(2), slot)
}

/// Position in `round - 1` whose winner lands in `slot` of the match at `position`.
pub fn feeder_position(position: u32, slot: Slot) -> u32 {
    match slot {
        Slot::A => 2 * position - 1,
        Slot::B => 2 * position,
    }
}

/// Whether anything can ever arrive in `slot` of the match at (`round`, `position`).
/// Round-1 slots are filled by seeding and have no feeder.
pub fn feeder_exists(first_round_matches: usize, round: u32, position: u32, slot: Slot) -> bool {
    if round <= 1 {
        return false;
    }
    let feeder = feeder_position(position, slot) as usize;
    feeder <= matches_in_round(first_round_matches, round - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn small_brackets() {
        assert_eq!(round_count(0), 1);
        assert_eq!(round_count(1), 1);
        assert_eq!(round_count(2), 2);
        assert_eq!(round_count(3), 3);
        assert_eq!(round_count(4), 3);
        assert_eq!(round_count(5), 4);
        assert_eq!(matches_in_round(3, 1), 3);
        assert_eq!(matches_in_round(3, 2), 2);
        assert_eq!(matches_in_round(3, 3), 1);
        assert_eq!(matches_in_round(3, 4), 0);
    }

    #[test]
    fn successor_slots_alternate() {
        assert_eq!(successor_of(1, 1), (2, 1, Slot::A));
        assert_eq!(successor_of(1, 2), (2, 1, Slot::B));
        assert_eq!(successor_of(2, 3), (3, 2, Slot::A));
        assert_eq!(successor_of(3, 4), (4, 2, Slot::B));
    }

    #[test]
    fn missing_second_feeder_on_odd_rounds() {
        // 3 first-round matches: round 2 position 2 is fed by r1p3 only.
        assert!(feeder_exists(3, 2, 2, Slot::A));
        assert!(!feeder_exists(3, 2, 2, Slot::B));
        assert!(feeder_exists(3, 3, 1, Slot::B));
        assert!(!feeder_exists(3, 1, 1, Slot::A));
    }

    proptest! {
        #[test]
        fn rounds_halve_down_to_a_single_final(first in 1usize..5000) {
            let last = round_count(first);
            prop_assert_eq!(matches_in_round(first, 1), first);
            prop_assert_eq!(matches_in_round(first, last), 1);
            for round in 2..=last {
                let prior = matches_in_round(first, round - 1);
                prop_assert_eq!(matches_in_round(first, round), prior.div_ceil(2));
                prop_assert!(prior > 1);
            }
        }

        #[test]
        fn successor_slots_are_unique_and_in_range(first in 1usize..2000) {
            let last = round_count(first);
            for round in 1..last {
                let mut seen = HashSet::new();
                let next_size = matches_in_round(first, round + 1) as u32;
                for position in 1..=matches_in_round(first, round) as u32 {
                    let (next_round, next_position, slot) = successor_of(round, position);
                    prop_assert_eq!(next_round, round + 1);
                    prop_assert!(next_position >= 1 && next_position <= next_size);
                    prop_assert!(seen.insert((next_position, slot)));
                    prop_assert_eq!(feeder_position(next_position, slot), position);
                }
            }
        }

        #[test]
        fn every_later_match_has_a_first_feeder(first in 1usize..2000) {
            let last = round_count(first);
            for round in 2..=last {
                for position in 1..=matches_in_round(first, round) as u32 {
                    prop_assert!(feeder_exists(first, round, position, Slot::A));
                }
            }
            // The final is always fed from both sides.
            if last >= 2 {
                prop_assert!(feeder_exists(first, last, 1, Slot::B));
            }
        }
    }
}
